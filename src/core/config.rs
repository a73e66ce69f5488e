use std::env;
use std::time::Duration;

use crate::features::dispatch::{
    Capability, DispatchError, DispatchPolicy, DispatchRequest, Location,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub swagger: SwaggerConfig,
    pub dispatch: DispatchConfig,
    pub notification: NotificationConfig,
    pub redispatch: RedispatchConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Proximity dispatch tuning
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Radius used when a request does not specify one
    pub default_radius_km: f64,
    /// Upper bound accepted from clients
    pub max_radius_km: f64,
    /// Number of providers notified when a request does not specify one
    pub default_max_fanout: usize,
    /// Size of the candidate batch fetched from the directory
    pub candidate_limit: i64,
    /// Offline providers stay matchable as fallback candidates
    pub include_offline: bool,
    /// Providers without coordinates are ranked at 0 km instead of dropped
    pub unlocated_as_zero: bool,
}

/// Outbound notification settings
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// Optional webhook receiving every notification as JSON
    pub webhook_url: Option<String>,
    pub webhook_timeout: Duration,
}

/// Background re-matching of pending requests that found nobody
#[derive(Debug, Clone)]
pub struct RedispatchConfig {
    pub enabled: bool,
    pub interval: Duration,
    pub batch_size: i64,
    pub max_attempts: i32,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                tracing::warn!("Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            dispatch: DispatchConfig::from_env()?,
            notification: NotificationConfig::from_env()?,
            redispatch: RedispatchConfig::from_env()?,
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, String> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid value", key)),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        Ok(Self {
            url,
            max_connections: parse_env("DB_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?,
            min_connections: parse_env("DB_MIN_CONNECTIONS", Self::DEFAULT_MIN_CONNECTIONS)?,
            acquire_timeout_secs: parse_env(
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: parse_env("DB_IDLE_TIMEOUT_SECS", Self::DEFAULT_IDLE_TIMEOUT_SECS)?,
            max_lifetime_secs: parse_env("DB_MAX_LIFETIME_SECS", Self::DEFAULT_MAX_LIFETIME_SECS)?,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Depannage API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Roadside assistance dispatch API".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl DispatchConfig {
    const DEFAULT_RADIUS_KM: f64 = 10.0;
    const DEFAULT_MAX_RADIUS_KM: f64 = 100.0;
    const DEFAULT_MAX_FANOUT: usize = 5;
    const DEFAULT_CANDIDATE_LIMIT: i64 = 20;

    pub fn from_env() -> Result<Self, String> {
        let config = Self {
            default_radius_km: parse_env("DISPATCH_DEFAULT_RADIUS_KM", Self::DEFAULT_RADIUS_KM)?,
            max_radius_km: parse_env("DISPATCH_MAX_RADIUS_KM", Self::DEFAULT_MAX_RADIUS_KM)?,
            default_max_fanout: parse_env(
                "DISPATCH_DEFAULT_MAX_FANOUT",
                Self::DEFAULT_MAX_FANOUT,
            )?,
            candidate_limit: parse_env("DISPATCH_CANDIDATE_LIMIT", Self::DEFAULT_CANDIDATE_LIMIT)?,
            include_offline: parse_env("DISPATCH_INCLUDE_OFFLINE", true)?,
            unlocated_as_zero: parse_env("DISPATCH_UNLOCATED_AS_ZERO", true)?,
        };

        let radius = config.default_radius_km;
        if !radius.is_finite() || radius <= 0.0 || radius > config.max_radius_km {
            return Err(
                "DISPATCH_DEFAULT_RADIUS_KM must be positive and not exceed DISPATCH_MAX_RADIUS_KM"
                    .to_string(),
            );
        }
        if config.candidate_limit < 1 {
            return Err("DISPATCH_CANDIDATE_LIMIT must be at least 1".to_string());
        }

        Ok(config)
    }

    /// Filtering policy handed to the resolver
    pub fn policy(&self) -> DispatchPolicy {
        DispatchPolicy {
            include_offline: self.include_offline,
            unlocated_as_zero: self.unlocated_as_zero,
            candidate_limit: self.candidate_limit,
        }
    }

    /// Build a lookup from client overrides, falling back to configured defaults
    pub fn request(
        &self,
        location: Location,
        capability: Capability,
        radius_km: Option<f64>,
        max_fanout: Option<usize>,
    ) -> Result<DispatchRequest, DispatchError> {
        let radius_km = radius_km.unwrap_or(self.default_radius_km);
        if radius_km > self.max_radius_km {
            return Err(DispatchError::InvalidRadius(radius_km));
        }

        let request = DispatchRequest::new(location, capability)
            .with_radius(radius_km)
            .with_max_fanout(max_fanout.unwrap_or(self.default_max_fanout));
        request.validate()?;

        Ok(request)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            default_radius_km: Self::DEFAULT_RADIUS_KM,
            max_radius_km: Self::DEFAULT_MAX_RADIUS_KM,
            default_max_fanout: Self::DEFAULT_MAX_FANOUT,
            candidate_limit: Self::DEFAULT_CANDIDATE_LIMIT,
            include_offline: true,
            unlocated_as_zero: true,
        }
    }
}

impl NotificationConfig {
    const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 5;

    pub fn from_env() -> Result<Self, String> {
        let webhook_url = env::var("NOTIFICATION_WEBHOOK_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let timeout_secs = parse_env(
            "NOTIFICATION_WEBHOOK_TIMEOUT_SECS",
            Self::DEFAULT_WEBHOOK_TIMEOUT_SECS,
        )?;

        Ok(Self {
            webhook_url,
            webhook_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl RedispatchConfig {
    const DEFAULT_INTERVAL_SECS: u64 = 60;
    const DEFAULT_BATCH_SIZE: i64 = 20;
    const DEFAULT_MAX_ATTEMPTS: i32 = 10;

    pub fn from_env() -> Result<Self, String> {
        let interval_secs = parse_env("REDISPATCH_INTERVAL_SECS", Self::DEFAULT_INTERVAL_SECS)?;
        if interval_secs == 0 {
            return Err("REDISPATCH_INTERVAL_SECS must be at least 1".to_string());
        }

        let batch_size = parse_env("REDISPATCH_BATCH_SIZE", Self::DEFAULT_BATCH_SIZE)?;
        if batch_size < 1 {
            return Err("REDISPATCH_BATCH_SIZE must be at least 1".to_string());
        }

        Ok(Self {
            enabled: parse_env("REDISPATCH_ENABLED", true)?,
            interval: Duration::from_secs(interval_secs),
            batch_size,
            max_attempts: parse_env("REDISPATCH_MAX_ATTEMPTS", Self::DEFAULT_MAX_ATTEMPTS)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.default_radius_km, 10.0);
        assert_eq!(config.default_max_fanout, 5);
        assert_eq!(config.candidate_limit, 20);

        let policy = config.policy();
        assert!(policy.include_offline);
        assert!(policy.unlocated_as_zero);
    }

    #[test]
    fn test_request_applies_defaults_and_bounds() {
        let config = DispatchConfig::default();
        let here = Location {
            latitude: 6.3703,
            longitude: 2.3912,
        };

        let request = config.request(here, Capability::Car, None, None).unwrap();
        assert_eq!(request.radius_km, 10.0);
        assert_eq!(request.max_fanout, 5);

        let request = config
            .request(here, Capability::Car, Some(25.0), Some(3))
            .unwrap();
        assert_eq!(request.radius_km, 25.0);
        assert_eq!(request.max_fanout, 3);

        assert!(matches!(
            config.request(here, Capability::Car, Some(500.0), None),
            Err(DispatchError::InvalidRadius(_))
        ));
    }

    #[test]
    fn test_swagger_credentials() {
        let swagger = SwaggerConfig {
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
            title: String::new(),
            version: String::new(),
            description: String::new(),
        };
        assert_eq!(swagger.credentials().as_deref(), Some("admin:secret"));

        let anonymous = SwaggerConfig {
            password: None,
            ..swagger
        };
        assert!(anonymous.credentials().is_none());
    }
}
