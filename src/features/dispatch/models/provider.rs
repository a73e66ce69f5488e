use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::dispatch::models::Location;

/// Vehicle types a provider can tow or repair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "vehicle_capability")]
pub enum Capability {
    #[serde(rename = "voiture", alias = "car")]
    #[sqlx(rename = "voiture")]
    Car,
    #[serde(rename = "moto", alias = "motorcycle")]
    #[sqlx(rename = "moto")]
    Motorcycle,
    #[serde(rename = "both")]
    #[sqlx(rename = "both")]
    Both,
}

impl Capability {
    /// Whether a provider with this capability can take a request needing `required`
    pub fn serves(self, required: Capability) -> bool {
        self == required || self == Capability::Both
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Car => write!(f, "voiture"),
            Capability::Motorcycle => write!(f, "moto"),
            Capability::Both => write!(f, "both"),
        }
    }
}

/// Provider availability as reported by the provider app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "provider_availability", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Busy,
    Offline,
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Available => write!(f, "available"),
            Availability::Busy => write!(f, "busy"),
            Availability::Offline => write!(f, "offline"),
        }
    }
}

/// Read-only view of a provider as the resolver sees it
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderCandidate {
    pub id: Uuid,
    pub location: Option<Location>,
    pub availability: Availability,
    pub active: bool,
    pub capability: Capability,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_serves() {
        assert!(Capability::Car.serves(Capability::Car));
        assert!(Capability::Both.serves(Capability::Car));
        assert!(Capability::Both.serves(Capability::Motorcycle));
        assert!(!Capability::Car.serves(Capability::Motorcycle));
        assert!(!Capability::Motorcycle.serves(Capability::Car));
    }

    #[test]
    fn test_capability_wire_names() {
        assert_eq!(
            serde_json::to_string(&Capability::Car).unwrap(),
            "\"voiture\""
        );
        let parsed: Capability = serde_json::from_str("\"car\"").unwrap();
        assert_eq!(parsed, Capability::Car);
        let parsed: Capability = serde_json::from_str("\"moto\"").unwrap();
        assert_eq!(parsed, Capability::Motorcycle);
    }

    #[test]
    fn test_availability_wire_names() {
        let parsed: Availability = serde_json::from_str("\"offline\"").unwrap();
        assert_eq!(parsed, Availability::Offline);
        assert_eq!(Availability::Busy.to_string(), "busy");
    }
}
