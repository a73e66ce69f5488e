use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::dispatch::{Availability, Location};
use crate::features::providers::dtos::ProviderResponseDto;
use crate::features::providers::models::{CreateProvider, Provider};

/// Service for provider accounts
pub struct ProviderService {
    pool: PgPool,
}

impl ProviderService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a provider; the account stays inactive until approved
    pub async fn register(&self, data: CreateProvider) -> Result<ProviderResponseDto> {
        let provider = sqlx::query_as::<_, Provider>(
            r#"
            INSERT INTO providers (name, phone, capability, availability, active)
            VALUES ($1, $2, $3, 'offline', FALSE)
            RETURNING
                id, name, phone, capability, availability, active,
                latitude, longitude, location_updated_at, approved_at,
                created_at, updated_at
            "#,
        )
        .bind(data.name.trim())
        .bind(data.phone.trim())
        .bind(data.capability)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::Conflict(
                format!("A provider with phone '{}' already exists", data.phone.trim()),
            ),
            e => {
                tracing::error!("Failed to register provider: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!(
            "Provider registered: id={}, capability={}",
            provider.id,
            provider.capability
        );

        Ok(provider.into())
    }

    /// Get provider by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<ProviderResponseDto> {
        let provider = sqlx::query_as::<_, Provider>(
            r#"
            SELECT
                id, name, phone, capability, availability, active,
                latitude, longitude, location_updated_at, approved_at,
                created_at, updated_at
            FROM providers
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get provider by ID: {:?}", e);
            AppError::Database(e)
        })?;

        provider
            .map(Into::into)
            .ok_or_else(|| not_found(id))
    }

    /// Approve a provider so dispatch can pick it
    pub async fn approve(&self, id: Uuid) -> Result<ProviderResponseDto> {
        let provider = sqlx::query_as::<_, Provider>(
            r#"
            UPDATE providers
            SET active = TRUE,
                approved_at = COALESCE(approved_at, NOW()),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING
                id, name, phone, capability, availability, active,
                latitude, longitude, location_updated_at, approved_at,
                created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to approve provider: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| not_found(id))?;

        tracing::info!("Provider approved: id={}", provider.id);

        Ok(provider.into())
    }

    /// Take a provider out of dispatch
    pub async fn deactivate(&self, id: Uuid) -> Result<ProviderResponseDto> {
        let provider = sqlx::query_as::<_, Provider>(
            r#"
            UPDATE providers
            SET active = FALSE, availability = 'offline', updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING
                id, name, phone, capability, availability, active,
                latitude, longitude, location_updated_at, approved_at,
                created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to deactivate provider: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| not_found(id))?;

        tracing::info!("Provider deactivated: id={}", provider.id);

        Ok(provider.into())
    }

    /// Soft delete a provider; its past matches are kept
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE providers
            SET deleted_at = NOW(), active = FALSE, availability = 'offline', updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete provider: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Provider deleted: id={}", id);

        Ok(())
    }

    /// Record the provider's current position
    pub async fn update_location(&self, id: Uuid, location: Location) -> Result<ProviderResponseDto> {
        let provider = sqlx::query_as::<_, Provider>(
            r#"
            UPDATE providers
            SET latitude = $2, longitude = $3, location_updated_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING
                id, name, phone, capability, availability, active,
                latitude, longitude, location_updated_at, approved_at,
                created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(location.latitude)
        .bind(location.longitude)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update provider location: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| not_found(id))?;

        tracing::debug!("Provider {} moved to {}", provider.id, location);

        Ok(provider.into())
    }

    /// Switch between available and offline
    ///
    /// `busy` is owned by the request flow and cannot be set by hand; a busy
    /// provider stays busy until its intervention ends.
    pub async fn update_availability(
        &self,
        id: Uuid,
        availability: Availability,
    ) -> Result<ProviderResponseDto> {
        if availability == Availability::Busy {
            return Err(AppError::BadRequest(
                "Availability 'busy' is set when a request is accepted".to_string(),
            ));
        }

        let provider = sqlx::query_as::<_, Provider>(
            r#"
            UPDATE providers
            SET availability = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL AND availability <> 'busy'
            RETURNING
                id, name, phone, capability, availability, active,
                latitude, longitude, location_updated_at, approved_at,
                created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(availability)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update provider availability: {:?}", e);
            AppError::Database(e)
        })?;

        match provider {
            Some(provider) => {
                tracing::info!("Provider {} is now {}", provider.id, provider.availability);
                Ok(provider.into())
            }
            None => {
                // Distinguish a missing provider from one busy on an intervention
                self.get_by_id(id).await?;
                Err(AppError::Conflict(format!(
                    "Provider '{}' is busy on an intervention",
                    id
                )))
            }
        }
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Provider '{}' not found", id))
}
