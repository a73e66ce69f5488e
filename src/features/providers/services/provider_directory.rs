use async_trait::async_trait;
use sqlx::PgPool;

use crate::features::dispatch::{Capability, DirectoryError, ProviderCandidate, ProviderDirectory};
use crate::features::providers::models::ProviderDirectoryRow;

/// Postgres-backed provider directory (linear scan over active providers)
pub struct PgProviderDirectory {
    pool: PgPool,
}

impl PgProviderDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProviderDirectory for PgProviderDirectory {
    async fn list_eligible_providers(
        &self,
        capability: Capability,
        limit: i64,
    ) -> Result<Vec<ProviderCandidate>, DirectoryError> {
        // Busy providers are never eligible; keep them out of the batch.
        // Available before offline, then freshest positions first.
        let rows = sqlx::query_as::<_, ProviderDirectoryRow>(
            r#"
            SELECT id, capability, availability, active, latitude, longitude
            FROM providers
            WHERE active = TRUE
              AND deleted_at IS NULL
              AND availability <> 'busy'
              AND (capability = $1 OR capability = 'both')
            ORDER BY
                CASE availability WHEN 'available' THEN 0 ELSE 1 END,
                location_updated_at DESC NULLS LAST,
                id
            LIMIT $2
            "#,
        )
        .bind(capability)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list eligible providers: {:?}", e);
            directory_error(e)
        })?;

        Ok(rows.into_iter().map(ProviderCandidate::from).collect())
    }
}

/// Connection-level failures mean the directory is unreachable, not that the query is wrong
fn directory_error(err: sqlx::Error) -> DirectoryError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            DirectoryError::Unavailable(err.to_string())
        }
        other => DirectoryError::Storage(other),
    }
}
