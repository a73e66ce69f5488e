use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::notifications::models::{NotificationRecord, RecipientKind};
use crate::shared::types::PaginationQuery;

/// Read side of the notification outbox
pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List notifications addressed to one recipient, newest first
    pub async fn list_for_recipient(
        &self,
        kind: RecipientKind,
        recipient: &str,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<NotificationRecord>, i64)> {
        let records = sqlx::query_as::<_, NotificationRecord>(
            r#"
            SELECT
                id, recipient_kind, recipient, request_id, kind,
                message, payload, webhook_delivered, created_at
            FROM notifications
            WHERE recipient_kind = $1 AND recipient = $2
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(kind)
        .bind(recipient)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list notifications: {:?}", e);
            AppError::Database(e)
        })?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_kind = $1 AND recipient = $2",
        )
        .bind(kind)
        .bind(recipient)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count notifications: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((records, total))
    }
}
