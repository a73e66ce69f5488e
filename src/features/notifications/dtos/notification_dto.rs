use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::notifications::models::{NotificationKind, NotificationRecord, RecipientKind};
use crate::shared::types::PaginationQuery;

/// Query parameters for listing a recipient's notifications
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationQueryParams {
    /// provider or client
    pub recipient_kind: RecipientKind,
    /// Provider id or client phone number
    pub recipient: String,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

impl NotificationQueryParams {
    pub fn pagination(&self) -> PaginationQuery {
        let defaults = PaginationQuery::default();
        PaginationQuery {
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        }
    }
}

/// Response DTO for a stored notification
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponseDto {
    pub id: Uuid,
    pub recipient_kind: RecipientKind,
    pub recipient: String,
    pub request_id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub payload: serde_json::Value,
    pub webhook_delivered: bool,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationRecord> for NotificationResponseDto {
    fn from(n: NotificationRecord) -> Self {
        Self {
            id: n.id,
            recipient_kind: n.recipient_kind,
            recipient: n.recipient,
            request_id: n.request_id,
            kind: n.kind,
            message: n.message,
            payload: n.payload,
            webhook_delivered: n.webhook_delivered,
            created_at: n.created_at,
        }
    }
}
