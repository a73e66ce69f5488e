use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Who a notification is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "recipient_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecipientKind {
    Provider,
    Client,
}

/// What happened to trigger the notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewRequestAvailable,
    RequestReceived,
    RequestAccepted,
    InterventionCompleted,
    RequestCancelled,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::NewRequestAvailable => write!(f, "new_request_available"),
            NotificationKind::RequestReceived => write!(f, "request_received"),
            NotificationKind::RequestAccepted => write!(f, "request_accepted"),
            NotificationKind::InterventionCompleted => write!(f, "intervention_completed"),
            NotificationKind::RequestCancelled => write!(f, "request_cancelled"),
        }
    }
}

/// An outbound message before it is persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub recipient_kind: RecipientKind,
    /// Provider id or client phone number
    pub recipient: String,
    pub request_id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub payload: serde_json::Value,
}

impl Notification {
    pub fn to_provider(
        provider_id: Uuid,
        request_id: Uuid,
        kind: NotificationKind,
        message: &str,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            recipient_kind: RecipientKind::Provider,
            recipient: provider_id.to_string(),
            request_id,
            kind,
            message: message.to_string(),
            payload,
        }
    }

    pub fn to_client(
        phone: &str,
        request_id: Uuid,
        kind: NotificationKind,
        message: &str,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            recipient_kind: RecipientKind::Client,
            recipient: phone.to_string(),
            request_id,
            kind,
            message: message.to_string(),
            payload,
        }
    }
}

/// Database model for a stored notification
#[derive(Debug, Clone, FromRow)]
pub struct NotificationRecord {
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
