use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::task::JoinHandle;

use crate::core::config::NotificationConfig;
use crate::core::error::{AppError, Result};
use crate::features::notifications::models::Notification;

/// Delivery seam for outbound notifications
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<()>;
}

/// Persists notifications to the outbox table and mirrors them to an optional webhook.
///
/// SMS/email gateways consume the outbox or the webhook; they are not driven
/// from here.
pub struct OutboxNotificationDispatcher {
    pool: PgPool,
    webhook: Option<Webhook>,
}

struct Webhook {
    client: reqwest::Client,
    url: String,
}

impl OutboxNotificationDispatcher {
    pub fn new(pool: PgPool, config: &NotificationConfig) -> Result<Self> {
        let webhook = match &config.webhook_url {
            Some(url) => {
                let client = reqwest::Client::builder()
                    .user_agent("DepannageCore/1.0 (dispatch-notifications)")
                    .timeout(config.webhook_timeout)
                    .build()
                    .map_err(|e| {
                        AppError::Internal(format!("Failed to build webhook client: {}", e))
                    })?;
                Some(Webhook {
                    client,
                    url: url.clone(),
                })
            }
            None => None,
        };

        Ok(Self { pool, webhook })
    }

    async fn push_webhook(&self, webhook: &Webhook, notification: &Notification) -> Result<()> {
        let response = webhook
            .client
            .post(&webhook.url)
            .json(notification)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Notification webhook failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Notification webhook returned status {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl NotificationDispatcher for OutboxNotificationDispatcher {
    async fn send(&self, notification: &Notification) -> Result<()> {
        let delivered = match &self.webhook {
            Some(webhook) => match self.push_webhook(webhook, notification).await {
                Ok(()) => true,
                Err(e) => {
                    // the outbox row is still written so the message is not lost
                    tracing::warn!(
                        "Webhook delivery failed for {} to {}: {}",
                        notification.kind,
                        notification.recipient,
                        e
                    );
                    false
                }
            },
            None => false,
        };

        sqlx::query(
            r#"
            INSERT INTO notifications (
                recipient_kind, recipient, request_id, kind, message, payload, webhook_delivered
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(notification.recipient_kind)
        .bind(&notification.recipient)
        .bind(notification.request_id)
        .bind(notification.kind)
        .bind(&notification.message)
        .bind(&notification.payload)
        .bind(delivered)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to store notification: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::debug!(
            "Notification {} queued for {:?} {} (request {})",
            notification.kind,
            notification.recipient_kind,
            notification.recipient,
            notification.request_id
        );

        Ok(())
    }
}

/// Send notifications in the background; failures are logged, never returned.
///
/// The handle is only useful to tests that need to wait for delivery.
pub fn fan_out(
    dispatcher: Arc<dyn NotificationDispatcher>,
    notifications: Vec<Notification>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if notifications.is_empty() {
            return;
        }

        let results = futures::future::join_all(
            notifications
                .iter()
                .map(|notification| dispatcher.send(notification)),
        )
        .await;

        let mut failed = 0;
        for (notification, result) in notifications.iter().zip(results) {
            if let Err(e) = result {
                failed += 1;
                tracing::warn!(
                    "Failed to send {} notification to {}: {}",
                    notification.kind,
                    notification.recipient,
                    e
                );
            }
        }

        tracing::info!(
            "Notification fan-out finished: sent={}, failed={}",
            notifications.len() - failed,
            failed
        );
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::notifications::models::NotificationKind;
    use crate::shared::test_helpers::RecordingNotifier;
    use uuid::Uuid;

    fn provider_notification(request_id: Uuid) -> Notification {
        Notification::to_provider(
            Uuid::new_v4(),
            request_id,
            NotificationKind::NewRequestAvailable,
            "new request",
            serde_json::json!({ "distanceKm": 2.0 }),
        )
    }

    #[tokio::test]
    async fn test_fan_out_sends_everything() {
        let notifier = Arc::new(RecordingNotifier::default());
        let request_id = Uuid::new_v4();
        let batch = vec![
            provider_notification(request_id),
            provider_notification(request_id),
            Notification::to_client(
                "+22997000000",
                request_id,
                NotificationKind::RequestReceived,
                "searching",
                serde_json::Value::Null,
            ),
        ];

        fan_out(notifier.clone(), batch.clone()).await.unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 3);
        for notification in &batch {
            assert!(sent.contains(notification));
        }
    }

    #[tokio::test]
    async fn test_fan_out_swallows_failures() {
        let notifier = Arc::new(RecordingNotifier::failing());

        let handle = fan_out(notifier.clone(), vec![provider_notification(Uuid::new_v4())]);

        assert!(handle.await.is_ok());
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_fan_out_empty_batch() {
        let notifier = Arc::new(RecordingNotifier::default());
        fan_out(notifier.clone(), Vec::new()).await.unwrap();
        assert!(notifier.sent().is_empty());
    }
}
