//! Outbound notifications for dispatch events.
//!
//! Every message is written to the `notifications` outbox and, when
//! `NOTIFICATION_WEBHOOK_URL` is set, mirrored to that webhook. Sending is
//! fire-and-forget from the request flow's point of view.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/notifications` | No | List notifications for a recipient |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use models::{Notification, NotificationKind};
pub use services::{fan_out, NotificationDispatcher, NotificationService, OutboxNotificationDispatcher};
