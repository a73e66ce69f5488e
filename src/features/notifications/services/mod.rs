mod dispatcher;
mod notification_service;

pub use dispatcher::{fan_out, NotificationDispatcher, OutboxNotificationDispatcher};
pub use notification_service::NotificationService;
