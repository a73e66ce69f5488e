pub mod dispatch;
pub mod notifications;
pub mod providers;
pub mod requests;
