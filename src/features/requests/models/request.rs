use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::dispatch::{Capability, DispatchRequest, Location};

/// Lifecycle of a breakdown request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestStatus {
    /// Allowed moves: pending → accepted → in_progress → completed,
    /// and pending | accepted → cancelled
    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Accepted)
                | (RequestStatus::Accepted, RequestStatus::InProgress)
                | (RequestStatus::InProgress, RequestStatus::Completed)
                | (RequestStatus::Pending, RequestStatus::Cancelled)
                | (RequestStatus::Accepted, RequestStatus::Cancelled)
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Accepted => write!(f, "accepted"),
            RequestStatus::InProgress => write!(f, "in_progress"),
            RequestStatus::Completed => write!(f, "completed"),
            RequestStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Database model for a breakdown request
#[derive(Debug, Clone, FromRow)]
pub struct BreakdownRequest {
    pub id: Uuid,
    pub reference_number: String,
    pub client_name: String,
    pub client_phone: String,
    pub vehicle_type: Capability,
    pub description: Option<String>,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub max_fanout: i32,
    pub status: RequestStatus,
    pub assigned_provider_id: Option<Uuid>,
    pub dispatch_attempts: i32,
    pub last_dispatched_at: Option<DateTime<Utc>>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancel_reason: Option<String>,
    pub amount: Option<Decimal>,
    pub completion_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BreakdownRequest {
    pub fn location(&self) -> Location {
        Location {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Rebuild the lookup parameters stored with the request
    pub fn dispatch_request(&self) -> DispatchRequest {
        DispatchRequest::new(self.location(), self.vehicle_type)
            .with_radius(self.radius_km)
            .with_max_fanout(usize::try_from(self.max_fanout).unwrap_or(0))
    }
}

/// Data for inserting a breakdown request
#[derive(Debug)]
pub struct CreateBreakdownRequest {
    pub client_name: String,
    pub client_phone: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub dispatch: DispatchRequest,
}

/// A provider notified about a request
#[derive(Debug, Clone, FromRow)]
pub struct RequestMatch {
    pub id: Uuid,
    pub request_id: Uuid,
    pub provider_id: Uuid,
    pub distance_km: f64,
    pub located: bool,
    pub rank: i32,
    pub dispatch_round: i32,
    pub created_at: DateTime<Utc>,
}

/// A pending request as offered to one provider
#[derive(Debug, Clone, FromRow)]
pub struct ProviderOffer {
    pub request_id: Uuid,
    pub reference_number: String,
    pub vehicle_type: Capability,
    pub description: Option<String>,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
    pub located: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [RequestStatus; 5] = [
        RequestStatus::Pending,
        RequestStatus::Accepted,
        RequestStatus::InProgress,
        RequestStatus::Completed,
        RequestStatus::Cancelled,
    ];

    #[test]
    fn test_happy_path_transitions() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Accepted));
        assert!(RequestStatus::Accepted.can_transition_to(RequestStatus::InProgress));
        assert!(RequestStatus::InProgress.can_transition_to(RequestStatus::Completed));
    }

    #[test]
    fn test_cancellation_window() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Cancelled));
        assert!(RequestStatus::Accepted.can_transition_to(RequestStatus::Cancelled));
        assert!(!RequestStatus::InProgress.can_transition_to(RequestStatus::Cancelled));
    }

    #[test]
    fn test_terminal_states_are_final() {
        for from in [RequestStatus::Completed, RequestStatus::Cancelled] {
            assert!(ALL.iter().all(|to| !from.can_transition_to(*to)));
        }
    }

    #[test]
    fn test_no_skipping_or_self_loops() {
        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::InProgress));
        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Completed));
        for status in ALL {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn test_status_wire_name() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(RequestStatus::InProgress.to_string(), "in_progress");
    }
}
