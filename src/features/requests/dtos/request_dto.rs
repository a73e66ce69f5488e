use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::dispatch::{Capability, Location};
use crate::features::requests::models::{
    BreakdownRequest, ProviderOffer, RequestMatch, RequestStatus,
};
use crate::shared::types::PaginationQuery;
use crate::shared::validation::PHONE_REGEX;

/// Request DTO for submitting a breakdown request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub client_name: String,

    /// Phone number the requester can be reached at
    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub client_phone: String,

    /// Vehicle type that broke down (voiture or moto)
    pub vehicle_type: Capability,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,

    /// Breakdown latitude from the device GPS
    pub latitude: Option<f64>,

    /// Breakdown longitude from the device GPS
    pub longitude: Option<f64>,

    /// Free-text landmark or address
    #[validate(length(max = 500, message = "Address must not exceed 500 characters"))]
    pub address: Option<String>,

    /// Search radius in kilometers (default from server config)
    #[validate(range(exclusive_min = 0.0, message = "Radius must be positive"))]
    pub radius_km: Option<f64>,

    /// Number of providers to notify (default from server config)
    #[validate(range(min = 1, max = 50, message = "Fan-out must be between 1 and 50"))]
    pub max_fanout: Option<usize>,
}

/// Request DTO for a provider claiming a request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcceptRequestDto {
    pub provider_id: Uuid,
}

/// Request DTO for the assigned provider starting work
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartRequestDto {
    pub provider_id: Uuid,
}

/// Request DTO for closing an intervention
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRequestDto {
    pub provider_id: Uuid,

    /// Amount charged to the client
    #[schema(value_type = Option<String>, example = "15000")]
    pub amount: Option<Decimal>,

    #[validate(length(max = 2000, message = "Notes must not exceed 2000 characters"))]
    pub notes: Option<String>,
}

/// Request DTO for cancelling a request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequestDto {
    #[validate(length(max = 500, message = "Reason must not exceed 500 characters"))]
    pub reason: Option<String>,
}

/// Query parameters for a requester's history
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RequestListParams {
    /// Phone number used when submitting
    pub client_phone: String,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

impl RequestListParams {
    pub fn pagination(&self) -> PaginationQuery {
        let defaults = PaginationQuery::default();
        PaginationQuery {
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        }
    }
}

/// Response DTO for a breakdown request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponseDto {
    pub id: Uuid,
    pub reference_number: String,
    pub client_name: String,
    pub client_phone: String,
    pub vehicle_type: Capability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub location: Location,
    pub radius_km: f64,
    pub max_fanout: i32,
    pub status: RequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_provider_id: Option<Uuid>,
    pub dispatch_attempts: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BreakdownRequest> for RequestResponseDto {
    fn from(r: BreakdownRequest) -> Self {
        Self {
            location: r.location(),
            id: r.id,
            reference_number: r.reference_number,
            client_name: r.client_name,
            client_phone: r.client_phone,
            vehicle_type: r.vehicle_type,
            description: r.description,
            address: r.address,
            radius_km: r.radius_km,
            max_fanout: r.max_fanout,
            status: r.status,
            assigned_provider_id: r.assigned_provider_id,
            dispatch_attempts: r.dispatch_attempts,
            accepted_at: r.accepted_at,
            started_at: r.started_at,
            completed_at: r.completed_at,
            cancelled_at: r.cancelled_at,
            cancel_reason: r.cancel_reason,
            amount: r.amount,
            completion_notes: r.completion_notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Response DTO for a notified provider
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestMatchDto {
    pub provider_id: Uuid,
    pub distance_km: f64,
    pub located: bool,
    pub rank: i32,
    pub dispatch_round: i32,
    pub notified_at: DateTime<Utc>,
}

impl From<RequestMatch> for RequestMatchDto {
    fn from(m: RequestMatch) -> Self {
        Self {
            provider_id: m.provider_id,
            distance_km: m.distance_km,
            located: m.located,
            rank: m.rank,
            dispatch_round: m.dispatch_round,
            notified_at: m.created_at,
        }
    }
}

/// Response DTO for a request together with the providers it was sent to
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestDetailDto {
    pub request: RequestResponseDto,
    pub matches: Vec<RequestMatchDto>,
}

/// Response DTO for a pending request offered to a provider
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOfferDto {
    pub request_id: Uuid,
    pub reference_number: String,
    pub vehicle_type: Capability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub location: Location,
    pub distance_km: f64,
    pub located: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ProviderOffer> for ProviderOfferDto {
    fn from(o: ProviderOffer) -> Self {
        Self {
            request_id: o.request_id,
            reference_number: o.reference_number,
            vehicle_type: o.vehicle_type,
            description: o.description,
            address: o.address,
            location: Location {
                latitude: o.latitude,
                longitude: o.longitude,
            },
            distance_km: o.distance_km,
            located: o.located,
            created_at: o.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::fake_phone;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn create_dto() -> CreateRequestDto {
        CreateRequestDto {
            client_name: Name().fake(),
            client_phone: fake_phone(),
            vehicle_type: Capability::Motorcycle,
            description: Some("Pneu crevé".to_string()),
            latitude: Some(6.3703),
            longitude: Some(2.3912),
            address: None,
            radius_km: None,
            max_fanout: None,
        }
    }

    #[test]
    fn test_create_dto_valid() {
        assert!(create_dto().validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_non_positive_radius() {
        let mut dto = create_dto();
        dto.radius_km = Some(0.0);
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("radius_km"));
    }

    #[test]
    fn test_create_dto_rejects_bad_phone() {
        let mut dto = create_dto();
        dto.client_phone = "0".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_accepts_english_vehicle_alias() {
        let dto: CreateRequestDto = serde_json::from_value(serde_json::json!({
            "clientName": "Koffi",
            "clientPhone": "+229 97 00 00 00",
            "vehicleType": "motorcycle",
            "latitude": 6.37,
            "longitude": 2.39
        }))
        .unwrap();
        assert_eq!(dto.vehicle_type, Capability::Motorcycle);
        assert!(dto.radius_km.is_none());
    }

    #[test]
    fn test_list_params_default_pagination() {
        let params: RequestListParams =
            serde_json::from_value(serde_json::json!({ "client_phone": "97000000" })).unwrap();
        let pagination = params.pagination();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.limit(), 10);
    }
}
