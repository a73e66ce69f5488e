use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::dispatch::{Availability, Capability, Location};
use crate::features::providers::models::Provider;
use crate::shared::validation::PHONE_REGEX;

/// Request DTO for registering a provider
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProviderDto {
    /// Business or driver name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Contact phone number, used for notifications
    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub phone: String,

    /// Vehicle types this provider can handle
    pub capability: Capability,
}

/// Request DTO for a position report from the provider app
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationDto {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Request DTO for switching availability
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvailabilityDto {
    pub availability: Availability,
}

/// Response DTO for a provider
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResponseDto {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub capability: Capability,
    pub availability: Availability,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Provider> for ProviderResponseDto {
    fn from(p: Provider) -> Self {
        Self {
            location: p.location(),
            id: p.id,
            name: p.name,
            phone: p.phone,
            capability: p.capability,
            availability: p.availability,
            active: p.active,
            location_updated_at: p.location_updated_at,
            approved_at: p.approved_at,
            created_at: p.created_at,
        }
    }
}
