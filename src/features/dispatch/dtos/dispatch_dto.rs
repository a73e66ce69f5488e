use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::dispatch::models::{Capability, RankedMatch};

/// Request DTO for a side-effect free dispatch lookup
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DispatchPreviewDto {
    /// Requester latitude in decimal degrees
    pub latitude: Option<f64>,

    /// Requester longitude in decimal degrees
    pub longitude: Option<f64>,

    /// Vehicle type needing assistance
    pub vehicle_type: Capability,

    /// Search radius in kilometers (default from server config)
    #[validate(range(exclusive_min = 0.0, message = "Radius must be positive"))]
    pub radius_km: Option<f64>,

    /// Number of providers to return (default from server config)
    #[validate(range(min = 1, max = 50, message = "Fan-out must be between 1 and 50"))]
    pub max_fanout: Option<usize>,
}

/// Response DTO for a dispatch lookup
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DispatchPreviewResponseDto {
    pub radius_km: f64,
    pub max_fanout: usize,
    pub matches: Vec<RankedMatch>,
}
