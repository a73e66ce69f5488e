use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::dispatch::error::DispatchError;
use crate::features::dispatch::models::{Capability, Location};

/// Input to a single dispatch lookup
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequest {
    pub location: Location,
    pub capability: Capability,
    pub radius_km: f64,
    pub max_fanout: usize,
}

impl DispatchRequest {
    pub const DEFAULT_RADIUS_KM: f64 = 10.0;
    pub const DEFAULT_MAX_FANOUT: usize = 5;

    pub fn new(location: Location, capability: Capability) -> Self {
        Self {
            location,
            capability,
            radius_km: Self::DEFAULT_RADIUS_KM,
            max_fanout: Self::DEFAULT_MAX_FANOUT,
        }
    }

    pub fn with_radius(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    pub fn with_max_fanout(mut self, max_fanout: usize) -> Self {
        self.max_fanout = max_fanout;
        self
    }

    /// Reject requests the resolver cannot answer meaningfully
    pub fn validate(&self) -> Result<(), DispatchError> {
        if !self.location.is_valid() {
            return Err(DispatchError::InvalidLocation(format!(
                "requester location {:?} is out of range",
                self.location
            )));
        }
        if !self.radius_km.is_finite() || self.radius_km <= 0.0 {
            return Err(DispatchError::InvalidRadius(self.radius_km));
        }
        Ok(())
    }
}

/// A provider selected for notification, nearest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankedMatch {
    pub provider_id: Uuid,
    /// Great-circle distance in kilometers, one decimal
    pub distance_km: f64,
    /// False when the provider has no recorded position and was ranked at 0 km
    pub located: bool,
}

/// Tunable eligibility rules applied before ranking
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchPolicy {
    /// Offline providers remain fallback candidates
    pub include_offline: bool,
    /// Providers without coordinates are ranked at 0 km instead of dropped
    pub unlocated_as_zero: bool,
    /// Candidate batch fetched from the directory per lookup
    pub candidate_limit: i64,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            include_offline: true,
            unlocated_as_zero: true,
            candidate_limit: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Location {
        Location {
            latitude: 6.3703,
            longitude: 2.3912,
        }
    }

    #[test]
    fn test_defaults() {
        let request = DispatchRequest::new(origin(), Capability::Car);
        assert_eq!(request.radius_km, 10.0);
        assert_eq!(request.max_fanout, 5);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_invalid_location_rejected() {
        let request = DispatchRequest::new(
            Location {
                latitude: 999.0,
                longitude: 0.0,
            },
            Capability::Car,
        );
        assert!(matches!(
            request.validate(),
            Err(DispatchError::InvalidLocation(_))
        ));
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let request = DispatchRequest::new(origin(), Capability::Car).with_radius(0.0);
        assert!(matches!(
            request.validate(),
            Err(DispatchError::InvalidRadius(_))
        ));

        let request = DispatchRequest::new(origin(), Capability::Car).with_radius(f64::NAN);
        assert!(request.validate().is_err());
    }
}
