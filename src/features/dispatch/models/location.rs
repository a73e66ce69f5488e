use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::dispatch::error::DispatchError;

/// A point on the globe in signed decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub const MAX_LATITUDE: f64 = 90.0;
    pub const MAX_LONGITUDE: f64 = 180.0;

    /// Build a validated location
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DispatchError> {
        let location = Self {
            latitude,
            longitude,
        };

        if location.is_valid() {
            Ok(location)
        } else {
            Err(DispatchError::InvalidLocation(format!(
                "({}, {}) is outside latitude [-90, 90] / longitude [-180, 180]",
                latitude, longitude
            )))
        }
    }

    /// Build a location from optional request fields; a missing half is invalid
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Result<Self, DispatchError> {
        match (latitude, longitude) {
            (Some(lat), Some(lng)) => Self::new(lat, lng),
            _ => Err(DispatchError::InvalidLocation(
                "latitude and longitude are both required".to_string(),
            )),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= Self::MAX_LATITUDE
            && self.longitude.abs() <= Self::MAX_LONGITUDE
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_location() {
        let location = Location::new(6.3703, 2.3912).unwrap();
        assert_eq!(location.latitude, 6.3703);
        assert_eq!(location.longitude, 2.3912);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(Location::new(90.0, 180.0).is_ok());
        assert!(Location::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_out_of_range_latitude() {
        let err = Location::new(999.0, 0.0).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidLocation(_)));
    }

    #[test]
    fn test_out_of_range_longitude() {
        assert!(Location::new(0.0, 180.5).is_err());
    }

    #[test]
    fn test_non_finite_values() {
        assert!(Location::new(f64::NAN, 0.0).is_err());
        assert!(Location::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_missing_component() {
        assert!(Location::from_parts(Some(6.37), None).is_err());
        assert!(Location::from_parts(None, Some(2.39)).is_err());
        assert!(Location::from_parts(Some(6.37), Some(2.39)).is_ok());
    }
}
