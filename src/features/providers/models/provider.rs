use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::dispatch::{Availability, Capability, Location, ProviderCandidate};

/// Database model for a provider (dépanneur) account
#[derive(Debug, Clone, FromRow)]
pub struct Provider {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub capability: Capability,
    pub availability: Availability,
    pub active: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_updated_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Provider {
    /// Last reported position; a half-recorded pair counts as no position
    pub fn location(&self) -> Option<Location> {
        stored_location(self.latitude, self.longitude)
    }
}

/// Data for registering a provider
#[derive(Debug)]
pub struct CreateProvider {
    pub name: String,
    pub phone: String,
    pub capability: Capability,
}

/// Slim projection read by the dispatch directory
#[derive(Debug, Clone, FromRow)]
pub struct ProviderDirectoryRow {
    pub id: Uuid,
    pub capability: Capability,
    pub availability: Availability,
    pub active: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<ProviderDirectoryRow> for ProviderCandidate {
    fn from(row: ProviderDirectoryRow) -> Self {
        Self {
            id: row.id,
            location: stored_location(row.latitude, row.longitude),
            availability: row.availability,
            active: row.active,
            capability: row.capability,
        }
    }
}

/// Stored coordinates are passed through unvalidated; the dispatch filter rejects bad ones
fn stored_location(latitude: Option<f64>, longitude: Option<f64>) -> Option<Location> {
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(Location {
            latitude,
            longitude,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(latitude: Option<f64>, longitude: Option<f64>) -> ProviderDirectoryRow {
        ProviderDirectoryRow {
            id: Uuid::new_v4(),
            capability: Capability::Both,
            availability: Availability::Offline,
            active: true,
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_row_to_candidate() {
        let candidate: ProviderCandidate = row(Some(6.37), Some(2.39)).into();
        assert_eq!(
            candidate.location,
            Some(Location {
                latitude: 6.37,
                longitude: 2.39
            })
        );
        assert_eq!(candidate.availability, Availability::Offline);
        assert_eq!(candidate.capability, Capability::Both);
    }

    #[test]
    fn test_half_location_is_unlocated() {
        let candidate: ProviderCandidate = row(Some(6.37), None).into();
        assert!(candidate.location.is_none());
    }

    #[test]
    fn test_corrupt_location_passed_through() {
        let candidate: ProviderCandidate = row(Some(400.0), Some(2.39)).into();
        assert!(candidate.location.is_some_and(|l| !l.is_valid()));
    }
}
