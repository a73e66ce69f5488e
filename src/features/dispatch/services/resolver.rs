use std::sync::Arc;

use crate::features::dispatch::directory::ProviderDirectory;
use crate::features::dispatch::error::DispatchError;
use crate::features::dispatch::models::{
    DispatchPolicy, DispatchRequest, ProviderCandidate, RankedMatch,
};
use crate::features::dispatch::services::candidate_filter::filter_candidates;
use crate::features::dispatch::services::ranking::rank_candidates;

/// Rank a directory snapshot against a request. Pure and deterministic.
fn resolve_snapshot(
    snapshot: &[ProviderCandidate],
    request: &DispatchRequest,
    policy: &DispatchPolicy,
) -> Vec<RankedMatch> {
    let eligible = filter_candidates(snapshot, request.capability, policy);
    rank_candidates(
        &eligible,
        &request.location,
        request.radius_km,
        request.max_fanout,
    )
}

/// Finds the nearest eligible providers for a breakdown request.
///
/// Stateless and read-only: it neither reserves providers nor sends
/// notifications. Two concurrent lookups may return the same provider;
/// exclusivity is enforced later when a provider accepts.
pub struct DispatchResolver {
    directory: Arc<dyn ProviderDirectory>,
    policy: DispatchPolicy,
}

impl DispatchResolver {
    pub fn new(directory: Arc<dyn ProviderDirectory>, policy: DispatchPolicy) -> Self {
        Self { directory, policy }
    }

    /// Resolve matches, surfacing directory failures as `DirectoryUnavailable`
    pub async fn try_resolve(
        &self,
        request: &DispatchRequest,
    ) -> Result<Vec<RankedMatch>, DispatchError> {
        request.validate()?;

        let snapshot = self
            .directory
            .list_eligible_providers(request.capability, self.policy.candidate_limit)
            .await?;

        let matches = resolve_snapshot(&snapshot, request, &self.policy);

        tracing::debug!(
            "Resolved {} match(es) from {} candidate(s) around {} (radius={} km, fanout={})",
            matches.len(),
            snapshot.len(),
            request.location,
            request.radius_km,
            request.max_fanout
        );

        Ok(matches)
    }

    /// Resolve matches, degrading a directory failure to an empty list.
    ///
    /// Only input validation errors are returned; an empty list means nobody
    /// can be notified right now.
    pub async fn resolve(
        &self,
        request: &DispatchRequest,
    ) -> Result<Vec<RankedMatch>, DispatchError> {
        match self.try_resolve(request).await {
            Err(DispatchError::DirectoryUnavailable(reason)) => {
                tracing::warn!(
                    "Provider directory unavailable, dispatching nobody for request at {}: {}",
                    request.location,
                    reason
                );
                Ok(Vec::new())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::dispatch::models::{Availability, Capability, Location};
    use crate::shared::test_helpers::{
        location_north_of, provider_at, FailingDirectory, InMemoryProviderDirectory,
    };
    use tokio_test::{assert_err, assert_ok};

    fn requester() -> Location {
        Location {
            latitude: 6.3703,
            longitude: 2.3912,
        }
    }

    fn resolver_for(providers: Vec<ProviderCandidate>) -> DispatchResolver {
        DispatchResolver::new(
            Arc::new(InMemoryProviderDirectory::new(providers)),
            DispatchPolicy::default(),
        )
    }

    #[tokio::test]
    async fn test_radius_and_activity_filtering() {
        let origin = requester();
        let near = provider_at(&origin, 2.0, Capability::Car);
        let mid = provider_at(&origin, 8.5, Capability::Car);
        let far = provider_at(&origin, 15.0, Capability::Car);
        let mut inactive = provider_at(&origin, 1.0, Capability::Car);
        inactive.active = false;

        let resolver = resolver_for(vec![far, inactive.clone(), mid.clone(), near.clone()]);
        let request = DispatchRequest::new(origin, Capability::Car);

        let matches = resolver.resolve(&request).await.unwrap();

        assert_eq!(
            matches
                .iter()
                .map(|m| (m.provider_id, m.distance_km))
                .collect::<Vec<_>>(),
            vec![(near.id, 2.0), (mid.id, 8.5)]
        );
        assert!(matches.iter().all(|m| m.provider_id != inactive.id));
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let resolver = resolver_for(Vec::new());
        let request = DispatchRequest::new(requester(), Capability::Car);

        let matches = assert_ok!(resolver.resolve(&request).await);
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_requester_location() {
        let resolver = resolver_for(Vec::new());
        let request = DispatchRequest::new(
            Location {
                latitude: 999.0,
                longitude: 0.0,
            },
            Capability::Car,
        );

        let err = assert_err!(resolver.resolve(&request).await);
        assert!(matches!(err, DispatchError::InvalidLocation(_)));
    }

    #[tokio::test]
    async fn test_fanout_keeps_nearest() {
        let origin = requester();
        let providers: Vec<ProviderCandidate> = [6.0, 1.0, 5.0, 2.0, 4.0, 3.0]
            .iter()
            .map(|km| provider_at(&origin, *km, Capability::Car))
            .collect();
        let resolver = resolver_for(providers);
        let request = DispatchRequest::new(origin, Capability::Car);

        let matches = resolver.resolve(&request).await.unwrap();

        let distances: Vec<f64> = matches.iter().map(|m| m.distance_km).collect();
        assert_eq!(distances, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[tokio::test]
    async fn test_directory_failure_degrades_to_empty() {
        let resolver = DispatchResolver::new(Arc::new(FailingDirectory), DispatchPolicy::default());
        let request = DispatchRequest::new(requester(), Capability::Car);

        let degraded = assert_ok!(resolver.resolve(&request).await);
        assert!(degraded.is_empty());
        assert!(matches!(
            resolver.try_resolve(&request).await,
            Err(DispatchError::DirectoryUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_capability_mismatch_never_returned() {
        let origin = requester();
        let moto = provider_at(&origin, 1.0, Capability::Motorcycle);
        let both = provider_at(&origin, 3.0, Capability::Both);
        let resolver = resolver_for(vec![moto.clone(), both.clone()]);

        let matches = resolver
            .resolve(&DispatchRequest::new(origin, Capability::Car))
            .await
            .unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].provider_id, both.id);
    }

    #[tokio::test]
    async fn test_repeated_calls_are_deterministic() {
        let origin = requester();
        let providers: Vec<ProviderCandidate> = (0..8)
            .map(|i| provider_at(&origin, 1.0 + (i % 3) as f64, Capability::Car))
            .collect();
        let resolver = resolver_for(providers);
        let request = DispatchRequest::new(origin, Capability::Car);

        let first = resolver.resolve(&request).await.unwrap();
        let second = resolver.resolve(&request).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_results_respect_invariants() {
        let origin = requester();
        let mut providers = Vec::new();
        for (i, km) in [0.5, 3.2, 7.7, 9.9, 10.1, 12.0, 25.0, 4.4, 6.6].iter().enumerate() {
            let mut provider = provider_at(&origin, *km, Capability::Car);
            if i % 4 == 0 {
                provider.availability = Availability::Offline;
            }
            providers.push(provider);
        }
        let resolver = resolver_for(providers);
        let request = DispatchRequest::new(origin, Capability::Car)
            .with_radius(10.0)
            .with_max_fanout(4);

        let matches = resolver.resolve(&request).await.unwrap();

        assert!(matches.len() <= 4);
        assert!(matches.iter().all(|m| m.distance_km <= 10.0));
        assert!(matches
            .windows(2)
            .all(|pair| pair[0].distance_km <= pair[1].distance_km));
    }

    #[tokio::test]
    async fn test_strict_policy_drops_offline_and_unlocated() {
        let origin = requester();
        let mut offline = provider_at(&origin, 1.0, Capability::Car);
        offline.availability = Availability::Offline;
        let mut unlocated = provider_at(&origin, 1.0, Capability::Car);
        unlocated.location = None;
        let available = provider_at(&origin, 2.0, Capability::Car);

        let resolver = DispatchResolver::new(
            Arc::new(InMemoryProviderDirectory::new(vec![
                offline,
                unlocated,
                available.clone(),
            ])),
            DispatchPolicy {
                include_offline: false,
                unlocated_as_zero: false,
                ..DispatchPolicy::default()
            },
        );

        let matches = resolver
            .resolve(&DispatchRequest::new(origin, Capability::Car))
            .await
            .unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].provider_id, available.id);
    }

    #[test]
    fn test_location_helper_is_accurate() {
        let origin = requester();
        let target = location_north_of(&origin, 8.5);
        let distance =
            crate::features::dispatch::services::distance::haversine_km(&origin, &target);
        assert!((distance - 8.5).abs() < 1e-9);
    }
}
