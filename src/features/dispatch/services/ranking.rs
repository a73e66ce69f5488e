use std::cmp::Ordering;

use crate::features::dispatch::models::{Location, RankedMatch};
use crate::features::dispatch::services::candidate_filter::{EligibleCandidate, Placement};
use crate::features::dispatch::services::distance::{haversine_km, round_km};

/// Distance-rank eligible candidates, keep those inside the radius and cap the fan-out.
///
/// Unlocated candidates sit at 0 km and therefore always pass the radius check.
/// Ties are broken by provider id so results are reproducible.
pub fn rank_candidates(
    candidates: &[EligibleCandidate<'_>],
    origin: &Location,
    radius_km: f64,
    max_fanout: usize,
) -> Vec<RankedMatch> {
    let mut within: Vec<(&EligibleCandidate<'_>, f64)> = candidates
        .iter()
        .map(|candidate| {
            let distance = match candidate.placement {
                Placement::Located(location) => haversine_km(origin, &location),
                Placement::Unlocated => 0.0,
            };
            (candidate, distance)
        })
        .filter(|(_, distance)| *distance <= radius_km)
        .collect();

    within.sort_by(|(a, da), (b, db)| {
        da.partial_cmp(db)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.provider.id.cmp(&b.provider.id))
    });
    within.truncate(max_fanout);

    within
        .into_iter()
        .map(|(candidate, distance)| RankedMatch {
            provider_id: candidate.provider.id,
            // rounding up at the edge must not push a match past the radius
            distance_km: round_km(distance).min(radius_km),
            located: matches!(candidate.placement, Placement::Located(_)),
        })
        .collect()
}
