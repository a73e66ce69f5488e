use crate::features::dispatch::models::{
    Availability, Capability, DispatchPolicy, Location, ProviderCandidate,
};

/// Where a structurally eligible candidate sits for ranking purposes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Located(Location),
    /// No recorded position, ranked at the 0 km sentinel
    Unlocated,
}

/// A candidate that passed the structural filter
#[derive(Debug, Clone, PartialEq)]
pub struct EligibleCandidate<'a> {
    pub provider: &'a ProviderCandidate,
    pub placement: Placement,
}

fn availability_allowed(availability: Availability, policy: &DispatchPolicy) -> bool {
    match availability {
        Availability::Available => true,
        Availability::Offline => policy.include_offline,
        Availability::Busy => false,
    }
}

/// Decide where (and whether) a single provider can be ranked
pub fn placement_for(
    provider: &ProviderCandidate,
    required: Capability,
    policy: &DispatchPolicy,
) -> Option<Placement> {
    if !provider.active
        || !availability_allowed(provider.availability, policy)
        || !provider.capability.serves(required)
    {
        return None;
    }

    match provider.location {
        Some(location) if location.is_valid() => Some(Placement::Located(location)),
        // a recorded but corrupt position is a hard exclusion
        Some(_) => None,
        None if policy.unlocated_as_zero => Some(Placement::Unlocated),
        None => None,
    }
}

/// Reduce a directory snapshot to structurally eligible candidates; order is not meaningful
pub fn filter_candidates<'a>(
    providers: &'a [ProviderCandidate],
    required: Capability,
    policy: &DispatchPolicy,
) -> Vec<EligibleCandidate<'a>> {
    let eligible: Vec<EligibleCandidate<'a>> = providers
        .iter()
        .filter_map(|provider| {
            placement_for(provider, required, policy)
                .map(|placement| EligibleCandidate { provider, placement })
        })
        .collect();

    tracing::debug!(
        "Candidate filter kept {}/{} providers for capability {}",
        eligible.len(),
        providers.len(),
        required
    );

    eligible
}
