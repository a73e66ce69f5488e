mod location;
mod matching;
mod provider;

pub use location::Location;
pub use matching::{DispatchPolicy, DispatchRequest, RankedMatch};
pub use provider::{Availability, Capability, ProviderCandidate};
