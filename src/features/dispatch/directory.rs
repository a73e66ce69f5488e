use async_trait::async_trait;

use crate::features::dispatch::error::DirectoryError;
use crate::features::dispatch::models::{Capability, ProviderCandidate};

/// Read access to current provider records.
///
/// Implementations return active providers whose capability matches `capability`
/// or is `both`, at most `limit` of them. The resolver treats the returned slice
/// as an immutable snapshot and never re-queries during a lookup, so a spatial
/// index can replace the linear scan behind this trait without touching callers.
#[async_trait]
pub trait ProviderDirectory: Send + Sync {
    async fn list_eligible_providers(
        &self,
        capability: Capability,
        limit: i64,
    ) -> Result<Vec<ProviderCandidate>, DirectoryError>;
}
