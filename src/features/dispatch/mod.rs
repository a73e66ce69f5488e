//! Proximity-based dispatch.
//!
//! Given a breakdown location, finds active providers able to handle the
//! vehicle type, ranks them by great-circle distance and keeps the nearest
//! few for notification. The resolver only reads the [`ProviderDirectory`];
//! persisting matches and notifying providers is left to the caller.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/dispatch/preview` | No | Rank providers for a location without side effects |

pub mod directory;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use directory::ProviderDirectory;
pub use error::{DirectoryError, DispatchError};
pub use models::{
    Availability, Capability, DispatchPolicy, DispatchRequest, Location, ProviderCandidate,
};
pub use services::DispatchResolver;
