use thiserror::Error;

/// Errors surfaced by the dispatch resolver
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Latitude/longitude missing, non-finite or out of range
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Invalid search radius: {0} km")]
    InvalidRadius(f64),

    /// The provider directory could not be read
    #[error("Provider directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

/// Failure reading the provider directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}

impl From<DirectoryError> for DispatchError {
    fn from(err: DirectoryError) -> Self {
        DispatchError::DirectoryUnavailable(err.to_string())
    }
}
