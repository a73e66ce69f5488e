pub mod provider_directory;
pub mod provider_service;

pub use provider_directory::PgProviderDirectory;
pub use provider_service::ProviderService;
