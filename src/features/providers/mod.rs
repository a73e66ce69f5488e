//! Provider (dépanneur) accounts.
//!
//! Providers register inactive, get approved by an operator, then keep their
//! position and availability up to date from the mobile app. The Postgres
//! [`PgProviderDirectory`] is what dispatch reads to find candidates.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/providers` | No | Register a provider |
//! | GET | `/api/providers/{id}` | No | Get provider details |
//! | DELETE | `/api/providers/{id}` | No | Soft delete a provider |
//! | POST | `/api/providers/{id}/approve` | No | Approve for dispatch |
//! | POST | `/api/providers/{id}/deactivate` | No | Remove from dispatch |
//! | PATCH | `/api/providers/{id}/location` | No | Report GPS position |
//! | PATCH | `/api/providers/{id}/availability` | No | Go online or offline |
//!
//! Open offers for a provider are served by the requests feature at
//! `/api/providers/{id}/offers`.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{PgProviderDirectory, ProviderService};
