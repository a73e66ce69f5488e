//! Breakdown requests and the interventions that follow them.
//!
//! A request is matched against nearby providers as soon as it is created;
//! every provider in the fan-out gets a notification and the first one to
//! accept is assigned. Requests that reached nobody are retried by the
//! [`RedispatchWorker`].
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/requests` | No | Submit a breakdown request |
//! | GET | `/api/requests?client_phone=` | No | A requester's history |
//! | GET | `/api/requests/{id}` | No | Request with its matches |
//! | GET | `/api/requests/ref/{reference}` | No | Lookup by reference number |
//! | POST | `/api/requests/{id}/accept` | No | Provider claims the request |
//! | POST | `/api/requests/{id}/start` | No | Intervention starts |
//! | POST | `/api/requests/{id}/complete` | No | Intervention ends |
//! | POST | `/api/requests/{id}/cancel` | No | Cancel before work starts |
//! | POST | `/api/requests/{id}/redispatch` | No | Run another matching round |
//! | GET | `/api/providers/{id}/offers` | No | Pending requests offered to a provider |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod workers;

pub use services::RequestService;
pub use workers::RedispatchWorker;
