//! # Sort Service
//!
//! HTTP boundary in front of the slow-sort core.
//!
//! ## Endpoints
//!
//! - `POST /`: body is a JSON array of integers, response is the same values
//!   ascending. A body that does not decode yields 500 with no body; a sort
//!   that is cancelled yields 500 with `failed to sort numbers: <reason>`.
//! - `GET /health`: liveness probe
//! - `GET /metrics`: cumulative access and run counters
//!
//! ## Cancellation
//!
//! Each request runs under its own `Cancellation`, bounded by
//! `ServiceConfig::request_timeout`. If the client goes away, axum drops the
//! handler future and the request scope fires the signal on drop.

pub mod config;
pub mod error;
pub mod server;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use server::{build_router, AppState, SortServer};
