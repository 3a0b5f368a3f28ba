//! Ports Layer
//!
//! Defines the driving port used by the request-handling boundary.

pub mod inbound;

pub use inbound::{ParseSortMethodError, SortApi, SortMethod, SortOutcome};
