//! Inbound Ports (Driving Ports)
//!
//! The API that the boundary layer uses to sort a decoded list.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::Cancellation;
use crate::error::SortError;

/// Which algorithm a sort request runs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMethod {
    /// Random adjacent swaps until sorted
    Random,
    /// Bubble sort with early exit
    Bubble,
    /// Two-pointer quicksort
    #[default]
    Quick,
}

impl SortMethod {
    pub const ALL: [SortMethod; 3] = [SortMethod::Random, SortMethod::Bubble, SortMethod::Quick];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMethod::Random => "random",
            SortMethod::Bubble => "bubble",
            SortMethod::Quick => "quick",
        }
    }
}

impl fmt::Display for SortMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort method: {0:?} (expected random, bubble or quick)")]
pub struct ParseSortMethodError(pub String);

impl FromStr for SortMethod {
    type Err = ParseSortMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(SortMethod::Random),
            "bubble" => Ok(SortMethod::Bubble),
            "quick" | "quicksort" => Ok(SortMethod::Quick),
            other => Err(ParseSortMethodError(other.to_string())),
        }
    }
}

/// Result of a successful sort through [`SortApi`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOutcome {
    /// The values, ascending
    pub values: Vec<i64>,
    /// Algorithm that produced them
    pub method: SortMethod,
    /// Reads issued against the slow list
    pub reads: u64,
    /// Writes issued against the slow list
    pub writes: u64,
    /// Simulated latency spent in those accesses
    pub simulated_latency: Duration,
}

/// Primary sort API (Driving Port)
#[async_trait]
pub trait SortApi: Send + Sync {
    /// Algorithm used when the caller does not name one
    fn default_method(&self) -> SortMethod;

    /// Signal for one request: fires with `parent`, or once `timeout` has
    /// passed on the clock this sorter's lists run on
    fn request_cancellation(&self, parent: &Cancellation, timeout: Duration) -> Cancellation;

    /// Sort `values` with `method`, honouring `cancel` at every access
    async fn sort_with(
        &self,
        method: SortMethod,
        values: Vec<i64>,
        cancel: &Cancellation,
    ) -> Result<SortOutcome, SortError>;

    /// Sort `values` with the default method
    async fn sort(&self, values: Vec<i64>, cancel: &Cancellation) -> Result<SortOutcome, SortError> {
        self.sort_with(self.default_method(), values, cancel).await
    }
}
