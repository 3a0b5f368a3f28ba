//! # Slow Sort
//!
//! Sort algorithms running against a deliberately slow, in-place mutable list.
//!
//! Every read through the list costs a fixed simulated latency and every write
//! costs twice that. The interesting behaviour is how the access pattern of
//! each algorithm interacts with that cost, and how each one honours a
//! cooperative cancellation signal checked after every access.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure types, no algorithm logic
//!   - `SlowList`: Latency-instrumented sequence
//!   - `Cancellation`: Shared cancel signal with optional deadline
//!   - `Clock`: Injectable time source (`TokioClock`, `VirtualClock`)
//!   - `Latency`: Read/write cost profile
//!
//! - **Algorithms** (`algorithms/`): The three sorts and the cancellable swap
//!   - `random_sort`: Random adjacent swaps until sorted
//!   - `bubble_sort`: Adjacent comparisons with early exit
//!   - `quick_sort`: Two-pointer partition over an explicit range stack
//!
//! - **Ports Layer** (`ports/`): `SortApi` driving port, `SortMethod`
//!
//! - **Service Layer** (`service/`): `SortService` implements `SortApi`
//!
//! ## Invariants
//!
//! - **Permutation**: a sort only moves values around, cancelled or not
//! - **Sortedness**: `Ok(())` means the list is ascending
//! - **Bounded overrun**: a fired signal is observed after at most one
//!   further store access (two when it lands between paired writes)
//!
//! ## Usage Example
//!
//! ```ignore
//! use slow_sort::{quick_sort, Cancellation, SlowList};
//! use std::time::Duration;
//!
//! let mut list = SlowList::new(vec![3, 1, 2]);
//! let cancel = Cancellation::with_timeout(Duration::from_secs(2));
//! quick_sort(&mut list, &cancel).await?;
//! assert_eq!(list.as_slice(), &[1, 2, 3]);
//! ```

pub mod algorithms;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use algorithms::{bubble_sort, quick_sort, random_sort, random_sort_with_rng, swap};
pub use domain::{
    is_sorted, CancelReason, Cancellation, Clock, Latency, SlowList, TokioClock, VirtualClock,
};
pub use error::SortError;
pub use metrics::{MetricsSnapshot, SortMetrics};
pub use ports::{ParseSortMethodError, SortApi, SortMethod, SortOutcome};
pub use service::SortService;
