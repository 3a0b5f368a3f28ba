//! Domain Layer
//!
//! This layer contains:
//! - The slow, latency-instrumented list
//! - The cancellation signal threaded through every sort
//! - The injectable clock used for simulated latency
//!
//! RULES:
//! - No sort logic here
//! - The only suspension point is `Clock::sleep`

pub mod cancellation;
pub mod clock;
pub mod slow_list;

pub use crate::error::CancelReason;
pub use cancellation::Cancellation;
pub use clock::{Clock, TokioClock, VirtualClock};
pub use slow_list::{is_sorted, Latency, SlowList};
