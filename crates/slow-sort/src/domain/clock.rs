//! Time sources for simulated latency
//!
//! `TokioClock` is the production clock. Under a paused Tokio runtime
//! (`#[tokio::test(start_paused = true)]`) it auto-advances, which makes
//! every latency in a test exact and instantaneous.
//!
//! `VirtualClock` never suspends at all. It only accumulates the requested
//! delays, so it can drive a list outside of any timer-enabled runtime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

/// Source of "now" and of simulated delays
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current instant as seen by this clock
    fn now(&self) -> Instant;

    /// Suspend for `duration` of this clock's time
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by `tokio::time`
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Deterministic clock that advances only when slept on
#[derive(Debug)]
pub struct VirtualClock {
    origin: Instant,
    elapsed_ns: AtomicU64,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed_ns: AtomicU64::new(0),
        }
    }

    /// Total simulated time slept on this clock
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_ns.load(Ordering::Acquire))
    }

    /// Move the clock forward without a sleep
    pub fn advance(&self, duration: Duration) {
        self.elapsed_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::AcqRel);
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for VirtualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[async_trait]
impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }

    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}
