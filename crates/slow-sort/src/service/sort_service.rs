//! Sort Service
//!
//! Builds a slow list for each request, runs the chosen algorithm over it and
//! reports what the run cost.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::{Cancellation, Clock, Latency, SlowList, TokioClock};
use crate::error::SortError;
use crate::metrics::SortMetrics;
use crate::ports::{SortApi, SortMethod, SortOutcome};

/// Sort service implementation
///
/// Implements the `SortApi` port. Each run gets its own list and its own
/// per-run counters, which are folded into the shared metrics afterwards.
pub struct SortService<C = TokioClock> {
    default_method: SortMethod,
    latency: Latency,
    clock: C,
    metrics: Arc<SortMetrics>,
}

impl SortService<TokioClock> {
    /// Create a service on Tokio time with the default latency
    pub fn new(default_method: SortMethod) -> Self {
        Self::with_clock(default_method, TokioClock)
    }
}

impl<C: Clock + Clone> SortService<C> {
    pub fn with_clock(default_method: SortMethod, clock: C) -> Self {
        Self {
            default_method,
            latency: Latency::default(),
            clock,
            metrics: Arc::new(SortMetrics::new()),
        }
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn metrics(&self) -> Arc<SortMetrics> {
        Arc::clone(&self.metrics)
    }
}

#[async_trait]
impl<C: Clock + Clone + 'static> SortApi for SortService<C> {
    fn default_method(&self) -> SortMethod {
        self.default_method
    }

    fn request_cancellation(&self, parent: &Cancellation, timeout: Duration) -> Cancellation {
        parent.child_with_timeout_on(&self.clock, timeout)
    }

    async fn sort_with(
        &self,
        method: SortMethod,
        values: Vec<i64>,
        cancel: &Cancellation,
    ) -> Result<SortOutcome, SortError> {
        let run = Arc::new(SortMetrics::new());
        let mut list = SlowList::with_clock(values, self.clock.clone())
            .with_latency(self.latency)
            .with_metrics(Arc::clone(&run));

        debug!(method = %method, len = list.len(), "sort started");
        let result = method.run(&mut list, cancel).await;
        run.record_run(result.is_ok());
        self.metrics.absorb(&run);

        let snapshot = run.snapshot();
        let simulated_latency = run.simulated_latency();
        match result {
            Ok(()) => {
                info!(
                    method = %method,
                    len = list.len(),
                    reads = snapshot.reads,
                    writes = snapshot.writes,
                    simulated_ms = snapshot.simulated_latency_ms,
                    "sort completed"
                );
                Ok(SortOutcome {
                    values: list.into_inner(),
                    method,
                    reads: snapshot.reads,
                    writes: snapshot.writes,
                    simulated_latency,
                })
            }
            Err(e) => {
                warn!(
                    method = %method,
                    len = list.len(),
                    reads = snapshot.reads,
                    writes = snapshot.writes,
                    simulated_ms = snapshot.simulated_latency_ms,
                    error = %e,
                    "sort cancelled"
                );
                Err(e)
            }
        }
    }
}
