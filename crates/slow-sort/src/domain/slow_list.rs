//! Latency-instrumented list
//!
//! Every `get` and `set` suspends on the list's clock before it completes.
//! The read/write asymmetry (5 ms against 10 ms by default) favours
//! algorithms that read a lot and write little.
//!
//! Indices are never validated: an out-of-range index is a caller bug and
//! panics like slice indexing does.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::cancellation::Cancellation;
use crate::domain::clock::{Clock, TokioClock};
use crate::error::SortError;
use crate::metrics::SortMetrics;

/// Simulated cost of one store access
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Latency {
    pub read: Duration,
    pub write: Duration,
}

impl Latency {
    /// No simulated cost at all
    pub const ZERO: Latency = Latency {
        read: Duration::ZERO,
        write: Duration::ZERO,
    };

    pub const fn new(read: Duration, write: Duration) -> Self {
        Self { read, write }
    }

    /// Cost of one full swap: two reads and two writes
    pub fn swap_cost(&self) -> Duration {
        2 * self.read + 2 * self.write
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            read: Duration::from_millis(5),
            write: Duration::from_millis(10),
        }
    }
}

/// Ascending order check on a plain slice
pub fn is_sorted<T: Ord>(values: &[T]) -> bool {
    values.windows(2).all(|pair| pair[0] <= pair[1])
}

/// A fixed-length sequence whose accesses are slow
///
/// The list is owned by exactly one sort at a time; `set` takes `&mut self`
/// so the borrow checker enforces that.
#[derive(Debug)]
pub struct SlowList<T, C = TokioClock> {
    values: Vec<T>,
    latency: Latency,
    clock: C,
    metrics: Option<Arc<SortMetrics>>,
}

impl<T> SlowList<T, TokioClock> {
    /// Wrap `values` with the default latency on Tokio time
    pub fn new(values: Vec<T>) -> Self {
        Self::with_clock(values, TokioClock)
    }
}

impl<T, C> SlowList<T, C> {
    pub fn with_clock(values: Vec<T>, clock: C) -> Self {
        Self {
            values,
            latency: Latency::default(),
            clock,
            metrics: None,
        }
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    /// Record every access into `metrics`
    pub fn with_metrics(mut self, metrics: Arc<SortMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Direct view of the backing values, without latency
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn into_inner(self) -> Vec<T> {
        self.values
    }
}

impl<T: Ord, C> SlowList<T, C> {
    /// Sortedness of the backing values, without latency
    pub fn is_sorted(&self) -> bool {
        is_sorted(&self.values)
    }
}

impl<T, C> SlowList<T, C>
where
    T: Copy + Send + Sync,
    C: Clock,
{
    /// Read the value at `index` after one read latency
    pub async fn get(&self, index: usize) -> T {
        self.clock.sleep(self.latency.read).await;
        if let Some(metrics) = &self.metrics {
            metrics.record_read(self.latency.read);
        }
        self.values[index]
    }

    /// Write `value` at `index`; the write lands after one write latency
    pub async fn set(&mut self, index: usize, value: T) {
        self.clock.sleep(self.latency.write).await;
        if let Some(metrics) = &self.metrics {
            metrics.record_write(self.latency.write);
        }
        self.values[index] = value;
    }

    /// The single cancellation check every algorithm runs after an access
    pub fn checkpoint(&self, cancel: &Cancellation) -> Result<(), SortError> {
        cancel.check_at(self.clock.now())
    }
}

impl<T> From<Vec<T>> for SlowList<T, TokioClock> {
    fn from(values: Vec<T>) -> Self {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::VirtualClock;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_get_takes_one_read_latency() {
        let list = SlowList::new(vec![12]);
        let start = Instant::now();

        assert_eq!(list.get(0).await, 12);
        assert_eq!(start.elapsed(), Duration::from_millis(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_takes_one_write_latency() {
        let mut list = SlowList::new(vec![0]);
        let start = Instant::now();

        list.set(0, 49).await;

        assert_eq!(list.as_slice(), &[49]);
        assert_eq!(start.elapsed(), Duration::from_millis(10));
    }

    #[tokio::test]
    async fn test_virtual_clock_counts_latency_without_sleeping() {
        let mut list = SlowList::with_clock(vec![1, 2], VirtualClock::new());

        let first = list.get(0).await;
        list.set(1, first).await;

        assert_eq!(list.as_slice(), &[1, 1]);
        assert_eq!(list.clock().elapsed(), Duration::from_millis(15));
    }

    #[tokio::test]
    async fn test_custom_latency_is_applied() {
        let latency = Latency::new(Duration::from_millis(1), Duration::from_millis(3));
        let mut list = SlowList::with_clock(vec![5], VirtualClock::new()).with_latency(latency);

        list.get(0).await;
        list.set(0, 6).await;

        assert_eq!(list.clock().elapsed(), Duration::from_millis(4));
        assert_eq!(latency.swap_cost(), Duration::from_millis(8));
    }

    #[tokio::test]
    async fn test_metrics_observe_accesses() {
        let metrics = Arc::new(SortMetrics::new());
        let mut list =
            SlowList::with_clock(vec![3, 4], VirtualClock::new()).with_metrics(Arc::clone(&metrics));

        list.get(0).await;
        list.get(1).await;
        list.set(0, 4).await;

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.reads, 2);
        assert_eq!(snapshot.writes, 1);
        assert_eq!(snapshot.simulated_latency_ms, 20);
    }

    #[tokio::test]
    async fn test_checkpoint_uses_list_clock() {
        let clock = Arc::new(VirtualClock::new());
        let cancel = Cancellation::with_deadline(clock.now() + Duration::from_millis(10));
        let list = SlowList::with_clock(vec![1, 2, 3], Arc::clone(&clock));

        list.get(0).await;
        assert!(list.checkpoint(&cancel).is_ok());

        list.get(1).await;
        assert!(list.checkpoint(&cancel).unwrap_err().is_deadline_exceeded());
    }

    #[test]
    fn test_is_sorted_helper() {
        assert!(is_sorted::<i64>(&[]));
        assert!(is_sorted(&[1]));
        assert!(is_sorted(&[1, 1, 2]));
        assert!(!is_sorted(&[2, 1]));
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_get_panics() {
        let list = SlowList::with_clock(vec![1], VirtualClock::new()).with_latency(Latency::ZERO);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        runtime.block_on(list.get(3));
    }
}
