//! Sort algorithms over a [`SlowList`](crate::domain::SlowList)
//!
//! Every algorithm reads and writes only through the list, and runs
//! [`SlowList::checkpoint`](crate::domain::SlowList::checkpoint) after each
//! access. On a fired signal they return immediately; nothing is rolled back.
//!
//! State per call: `Running -> {Sorted, Cancelled}`. Both end states are
//! terminal.

pub mod bubble;
pub mod quick;
pub mod random;
pub mod swap;

pub use bubble::bubble_sort;
pub use quick::quick_sort;
pub use random::{random_sort, random_sort_with_rng};
pub use swap::swap;

use crate::domain::{Cancellation, Clock, SlowList};
use crate::error::SortError;

/// Read `index` and check for cancellation
pub(crate) async fn read_checked<T, C>(
    list: &SlowList<T, C>,
    cancel: &Cancellation,
    index: usize,
) -> Result<T, SortError>
where
    T: Copy + Send + Sync,
    C: Clock,
{
    let value = list.get(index).await;
    list.checkpoint(cancel)?;
    Ok(value)
}

/// Two dependent writes that are never left half-applied
///
/// The check between the writes still happens, but a fired signal is only
/// reported once the second write has landed, so the list stays a
/// permutation of its input.
pub(crate) async fn write_pair<T, C>(
    list: &mut SlowList<T, C>,
    cancel: &Cancellation,
    (first, first_value): (usize, T),
    (second, second_value): (usize, T),
) -> Result<(), SortError>
where
    T: Copy + Send + Sync,
    C: Clock,
{
    list.set(first, first_value).await;
    let between = list.checkpoint(cancel);
    list.set(second, second_value).await;
    between?;
    list.checkpoint(cancel)
}

impl crate::ports::SortMethod {
    /// Run this algorithm over `list`
    pub async fn run<T, C>(self, list: &mut SlowList<T, C>, cancel: &Cancellation) -> Result<(), SortError>
    where
        T: Ord + Copy + Send + Sync,
        C: Clock,
    {
        use crate::ports::SortMethod;

        match self {
            SortMethod::Random => random_sort(list, cancel).await,
            SortMethod::Bubble => bubble_sort(list, cancel).await,
            SortMethod::Quick => quick_sort(list, cancel).await,
        }
    }
}
