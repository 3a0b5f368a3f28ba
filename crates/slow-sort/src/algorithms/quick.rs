//! Quicksort with a two-pointer partition
//!
//! Pending ranges live on an explicit stack instead of the call stack, so
//! deep partitions cannot exhaust it. The low half of each split is popped
//! first, matching the order of the recursive formulation.

use tracing::trace;

use crate::algorithms::{read_checked, write_pair};
use crate::domain::{Cancellation, Clock, SlowList};
use crate::error::SortError;

pub async fn quick_sort<T, C>(list: &mut SlowList<T, C>, cancel: &Cancellation) -> Result<(), SortError>
where
    T: Ord + Copy + Send + Sync,
    C: Clock,
{
    if list.len() < 2 {
        return Ok(());
    }

    let mut pending = vec![(0, list.len() - 1)];
    while let Some((low, high)) = pending.pop() {
        if low >= high {
            continue;
        }
        let split = partition(list, cancel, low, high).await?;
        trace!(low, high, split, "partitioned range");
        pending.push((split + 1, high));
        pending.push((low, split));
    }
    Ok(())
}

/// Partition `[low, high]` around the value at `low`
///
/// Returns a split point `s` with `low <= s < high` such that every value in
/// `[low, s]` is at most every value in `[s + 1, high]`.
async fn partition<T, C>(
    list: &mut SlowList<T, C>,
    cancel: &Cancellation,
    low: usize,
    high: usize,
) -> Result<usize, SortError>
where
    T: Ord + Copy + Send + Sync,
    C: Clock,
{
    let pivot = read_checked(list, cancel, low).await?;
    let (mut i, mut j) = (low, high);
    loop {
        let mut left = read_checked(list, cancel, i).await?;
        let mut right = read_checked(list, cancel, j).await?;
        while left < pivot {
            i += 1;
            left = read_checked(list, cancel, i).await?;
        }
        while right > pivot {
            j -= 1;
            right = read_checked(list, cancel, j).await?;
        }
        if i >= j {
            return Ok(j);
        }
        if left == right {
            // Both equal the pivot: exchanging them would not move either pointer
            j -= 1;
            continue;
        }
        write_pair(list, cancel, (i, right), (j, left)).await?;
    }
}
