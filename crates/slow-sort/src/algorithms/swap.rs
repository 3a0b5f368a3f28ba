//! Cancellable swap of two list positions

use crate::algorithms::write_pair;
use crate::domain::{Cancellation, Clock, SlowList};
use crate::error::SortError;

/// Exchange the values at `i` and `j`
///
/// Sequence: check, read `i`, check, read `j`, write `j`, check, write `i`,
/// check. Absent cancellation this costs two reads and two writes.
pub async fn swap<T, C>(
    list: &mut SlowList<T, C>,
    cancel: &Cancellation,
    i: usize,
    j: usize,
) -> Result<(), SortError>
where
    T: Copy + Send + Sync,
    C: Clock,
{
    list.checkpoint(cancel)?;
    let left = list.get(i).await;
    list.checkpoint(cancel)?;
    let right = list.get(j).await;
    write_pair(list, cancel, (j, left), (i, right)).await
}
