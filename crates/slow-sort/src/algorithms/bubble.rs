//! Bubble sort with early exit
//!
//! Each pass walks the unsorted prefix comparing neighbours, and exchanges
//! them when the left one is larger. A pass without an exchange ends the
//! sort, which is what makes nearly sorted input cheap: one misplaced
//! element settles within a pass or two.

use crate::algorithms::{read_checked, write_pair};
use crate::domain::{Cancellation, Clock, SlowList};
use crate::error::SortError;

pub async fn bubble_sort<T, C>(list: &mut SlowList<T, C>, cancel: &Cancellation) -> Result<(), SortError>
where
    T: Ord + Copy + Send + Sync,
    C: Clock,
{
    let len = list.len();
    for pass in 0..len {
        let mut permuted = false;
        for j in 0..len - pass - 1 {
            let value = read_checked(list, cancel, j).await?;
            let next = read_checked(list, cancel, j + 1).await?;
            if value > next {
                permuted = true;
                write_pair(list, cancel, (j, next), (j + 1, value)).await?;
            }
        }
        if !permuted {
            break;
        }
    }
    Ok(())
}
