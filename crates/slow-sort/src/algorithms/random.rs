//! Random-swap sort
//!
//! Guess and check: while the list is not sorted, swap a uniformly random
//! adjacent pair (wrapping from the last index to the first) and look again.
//! Swaps that make the list less sorted are kept. The only bound on the
//! number of rounds is the cancellation signal.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::algorithms::swap;
use crate::domain::{Cancellation, Clock, SlowList};
use crate::error::SortError;

/// Random-swap sort with an entropy-seeded generator
pub async fn random_sort<T, C>(list: &mut SlowList<T, C>, cancel: &Cancellation) -> Result<(), SortError>
where
    T: Ord + Copy + Send + Sync,
    C: Clock,
{
    let mut rng = StdRng::from_entropy();
    random_sort_with_rng(list, cancel, &mut rng).await
}

/// Random-swap sort drawing indices from `rng`
///
/// The sortedness check looks at the backing values directly, so an
/// already sorted list returns without a single access.
pub async fn random_sort_with_rng<T, C, R>(
    list: &mut SlowList<T, C>,
    cancel: &Cancellation,
    rng: &mut R,
) -> Result<(), SortError>
where
    T: Ord + Copy + Send + Sync,
    C: Clock,
    R: Rng + Send,
{
    let mut swaps = 0u64;
    while !list.is_sorted() {
        let first = rng.gen_range(0..list.len());
        let second = (first + 1) % list.len();
        swap(list, cancel, first, second).await?;
        swaps += 1;
    }
    trace!(swaps, "random sort settled");
    Ok(())
}
