//! Property tests for the permutation and sortedness invariants
//!
//! These run on a `VirtualClock`, which never suspends, so each case is
//! driven on a bare current-thread runtime.

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use slow_sort::{
    bubble_sort, quick_sort, random_sort_with_rng, Cancellation, Clock, Latency, SlowList,
    VirtualClock,
};

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
        .block_on(future)
}

fn sorted_copy(values: &[i64]) -> Vec<i64> {
    let mut sorted = values.to_vec();
    sorted.sort();
    sorted
}

proptest! {
    #[test]
    fn bubble_sort_sorts(values in prop::collection::vec(-50i64..50, 0..40)) {
        let mut list = SlowList::with_clock(values.clone(), VirtualClock::new())
            .with_latency(Latency::ZERO);
        block_on(bubble_sort(&mut list, &Cancellation::new())).unwrap();
        prop_assert_eq!(list.into_inner(), sorted_copy(&values));
    }

    #[test]
    fn quick_sort_sorts(values in prop::collection::vec(-50i64..50, 0..80)) {
        let mut list = SlowList::with_clock(values.clone(), VirtualClock::new())
            .with_latency(Latency::ZERO);
        block_on(quick_sort(&mut list, &Cancellation::new())).unwrap();
        prop_assert_eq!(list.into_inner(), sorted_copy(&values));
    }

    #[test]
    fn random_sort_sorts_short_lists(values in prop::collection::vec(0i64..5, 0..6), seed: u64) {
        let mut list = SlowList::with_clock(values.clone(), VirtualClock::new())
            .with_latency(Latency::ZERO);
        let mut rng = StdRng::seed_from_u64(seed);
        block_on(random_sort_with_rng(&mut list, &Cancellation::new(), &mut rng)).unwrap();
        prop_assert_eq!(list.into_inner(), sorted_copy(&values));
    }

    #[test]
    fn cancelled_sorts_only_permute(
        values in prop::collection::vec(-20i64..20, 0..25),
        deadline_ms in 0u64..1_500,
        algorithm in 0usize..3,
        seed: u64,
    ) {
        let clock = Arc::new(VirtualClock::new());
        let cancel = Cancellation::with_deadline(clock.now() + Duration::from_millis(deadline_ms));
        let mut list = SlowList::with_clock(values.clone(), Arc::clone(&clock));

        let result = block_on(async {
            match algorithm {
                0 => {
                    let mut rng = StdRng::seed_from_u64(seed);
                    random_sort_with_rng(&mut list, &cancel, &mut rng).await
                }
                1 => bubble_sort(&mut list, &cancel).await,
                _ => quick_sort(&mut list, &cancel).await,
            }
        });

        if result.is_ok() {
            prop_assert!(list.is_sorted());
        } else {
            // Worst case: the unchecked second read of a swap plus both writes
            prop_assert!(clock.elapsed() <= Duration::from_millis(deadline_ms + 25));
        }
        prop_assert_eq!(sorted_copy(list.as_slice()), sorted_copy(&values));
    }
}
