//! Cooperative cancellation signal
//!
//! A `Cancellation` transitions once, irreversibly, from live to fired. It
//! fires either explicitly through [`Cancellation::cancel`] or implicitly
//! once its deadline has passed. Sorts never create or fire one; they only
//! read it through [`Cancellation::check_at`].
//!
//! Clones share the same explicit signal. A child built with
//! [`Cancellation::child_with_timeout_on`] has a signal of its own: it fires
//! whenever its parent fires, but cancelling the child leaves the parent
//! live.
//!
//! Deadlines are instants of a [`Clock`]. Build them from the same clock the
//! list reads its time from, otherwise a virtual clock drifts away from the
//! deadline.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::domain::clock::{Clock, TokioClock};
use crate::error::{CancelReason, SortError};

#[derive(Clone, Debug)]
pub struct Cancellation {
    signal: Arc<watch::Sender<Option<CancelReason>>>,
    parent: Option<Arc<Cancellation>>,
    deadline: Option<Instant>,
}

impl Cancellation {
    /// A signal that only fires when cancelled explicitly
    pub fn new() -> Self {
        let (signal, _) = watch::channel(None);
        Self {
            signal: Arc::new(signal),
            parent: None,
            deadline: None,
        }
    }

    /// A signal that fires automatically at `deadline`
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            ..Self::new()
        }
    }

    /// A signal that fires automatically `timeout` from now (Tokio time)
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_timeout_on(&TokioClock, timeout)
    }

    /// A signal that fires `timeout` from now as measured by `clock`
    pub fn with_timeout_on<C: Clock + ?Sized>(clock: &C, timeout: Duration) -> Self {
        Self::with_deadline(clock.now() + timeout)
    }

    /// Derive a child that fires when this signal fires, or `timeout` from
    /// now on `clock`, whichever comes first
    pub fn child_with_timeout_on<C: Clock + ?Sized>(&self, clock: &C, timeout: Duration) -> Self {
        let candidate = clock.now() + timeout;
        let deadline = match self.deadline {
            Some(existing) if existing <= candidate => existing,
            _ => candidate,
        };
        Self {
            parent: Some(Arc::new(self.clone())),
            deadline: Some(deadline),
            ..Self::new()
        }
    }

    /// Fire the signal. Only the first call has an effect.
    ///
    /// Children derived from this handle fire too; the parent does not.
    pub fn cancel(&self) {
        let fired = self.signal.send_if_modified(|reason| {
            if reason.is_none() {
                *reason = Some(CancelReason::Explicit);
                true
            } else {
                false
            }
        });
        if fired {
            tracing::debug!("cancellation signal fired");
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Reason the signal has fired as of `now`, if it has
    pub fn fired_at(&self, now: Instant) -> Option<CancelReason> {
        if let Some(reason) = *self.signal.borrow() {
            return Some(reason);
        }
        if let Some(reason) = self.parent.as_ref().and_then(|parent| parent.fired_at(now)) {
            return Some(reason);
        }
        match self.deadline {
            Some(deadline) if now >= deadline => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }

    /// Whether the signal has fired by the current Tokio instant
    pub fn is_cancelled(&self) -> bool {
        self.fired_at(Instant::now()).is_some()
    }

    /// Fail with [`SortError::Cancelled`] if the signal has fired as of `now`
    pub fn check_at(&self, now: Instant) -> Result<(), SortError> {
        match self.fired_at(now) {
            Some(reason) => Err(SortError::cancelled(reason)),
            None => Ok(()),
        }
    }

    /// Resolve once the signal fires, returning why
    ///
    /// The deadline is awaited on Tokio time.
    pub fn cancelled(&self) -> Pin<Box<dyn Future<Output = CancelReason> + Send + '_>> {
        Box::pin(async move {
            let mut receiver = self.signal.subscribe();
            let explicit = async {
                let observed = receiver
                    .wait_for(|reason| reason.is_some())
                    .await
                    .map(|reason| *reason);
                // The sender lives as long as `self`, so the channel cannot close
                match observed {
                    Ok(Some(reason)) => reason,
                    _ => CancelReason::Explicit,
                }
            };
            let inherited = async {
                match &self.parent {
                    Some(parent) => parent.cancelled().await,
                    None => std::future::pending().await,
                }
            };
            let expiry = async {
                match self.deadline {
                    Some(deadline) => {
                        tokio::time::sleep_until(deadline).await;
                        CancelReason::DeadlineExceeded
                    }
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                reason = explicit => reason,
                reason = inherited => reason,
                reason = expiry => reason,
            }
        })
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::VirtualClock;

    #[tokio::test(start_paused = true)]
    async fn test_new_signal_is_live() {
        let cancel = Cancellation::new();
        assert!(!cancel.is_cancelled());
        assert!(cancel.check_at(Instant::now()).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_cancel_is_sticky_and_shared_by_clones() {
        let cancel = Cancellation::new();
        let clone = cancel.clone();

        clone.cancel();
        clone.cancel();

        assert_eq!(
            cancel.check_at(Instant::now()),
            Err(SortError::cancelled(CancelReason::Explicit))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_fires_when_reached() {
        let cancel = Cancellation::with_timeout(Duration::from_millis(500));
        let start = Instant::now();

        assert!(cancel.check_at(start + Duration::from_millis(499)).is_ok());
        assert_eq!(
            cancel.fired_at(start + Duration::from_millis(500)),
            Some(CancelReason::DeadlineExceeded)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_reason_wins_over_deadline() {
        let cancel = Cancellation::with_timeout(Duration::from_millis(10));
        cancel.cancel();

        let later = Instant::now() + Duration::from_secs(1);
        assert_eq!(cancel.fired_at(later), Some(CancelReason::Explicit));
    }

    #[tokio::test(start_paused = true)]
    async fn test_child_keeps_earlier_deadline_and_follows_parent() {
        let parent = Cancellation::with_timeout(Duration::from_millis(100));
        let child = parent.child_with_timeout_on(&TokioClock, Duration::from_secs(10));
        assert_eq!(child.deadline(), parent.deadline());

        let tighter = parent.child_with_timeout_on(&TokioClock, Duration::from_millis(20));
        assert!(tighter.deadline() < parent.deadline());

        parent.cancel();
        assert_eq!(tighter.fired_at(Instant::now()), Some(CancelReason::Explicit));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelling_child_leaves_parent_live() {
        let parent = Cancellation::new();
        let first = parent.child_with_timeout_on(&TokioClock, Duration::from_secs(1));
        let second = parent.child_with_timeout_on(&TokioClock, Duration::from_secs(1));

        first.cancel();

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert!(!parent.is_cancelled());
    }

    #[tokio::test]
    async fn test_deadline_follows_the_given_clock() {
        let clock = VirtualClock::new();
        clock.advance(Duration::from_secs(3600));

        let cancel = Cancellation::with_timeout_on(&clock, Duration::from_millis(50));

        assert!(cancel.check_at(clock.now()).is_ok());
        clock.advance(Duration::from_millis(50));
        assert!(cancel.check_at(clock.now()).unwrap_err().is_deadline_exceeded());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_future_resolves_when_parent_fires() {
        let parent = Cancellation::new();
        let child = parent.child_with_timeout_on(&TokioClock, Duration::from_secs(60));
        let trigger = parent.clone();

        let waiter = tokio::spawn(async move { child.cancelled().await });
        tokio::time::sleep(Duration::from_millis(5)).await;
        trigger.cancel();

        assert_eq!(waiter.await.unwrap(), CancelReason::Explicit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_future_resolves_on_deadline() {
        let cancel = Cancellation::with_timeout(Duration::from_millis(250));
        let start = Instant::now();

        let reason = cancel.cancelled().await;

        assert_eq!(reason, CancelReason::DeadlineExceeded);
        assert_eq!(Instant::now() - start, Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_future_resolves_on_explicit_cancel() {
        let cancel = Cancellation::new();
        let trigger = cancel.clone();

        let waiter = tokio::spawn(async move { cancel.cancelled().await });
        tokio::time::sleep(Duration::from_millis(5)).await;
        trigger.cancel();

        assert_eq!(waiter.await.unwrap(), CancelReason::Explicit);
    }
}
