// ABOUTME: Token bucket built on a bounded permit channel and a refill task.
// ABOUTME: Consumers block on permit acquisition, so timing jitter never accumulates.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{Notify, mpsc};
use tokio::time::MissedTickBehavior;

use crate::error::GateError;

/// A bounded bucket of permits refilled at a fixed rate.
///
/// The bucket starts full with `burst` permits, all minted at the same
/// instant. An independent refill task mints one permit per
/// `refill_period`; a permit minted while the bucket is full is
/// discarded, so the bucket never holds more than `burst` at once.
/// Each permit carries its mint time, which consumers can use as the
/// admission timestamp.
///
/// Acquiring blocks until a permit is available rather than sleeping a
/// computed duration, so scheduling jitter does not accumulate across
/// consecutive acquisitions.
pub struct TokenBucket {
    tokens: mpsc::Receiver<SystemTime>,
    stop: Arc<Notify>,
}

impl TokenBucket {
    /// Create a bucket holding up to `burst` permits, starting full.
    ///
    /// Returns `Err(GateError::Config)` if `burst` is zero or
    /// `refill_period` is zero.
    pub fn new(burst: usize, refill_period: Duration) -> Result<Self, GateError> {
        if burst == 0 {
            return Err(GateError::Config("burst must be at least 1".into()));
        }
        if refill_period.is_zero() {
            return Err(GateError::Config("refill period must be positive".into()));
        }

        let (token_tx, tokens) = mpsc::channel(burst);

        // Pre-fill the burst allowance. All initial permits share one
        // mint time: they represent work admitted "immediately".
        let minted = SystemTime::now();
        for _ in 0..burst {
            // Cannot fail: the channel was just created with capacity
            // `burst` and nothing else holds the sender.
            let _ = token_tx.try_send(minted);
        }

        let stop = Arc::new(Notify::new());
        let stop_signal = stop.clone();

        tokio::spawn(async move {
            let start = tokio::time::Instant::now();
            let mut refill = tokio::time::interval_at(start + refill_period, refill_period);
            // A full bucket drops fresh permits instead of queueing a
            // backlog of catch-up mints.
            refill.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    () = stop_signal.notified() => break,
                    _ = refill.tick() => {
                        match token_tx.try_send(SystemTime::now()) {
                            Ok(()) => {}
                            // Bucket full: discard this permit.
                            Err(TrySendError::Full(_)) => {}
                            // Bucket dropped: nobody left to admit.
                            Err(TrySendError::Closed(_)) => break,
                        }
                    }
                }
            }
        });

        Ok(Self { tokens, stop })
    }

    /// Take one permit, waiting until one is available.
    ///
    /// Returns the permit's mint time. Returns
    /// `Err(GateError::Stopped)` if the bucket was stopped and every
    /// remaining permit has already been claimed.
    pub async fn acquire(&mut self) -> Result<SystemTime, GateError> {
        self.tokens.recv().await.ok_or(GateError::Stopped)
    }

    /// Take one permit if one is immediately available.
    ///
    /// Never waits. Returns `None` when the bucket is currently empty.
    pub fn try_acquire(&mut self) -> Option<SystemTime> {
        self.tokens.try_recv().ok()
    }

    /// Take one permit, racing acquisition against a cancel future.
    ///
    /// Returns `Err(GateError::Cancelled)` if `cancel` completes
    /// before a permit becomes available.
    pub async fn acquire_with_cancel<F>(&mut self, cancel: F) -> Result<SystemTime, GateError>
    where
        F: std::future::Future<Output = ()>,
    {
        tokio::pin!(cancel);

        tokio::select! {
            biased;
            () = &mut cancel => Err(GateError::Cancelled),
            token = self.tokens.recv() => token.ok_or(GateError::Stopped),
        }
    }

    /// Stop the refill task.
    ///
    /// Permits already minted remain claimable; once they are drained,
    /// [`acquire`](Self::acquire) returns `Err(GateError::Stopped)`.
    /// Stopping is idempotent. Dropping the bucket also terminates the
    /// refill task at its next mint attempt.
    pub fn stop(&self) {
        self.stop.notify_one();
    }
}
