// ABOUTME: Stoppable recurring ticker and the minor/major periodic driver.
// ABOUTME: Ticks are generated by a spawned timer task and delivered over a channel.

use std::sync::Arc;
use std::time::Duration;

use futures::Stream;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{Notify, mpsc};
use tokio::time::MissedTickBehavior;

use crate::error::TimerError;

/// Label for one tick of a periodic run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    /// The routine action performed on most ticks.
    Minor,
    /// The action performed every N-th tick.
    Major,
}

impl std::fmt::Display for TickKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TickKind::Minor => write!(f, "minor"),
            TickKind::Major => write!(f, "major"),
        }
    }
}

/// One tick of a periodic run. Displays as `"minor"` or `"major"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// 1-based position of this tick in the run.
    pub seq: u64,
    /// Whether this tick carried the minor or the major action.
    pub kind: TickKind,
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// A recurring timer firing every fixed period until stopped.
///
/// The first tick arrives one full period after construction. A slow
/// receiver causes ticks to be skipped rather than queued without
/// bound; each delivered tick carries the sequence number the source
/// assigned when it fired.
pub struct Ticker {
    ticks: mpsc::Receiver<u64>,
    stop: Arc<Notify>,
}

impl Ticker {
    /// Start a ticker with the given period.
    ///
    /// Returns `Err(TimerError::Config)` if `period` is zero.
    pub fn new(period: Duration) -> Result<Self, TimerError> {
        if period.is_zero() {
            return Err(TimerError::Config("ticker period must be positive".into()));
        }

        // Capacity one: an unread tick is replaced by silence, not by
        // an ever-growing backlog.
        let (tick_tx, ticks) = mpsc::channel(1);
        let stop = Arc::new(Notify::new());
        let stop_signal = stop.clone();

        tokio::spawn(async move {
            let start = tokio::time::Instant::now();
            let mut interval = tokio::time::interval_at(start + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            let mut seq = 0u64;
            loop {
                tokio::select! {
                    biased;
                    () = stop_signal.notified() => break,
                    _ = interval.tick() => {
                        seq += 1;
                        match tick_tx.try_send(seq) {
                            Ok(()) => {}
                            // Receiver is behind: drop this tick.
                            Err(TrySendError::Full(_)) => {}
                            // Ticker dropped: no one is listening.
                            Err(TrySendError::Closed(_)) => break,
                        }
                    }
                }
            }
        });

        Ok(Self { ticks, stop })
    }

    /// Wait for the next tick.
    ///
    /// Returns the tick's sequence number, or `None` once the ticker
    /// has been stopped and the last queued tick has been taken.
    pub async fn tick(&mut self) -> Option<u64> {
        self.ticks.recv().await
    }

    /// Stop the ticker.
    ///
    /// No tick is generated after this returns; at most one tick that
    /// was already queued may still be observed. Idempotent.
    pub fn stop(&self) {
        self.stop.notify_one();
    }

    /// Adapt the remaining ticks into a stream.
    ///
    /// The stream ends when the ticker is stopped (the ticker can no
    /// longer be stopped through this handle once converted, but
    /// dropping the stream also shuts the timer task down).
    pub fn into_stream(mut self) -> impl Stream<Item = u64> {
        async_stream::stream! {
            while let Some(seq) = self.tick().await {
                yield seq;
            }
        }
    }
}

/// Drive a fresh ticker for exactly `cycles` ticks.
///
/// Every `major_every`-th tick is labelled [`TickKind::Major`], the
/// rest [`TickKind::Minor`]; for `major_every = M` the emitted pattern
/// is M−1 minors followed by one major, repeated. The ticker is
/// stopped before returning, so the run terminates deterministically.
///
/// Returns `Err(TimerError::Config)` if `period` is zero or
/// `major_every` is zero. `cycles == 0` yields an empty run.
pub async fn run_ticker(
    period: Duration,
    major_every: u64,
    cycles: u64,
) -> Result<Vec<Tick>, TimerError> {
    if major_every == 0 {
        return Err(TimerError::Config("major cadence must be positive".into()));
    }

    let mut ticker = Ticker::new(period)?;

    let mut ticks = Vec::with_capacity(cycles as usize);
    for seq in 1..=cycles {
        if ticker.tick().await.is_none() {
            break;
        }
        let kind = if seq % major_every == 0 {
            TickKind::Major
        } else {
            TickKind::Minor
        };
        ticks.push(Tick { seq, kind });
    }

    ticker.stop();
    Ok(ticks)
}
