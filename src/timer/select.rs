// ABOUTME: Ordered select over concurrently-firing delayed event sources.
// ABOUTME: Events are processed in completion order, with an optional overall timeout.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::error::TimerError;

/// A named event source that completes after a fixed delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayedSource {
    /// Name reported when the source completes.
    pub name: String,
    /// How long after the select starts this source fires.
    pub delay: Duration,
}

impl DelayedSource {
    /// Create a source firing `delay` after the select starts.
    pub fn new(name: impl Into<String>, delay: Duration) -> Self {
        Self {
            name: name.into(),
            delay,
        }
    }
}

/// An event yielded by a completed source. Displays as `"from <name>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEvent {
    /// Name of the source that completed.
    pub name: String,
    /// Offset from the select's start at which the event arrived.
    pub completed_after: Duration,
}

impl std::fmt::Display for SourceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "from {}", self.name)
    }
}

/// Wait on all sources at once and return their events in completion
/// order.
///
/// Every source's deadline is anchored to a single start instant, so
/// the sources wait concurrently: total wall-clock is the longest
/// delay, never the sum. Sources sharing a delay are reported in
/// registration order.
///
/// With `timeout` set, the call returns
/// `Err(TimerError::DeadlineExceeded)` at the timeout instant if any
/// source is still pending; already-spawned sources are detached and
/// their late events are discarded.
pub async fn ordered_select(
    sources: Vec<DelayedSource>,
    timeout: Option<Duration>,
) -> Result<Vec<SourceEvent>, TimerError> {
    if sources.is_empty() {
        return Ok(Vec::new());
    }

    let start = Instant::now();
    let limit = timeout.map(|t| start + t);
    let total = sources.len();

    let (event_tx, mut event_rx) = mpsc::channel(total);

    for (index, source) in sources.into_iter().enumerate() {
        let event_tx = event_tx.clone();
        let deadline = start + source.delay;
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // Receiver dropped on timeout: the late event fizzles.
            let _ = event_tx
                .send((source.delay, index, source.name, start.elapsed()))
                .await;
        });
    }
    drop(event_tx);

    let mut received = Vec::with_capacity(total);
    for _ in 0..total {
        let event = match limit {
            Some(limit) => tokio::time::timeout_at(limit, event_rx.recv())
                .await
                .map_err(|_| TimerError::DeadlineExceeded(timeout.unwrap_or_default()))?,
            None => event_rx.recv().await,
        };
        match event {
            Some(event) => received.push(event),
            None => break,
        }
    }

    // Arrival order already is completion order, but sources sharing a
    // deadline race in the timer wheel. Normalizing on (delay,
    // registration index) pins ties without disturbing the rest.
    received.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

    Ok(received
        .into_iter()
        .map(|(_, _, name, completed_after)| SourceEvent {
            name,
            completed_after,
        })
        .collect())
}
