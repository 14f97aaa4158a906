// ABOUTME: Tests for the stoppable ticker and the minor/major periodic driver.
// ABOUTME: Covers the tick pattern, pacing, stop semantics, and the stream adapter.

use std::time::{Duration, Instant};

use futures::StreamExt;

use super::ticker::{Tick, TickKind, Ticker, run_ticker};
use crate::error::TimerError;

fn labels(ticks: &[Tick]) -> Vec<String> {
    ticks.iter().map(|t| t.to_string()).collect()
}

#[tokio::test]
async fn test_minor_major_pattern() {
    let ticks = run_ticker(Duration::from_millis(50), 3, 9).await.unwrap();

    assert_eq!(
        labels(&ticks),
        vec![
            "minor", "minor", "major", "minor", "minor", "major", "minor", "minor", "major"
        ]
    );
}

#[tokio::test]
async fn test_ticks_are_paced() {
    let start = Instant::now();
    let ticks = run_ticker(Duration::from_millis(50), 3, 9).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(ticks.len(), 9);
    assert!(
        elapsed >= Duration::from_millis(440),
        "9 ticks at 50ms should take ~450ms, took {:?}",
        elapsed
    );
    assert!(
        elapsed < Duration::from_millis(700),
        "ticker drifted, took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_tick_sequence_numbers() {
    let ticks = run_ticker(Duration::from_millis(10), 2, 4).await.unwrap();

    let seqs: Vec<u64> = ticks.iter().map(|t| t.seq).collect();
    assert_eq!(seqs, vec![1, 2, 3, 4]);
    assert_eq!(ticks[1].kind, TickKind::Major);
    assert_eq!(ticks[2].kind, TickKind::Minor);
}

#[tokio::test]
async fn test_stop_halts_future_ticks() {
    let mut ticker = Ticker::new(Duration::from_millis(10)).unwrap();

    assert!(ticker.tick().await.is_some());
    assert!(ticker.tick().await.is_some());

    ticker.stop();
    // Give the timer task time to observe the stop.
    tokio::time::sleep(Duration::from_millis(50)).await;

    // At most one tick was already queued when stop landed; after
    // that the channel is closed for good.
    let mut remaining = 0;
    while ticker.tick().await.is_some() {
        remaining += 1;
    }
    assert!(
        remaining <= 1,
        "ticks kept arriving after stop: {}",
        remaining
    );
}

#[tokio::test]
async fn test_stop_is_idempotent() {
    let ticker = Ticker::new(Duration::from_millis(10)).unwrap();
    ticker.stop();
    ticker.stop();
}

#[tokio::test]
async fn test_first_tick_waits_one_period() {
    let mut ticker = Ticker::new(Duration::from_millis(50)).unwrap();

    let start = Instant::now();
    ticker.tick().await.unwrap();
    let elapsed = start.elapsed();

    assert!(
        elapsed >= Duration::from_millis(40),
        "first tick should wait a full period, took {:?}",
        elapsed
    );
    ticker.stop();
}

#[tokio::test]
async fn test_zero_period_rejected() {
    assert!(matches!(
        Ticker::new(Duration::ZERO),
        Err(TimerError::Config(_))
    ));
}

#[tokio::test]
async fn test_zero_major_cadence_rejected() {
    let result = run_ticker(Duration::from_millis(10), 0, 5).await;
    assert!(matches!(result, Err(TimerError::Config(_))));
}

#[tokio::test]
async fn test_zero_cycles_is_empty() {
    let ticks = run_ticker(Duration::from_millis(10), 3, 0).await.unwrap();
    assert!(ticks.is_empty());
}

#[tokio::test]
async fn test_tick_stream() {
    let ticker = Ticker::new(Duration::from_millis(10)).unwrap();

    let seqs: Vec<u64> = ticker.into_stream().take(3).collect().await;
    assert_eq!(seqs, vec![1, 2, 3]);
}

#[test]
fn test_tick_kind_display() {
    assert_eq!(TickKind::Minor.to_string(), "minor");
    assert_eq!(TickKind::Major.to_string(), "major");
}
