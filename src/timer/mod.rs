// ABOUTME: Timed event multiplexer module - ordered waiting and periodic ticks.
// ABOUTME: Contains ordered_select over delayed sources and the stoppable Ticker.

mod select;
mod ticker;

pub use select::{DelayedSource, SourceEvent, ordered_select};
pub use ticker::{Tick, TickKind, Ticker, run_ticker};

#[cfg(test)]
mod ticker_test;
