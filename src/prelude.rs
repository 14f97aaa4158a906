// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use weft::prelude::*;` to get started quickly.

pub use crate::counter::Counter;
pub use crate::error::{GateError, PoolError, TimerError, WeftError};
pub use crate::gate::{Admission, Gate, TokenBucket};
pub use crate::pool::{WorkerPool, run_pool};
pub use crate::timer::{
    DelayedSource, SourceEvent, Tick, TickKind, Ticker, ordered_select, run_ticker,
};
