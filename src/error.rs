// ABOUTME: Defines all error types for the weft library using thiserror.
// ABOUTME: Each submodule has its own error enum, unified under WeftError.

use std::time::Duration;

/// Top-level error type for the weft library.
#[derive(Debug, thiserror::Error)]
pub enum WeftError {
    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("Gate error: {0}")]
    Gate(#[from] GateError),

    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),
}

/// Errors from worker pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("worker count must be at least 1 (got {0})")]
    NoWorkers(usize),
}

/// Errors from the admission gate and its token bucket.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("request '{0}' has no mapped response")]
    Unmapped(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("token bucket stopped")]
    Stopped,
}

/// Errors from the timed event multiplexer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("timed out after {0:?} waiting for event sources")]
    DeadlineExceeded(Duration),
}
