// ABOUTME: Bounded worker pool module - fan-out/fan-in parallel job execution.
// ABOUTME: A fixed set of workers drains a closed job queue and merges results.

mod pool;

pub use pool::{WorkerPool, run_pool};
