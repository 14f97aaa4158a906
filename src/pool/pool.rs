// ABOUTME: Fixed-size worker pool that fans jobs out over N workers.
// ABOUTME: Results are collected by count, so the caller never joins workers.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

use crate::error::PoolError;

/// A bounded pool of workers that process string jobs in parallel.
///
/// Jobs are fanned out over a fixed number of workers; each worker
/// uppercases the job and tags it with its own identity, producing
/// `"<UPPERCASED>-<worker_id>"`. Worker ids run from 1 to the pool
/// size. Results arrive in completion order, which is unspecified;
/// every job is processed exactly once.
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    /// Create a pool with the given number of workers.
    ///
    /// Returns `Err(PoolError::NoWorkers)` if `workers` is zero; the
    /// pool fails fast rather than clamping the count.
    pub fn new(workers: usize) -> Result<Self, PoolError> {
        if workers == 0 {
            return Err(PoolError::NoWorkers(workers));
        }
        Ok(Self { workers })
    }

    /// Number of workers in the pool.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Process all jobs and return one result per job.
    ///
    /// The job queue is fully populated and then closed before the
    /// results are drained, so workers terminate on their own once the
    /// queue is empty. The call returns as soon as every result has
    /// been collected; it does not wait for the worker tasks to exit.
    pub async fn run(&self, jobs: Vec<String>) -> Vec<String> {
        let capacity = jobs.len().max(1);
        let (job_tx, job_rx) = mpsc::channel::<String>(capacity);
        let (result_tx, mut result_rx) = mpsc::channel::<String>(capacity);

        // Workers share one receiving end behind a fair mutex. The
        // lock queues waiters FIFO, so no worker can monopolize the
        // queue while its siblings starve.
        let job_rx = Arc::new(Mutex::new(job_rx));

        for id in 1..=self.workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            tokio::spawn(async move {
                loop {
                    let job = job_rx.lock().await.recv().await;
                    match job {
                        Some(job) => {
                            let result = format!("{}-{}", job.to_uppercase(), id);
                            if result_tx.send(result).await.is_err() {
                                break;
                            }
                        }
                        // Queue closed and drained: the worker is done.
                        None => break,
                    }
                }
            });
        }
        drop(result_tx);

        let expected = jobs.len();
        for job in jobs {
            // Capacity equals the job count, so this never blocks.
            if job_tx.send(job).await.is_err() {
                break;
            }
        }
        drop(job_tx);

        let mut results = Vec::with_capacity(expected);
        while results.len() < expected {
            match result_rx.recv().await {
                Some(result) => results.push(result),
                None => break,
            }
        }
        results
    }
}

/// Run a one-off pool over `jobs` with `workers` workers.
///
/// Convenience wrapper around [`WorkerPool::new`] and
/// [`WorkerPool::run`].
pub async fn run_pool(jobs: Vec<String>, workers: usize) -> Result<Vec<String>, PoolError> {
    let pool = WorkerPool::new(workers)?;
    Ok(pool.run(jobs).await)
}
