//! FIFO task queue that runs at most `max_parallel` tasks concurrently.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;

use crate::error_model::{ApiError, ApiErrorCode};

/// Boxed unit of asynchronous work accepted by the queue.
pub type QueueTask = Pin<Box<dyn Future<Output = Result<(), ApiError>> + Send + 'static>>;

/// Accepts an unbounded backlog of async tasks and drains it with bounded
/// concurrency.
///
/// Tasks start in submission order when `wait_all` runs the drain loop;
/// completion order is unconstrained. At no instant are more than
/// `max_parallel` tasks running.
pub struct ParallelTaskQueue {
    max_parallel: usize,
    backlog: VecDeque<QueueTask>,
}

impl ParallelTaskQueue {
    /// Creates a queue running at most `max_parallel` tasks at once
    /// (clamped to at least 1).
    pub fn new(max_parallel: usize) -> Self {
        Self {
            max_parallel: max_parallel.max(1),
            backlog: VecDeque::new(),
        }
    }

    /// Enqueues a task. Nothing runs until `wait_all` drains the backlog.
    pub fn push<F>(&mut self, task: F)
    where
        F: Future<Output = Result<(), ApiError>> + Send + 'static,
    {
        self.backlog.push_back(Box::pin(task));
    }

    /// Number of tasks waiting in the backlog.
    pub fn len(&self) -> usize {
        self.backlog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backlog.is_empty()
    }

    /// Runs every queued task to completion and returns the first failure
    /// (in completion order), if any.
    ///
    /// A failing task never cancels the others: the whole backlog and every
    /// in-flight task is awaited before the error is surfaced. Failures past
    /// the first are logged, not swallowed silently.
    pub async fn wait_all(&mut self) -> Result<(), ApiError> {
        let mut in_flight = tokio::task::JoinSet::new();
        let mut first_failure: Option<ApiError> = None;

        loop {
            while in_flight.len() < self.max_parallel {
                let Some(task) = self.backlog.pop_front() else {
                    break;
                };
                in_flight.spawn(task);
            }

            let Some(joined) = in_flight.join_next().await else {
                break;
            };
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(error)) => record_failure(&mut first_failure, error),
                Err(join_error) => record_failure(
                    &mut first_failure,
                    ApiError::new(
                        ApiErrorCode::Unknown,
                        format!("queued task did not complete: {join_error}"),
                    ),
                ),
            }
        }

        match first_failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn record_failure(first_failure: &mut Option<ApiError>, error: ApiError) {
    if first_failure.is_none() {
        *first_failure = Some(error);
    } else {
        tracing::warn!(%error, "queued task failed after an earlier failure");
    }
}
