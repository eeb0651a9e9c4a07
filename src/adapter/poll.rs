//! Fixed interval polling with an overall deadline.
use log::*;
use std::future::Future;
use tokio::time::{Duration, Instant};

use crate::{Result, error::StagehandError};

/// Result of a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState<T> {
    Ready(T),
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollPolicy {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Calls `check` until it reports ready, returns an error, or the
    /// timeout elapses. The first check happens immediately. A check still
    /// running at the deadline is abandoned.
    pub async fn poll_until<F, Fut, T>(&self, what: &str, mut check: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<PollState<T>>>,
    {
        let start = Instant::now();
        let deadline = start + self.timeout;
        let mut attempts: u64 = 0;

        loop {
            attempts += 1;

            let state = tokio::time::timeout_at(deadline, check())
                .await
                .map_err(|_| {
                    StagehandError::timeout(what, start.elapsed().as_secs())
                })??;

            if let PollState::Ready(value) = state {
                if attempts > 1 {
                    info!("{what} ready after {attempts} checks");
                }
                return Ok(value);
            }

            let now = Instant::now();

            if now >= deadline {
                return Err(StagehandError::timeout(
                    what,
                    now.duration_since(start).as_secs(),
                ));
            }

            let wait = self.interval.min(deadline - now);

            debug!(
                "{what} not ready yet, checking again in {:.1}s",
                wait.as_secs_f64()
            );

            tokio::time::sleep(wait).await;
        }
    }
}
