//! Bounded polling waits

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::common::config::Timeouts;
use crate::common::{Error, Result};

/// Polls a condition until it yields a value or the timeout elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wait {
    timeout: Duration,
    poll_interval: Duration,
}

impl Wait {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// The default wait described by the configured timeouts
    pub fn from_timeouts(timeouts: &Timeouts) -> Self {
        Self::new(timeouts.default_wait(), timeouts.poll_interval())
    }

    /// Same polling interval, different bound
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Poll `condition` until it returns `Some`
    ///
    /// The condition is always evaluated at least once. Transient errors
    /// (stale or vanished elements) count as "not yet"; any other error ends
    /// the wait immediately.
    pub async fn until<T, F, Fut>(&self, what: &str, mut condition: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>>>,
    {
        let started = Instant::now();
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            match condition().await {
                Ok(Some(value)) => {
                    tracing::trace!(what, attempts, "condition met");
                    return Ok(value);
                }
                Ok(None) => {}
                Err(e) if e.is_transient() => {
                    tracing::trace!(what, error = %e, "ignoring transient error");
                }
                Err(e) => return Err(e),
            }

            let elapsed = started.elapsed();
            if elapsed >= self.timeout {
                return Err(Error::wait_timeout(what, elapsed));
            }
            let remaining = self.timeout - elapsed;
            tokio::time::sleep(self.poll_interval.min(remaining)).await;
        }
    }
}
