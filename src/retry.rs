use crate::error::FetchError;
use std::time::Duration;

/// Bounded retry with a fixed backoff between attempts.
///
/// The policy is decoupled from any particular fetch call: it runs an
/// arbitrary fallible async operation, retrying only transient faults.
/// After the configured number of attempts the last error is returned as
/// the terminal failure, which callers are expected to skip rather than
/// abort on.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 7,
            backoff: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Run `op` until it succeeds, fails non-transiently, or the attempt
    /// budget is exhausted. The operation receives the 1-based attempt
    /// number; `what` names the work for logging.
    pub async fn run<T, F>(&self, what: &str, mut op: F) -> Result<T, FetchError>
    where
        F: AsyncFnMut(u32) -> Result<T, FetchError>,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    ::log::warn!(
                        "Attempt {}/{} failed for {}: {}",
                        attempt,
                        self.max_attempts,
                        what,
                        err
                    );
                    tokio::time::sleep(self.backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
