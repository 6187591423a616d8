//! Bounded exponential backoff for transient directory errors

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::domain::DirectoryError;

/// Retry policy for a single request: bounded attempts, exponential doubling
/// from a base delay, optional jitter. Injected into every step that talks to
/// the directory rather than hard-coded at the call sites.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            jitter: true,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, jitter: bool) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            jitter,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before the attempt following `attempt` (1-based): base * 2^(attempt-1),
    /// plus up to 20% jitter when enabled
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        let backoff = self.base_delay.saturating_mul(1u32 << exp);

        if self.jitter && !backoff.is_zero() {
            use rand::Rng;
            let factor = rand::thread_rng().gen_range(1.0..1.2);
            backoff.mul_f64(factor)
        } else {
            backoff
        }
    }

    /// Run `op`, retrying transient failures up to the attempt bound. A
    /// provider-supplied Retry-After hint wins over the computed backoff when
    /// it is longer. Non-transient errors are returned immediately.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T, DirectoryError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DirectoryError>>,
    {
        let mut attempt = 1;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() && attempt < self.max_attempts => {
                    let mut delay = self.delay_for(attempt);
                    if let Some(hint) = error.retry_after() {
                        delay = delay.max(hint);
                    }

                    warn!(
                        "{} failed (attempt {}/{}), retrying in {:?}: {}",
                        label, attempt, self.max_attempts, delay, error
                    );

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
