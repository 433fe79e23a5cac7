//! Fixed-delay retry for startup operations.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

/// How many times to attempt an operation and how long to wait in between.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one. Zero behaves as one.
    pub max_attempts: u32,
    /// Delay between a failed attempt and the next one.
    pub delay: Duration,
}

/// Run `operation` until it succeeds or `policy.max_attempts` is reached.
///
/// The operation receives the 1-based attempt number. Every attempt redoes
/// the whole operation; the last error is returned once attempts run out.
pub async fn retry_fixed<F, Fut, T, E>(
    policy: RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    info!(operation = operation_name, attempt, "Succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) => {
                warn!(
                    operation = operation_name,
                    attempt,
                    max_attempts,
                    error = %err,
                    "Attempt failed"
                );
                if attempt >= max_attempts {
                    return Err(err);
                }
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}
