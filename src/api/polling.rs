// src/api/polling.rs
//! Waiting for asynchronous jobs on the API side.
//!
//! Polling is not retrying: a probe that fails with an HTTP error aborts
//! the wait immediately. Only a successful "not done yet" answer leads to
//! another attempt.

use crate::constants::{EXPORT_POLL_INTERVAL, EXPORT_POLL_MAX_ATTEMPTS, EXPORT_POLL_MAX_INTERVAL};
use crate::error::AppError;
use std::future::Future;
use std::time::Duration;

/// How often and how long to poll.
#[derive(Debug, Clone, PartialEq)]
pub struct PollPolicy {
    /// Delay before the second probe
    pub interval: Duration,
    /// Total number of probes before giving up
    pub max_attempts: u32,
    /// Multiplier applied to the delay after each pending probe; 1.0 is fixed
    pub backoff_factor: f64,
    /// Upper bound for the delay
    pub max_interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: EXPORT_POLL_INTERVAL,
            max_attempts: EXPORT_POLL_MAX_ATTEMPTS,
            backoff_factor: 1.0,
            max_interval: EXPORT_POLL_MAX_INTERVAL,
        }
    }
}

impl PollPolicy {
    pub fn fixed(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
            backoff_factor: 1.0,
            max_interval: interval,
        }
    }

    pub fn with_backoff(mut self, factor: f64, max_interval: Duration) -> Self {
        self.backoff_factor = factor;
        self.max_interval = max_interval;
        self
    }

    fn next_delay(&self, current: Duration) -> Duration {
        if self.backoff_factor <= 1.0 || !self.backoff_factor.is_finite() {
            return current;
        }
        current.mul_f64(self.backoff_factor).min(self.max_interval)
    }
}

/// What a single probe observed.
#[derive(Debug, Clone, PartialEq)]
pub enum JobState<T> {
    Pending,
    Ready(T),
    Failed(String),
}

/// Probes until the job is ready, fails, or the policy runs out.
///
/// `probe` receives the 1-based attempt number.
pub async fn poll_until_ready<T, F, Fut>(
    job_id: &str,
    policy: &PollPolicy,
    mut probe: F,
) -> Result<T, AppError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<JobState<T>, AppError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut delay = policy.interval;

    for attempt in 1..=max_attempts {
        match probe(attempt).await? {
            JobState::Ready(value) => {
                log::debug!("Job {} ready after {} check(s)", job_id, attempt);
                return Ok(value);
            }
            JobState::Failed(reason) => {
                return Err(AppError::JobFailed {
                    job_id: job_id.to_string(),
                    reason,
                });
            }
            JobState::Pending => {
                log::debug!(
                    "Job {} pending (check {}/{}), waiting {:?}",
                    job_id,
                    attempt,
                    max_attempts,
                    delay
                );
                if attempt < max_attempts {
                    tokio::time::sleep(delay).await;
                    delay = policy.next_delay(delay);
                }
            }
        }
    }

    log::warn!("Job {} still pending after {} checks", job_id, max_attempts);
    Err(AppError::JobTimedOut {
        job_id: job_id.to_string(),
        attempts: max_attempts,
    })
}
