//! Retry with capped exponential backoff and jitter.
//!
//! [`with_retry`] wraps any zero-argument async operation. Failures classified as
//! retryable are retried up to `max_retries` times; everything else propagates on
//! first occurrence. The error returned to the caller is always the last
//! attempt's error, untouched.

use crate::{Error, Result};
use rand::Rng;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Upper bound of the additive jitter, as a fraction of the unjittered delay.
const JITTER_FRACTION: f64 = 0.25;

/// Predicate deciding whether a failure should be retried.
pub type RetryPredicate = Arc<dyn Fn(&Error) -> bool + Send + Sync>;

/// Retry configuration, supplied per call.
#[derive(Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt (total invocations ≤ `max_retries + 1`)
    pub max_retries: u32,
    /// Delay before the first retry, before jitter
    pub initial_delay: Duration,
    /// Cap applied after jitter
    pub max_delay: Duration,
    /// Growth factor per attempt
    pub backoff_multiplier: f64,
    is_retryable: RetryPredicate,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(30_000),
            backoff_multiplier: 2.0,
            is_retryable: Arc::new(Error::is_retryable),
        }
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_retries", &self.max_retries)
            .field("initial_delay", &self.initial_delay)
            .field("max_delay", &self.max_delay)
            .field("backoff_multiplier", &self.backoff_multiplier)
            .finish_non_exhaustive()
    }
}

impl RetryPolicy {
    /// Create a policy with default values (3 retries, 1s initial, 30s cap, ×2).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Replace the default classification (rate limit, server, network, timeout).
    pub fn with_retry_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Error) -> bool + Send + Sync + 'static,
    {
        self.is_retryable = Arc::new(predicate);
        self
    }

    /// Check the policy invariants.
    pub fn validate(&self) -> Result<()> {
        if self.initial_delay.is_zero() {
            return Err(Error::configuration("Retry initial delay must be greater than 0"));
        }
        if self.max_delay < self.initial_delay {
            return Err(Error::configuration(
                "Retry max delay must be greater than or equal to the initial delay",
            ));
        }
        if !(self.backoff_multiplier.is_finite() && self.backoff_multiplier > 1.0) {
            return Err(Error::configuration(
                "Retry backoff multiplier must be a finite number greater than 1",
            ));
        }
        Ok(())
    }

    /// Whether a failure at 0-based `attempt` should be followed by another attempt.
    pub fn should_retry(&self, attempt: u32, error: &Error) -> bool {
        attempt < self.max_retries && (self.is_retryable)(error)
    }

    /// Delay to wait after a failure at `attempt`.
    ///
    /// A non-zero server-specified retry-after is honored exactly; otherwise the
    /// jittered backoff applies.
    pub fn delay_for(&self, attempt: u32, error: &Error) -> Duration {
        match error.retry_after() {
            Some(retry_after) if !retry_after.is_zero() => retry_after,
            _ => self.backoff_delay(attempt),
        }
    }

    /// `min(initial × multiplier^attempt + jitter, max_delay)` with jitter in `[0, 25%]`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let unit: f64 = rand::thread_rng().gen();
        self.jittered_delay(attempt, unit)
    }

    fn base_delay_ms(&self, attempt: u32) -> f64 {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        self.initial_delay.as_secs_f64() * 1000.0 * self.backoff_multiplier.powi(exponent)
    }

    /// `unit` is the jitter draw in `[0, 1]`.
    fn jittered_delay(&self, attempt: u32, unit: f64) -> Duration {
        let base = self.base_delay_ms(attempt);
        let jitter = base * JITTER_FRACTION * unit.clamp(0.0, 1.0);
        let cap = self.max_delay.as_secs_f64() * 1000.0;
        // `base` may be infinite for very large attempts; the cap keeps it finite.
        let ms = (base + jitter).min(cap);
        Duration::from_secs_f64(ms.max(0.0) / 1000.0)
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or the
/// policy's retry budget is spent.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !policy.should_retry(attempt, &err) {
                    if attempt > 0 {
                        debug!(
                            attempts = attempt + 1,
                            error_kind = %err.kind(),
                            "giving up after retries"
                        );
                    }
                    return Err(err);
                }

                let delay = policy.delay_for(attempt, &err);
                warn!(
                    attempt = attempt + 1,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error_kind = %err.kind(),
                    "retrying after failure"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
