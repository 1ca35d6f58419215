//! # Resilience Module
//!
//! Retry with capped exponential backoff for transient API failures.
//!
//! Every client call runs through [`retry::with_retry`] with the client's
//! [`RetryPolicy`]. Rate-limit failures that carry a server `Retry-After` wait
//! exactly that long; other retryable failures back off exponentially with up
//! to 25% additive jitter.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use tuteliq::resilience::{with_retry, RetryPolicy};
//!
//! # async fn run() -> tuteliq::Result<()> {
//! let policy = RetryPolicy::new()
//!     .with_max_retries(2)
//!     .with_initial_delay(Duration::from_millis(200));
//! let value = with_retry(&policy, || async { Ok::<_, tuteliq::Error>(42) }).await?;
//! assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```

pub mod retry;

pub use retry::{with_retry, RetryPolicy, RetryPredicate};
