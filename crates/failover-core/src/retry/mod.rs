//! Retry execution with exponential backoff
//!
//! This module wraps an arbitrary fallible async operation so that failures
//! are re-attempted up to a configured count, with a bounded exponential
//! delay between attempts. The last attempt's error surfaces unchanged —
//! callers see the operation's own error type, never a wrapper.
//!
//! # Example
//!
//! ```rust,no_run
//! use failover_core::{RetryConfig, RetryExecutor};
//!
//! async fn example() -> Result<String, std::io::Error> {
//!     let executor = RetryExecutor::new(RetryConfig::default()).expect("valid config");
//!
//!     executor
//!         .execute(|| async {
//!             // Your fallible operation here
//!             Ok("success".to_string())
//!         })
//!         .await
//! }
//! ```

mod backoff;
mod executor;
mod observer;

pub use backoff::backoff_delay;
pub use executor::RetryExecutor;
pub use observer::{NoOpObserver, RetryObserver, StatsObserver, TracingObserver};

#[cfg(test)]
mod tests;
