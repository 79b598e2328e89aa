//! Retry execution engine
//!
//! The executor re-invokes a failing operation up to `max_attempts` times,
//! sleeping a bounded exponential delay between attempts. Failures propagate
//! as the operation's own error type; exhaustion surfaces the final
//! attempt's error unchanged.

use std::error::Error;
use std::future::Future;
use std::time::Instant;

use crate::types::RetryConfig;

use super::backoff::backoff_delay;
use super::observer::{RetryObserver, TracingObserver};

/// A retry executor with a validated policy and an injected observer
///
/// Construction validates the configuration, so a policy that could never
/// run (zero attempts, inverted delay bounds) is rejected before any
/// operation executes. The executor keeps no per-call state; one instance
/// can drive any number of concurrent operations.
///
/// # Example
///
/// ```rust,no_run
/// use failover_core::retry::TracingObserver;
/// use failover_core::{RetryConfig, RetryExecutor};
///
/// # fn example() -> failover_core::Result<()> {
/// let executor = RetryExecutor::new(RetryConfig::default())?
///     .with_observer(TracingObserver::new("download"))
///     .with_jitter(false);
/// # Ok(())
/// # }
/// ```
pub struct RetryExecutor<O = TracingObserver> {
    config: RetryConfig,
    observer: O,
    jitter: bool,
}

impl RetryExecutor<TracingObserver> {
    /// Create an executor for `config`, logging through `tracing`
    ///
    /// Fails with a configuration error if the policy is structurally
    /// invalid. Jitter is enabled by default.
    pub fn new(config: RetryConfig) -> crate::error::Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            observer: TracingObserver::default(),
            jitter: true,
        })
    }
}

impl<O> RetryExecutor<O> {
    /// Replace the observer
    pub fn with_observer<O2>(self, observer: O2) -> RetryExecutor<O2> {
        RetryExecutor {
            config: self.config,
            observer,
            jitter: self.jitter,
        }
    }

    /// Enable or disable jitter
    ///
    /// Jitter adds random variation to retry delays to prevent thundering
    /// herd. Enabled by default; disable for deterministic delays.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// The policy this executor runs under
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }
}

impl<O> RetryExecutor<O>
where
    O: RetryObserver,
{
    /// Execute an operation with retry
    ///
    /// Invokes `op` up to `max_attempts` times. The first success returns
    /// immediately; between failed attempts the task sleeps for the backoff
    /// delay. When every attempt has failed, the error from the final
    /// attempt is returned as-is.
    ///
    /// The executor does not classify errors: every failure is retried the
    /// same way until attempts run out. Dropping the returned future (task
    /// abort, `select!`) cancels the in-flight attempt and any pending
    /// backoff sleep; no further attempts run.
    pub async fn execute<F, Fut, T, E>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Error,
    {
        let start = Instant::now();
        let mut attempt = 1u32;

        loop {
            self.observer
                .on_attempt_start(attempt, self.config.max_attempts);

            match op().await {
                Ok(result) => {
                    self.observer.on_success(attempt, start.elapsed());
                    return Ok(result);
                }
                Err(err) => {
                    if attempt >= self.config.max_attempts {
                        self.observer.on_exhausted(attempt, &err);
                        return Err(err);
                    }

                    let delay = backoff_delay(&self.config, attempt, self.jitter);
                    self.observer.on_attempt_failed(attempt, &err, delay);

                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }
}
