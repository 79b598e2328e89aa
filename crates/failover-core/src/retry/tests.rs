//! Integration tests for the retry module
//!
//! These exercise the full execution flow: attempt counting, backoff
//! bounds, error passthrough, and cancellation.

use std::io;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::retry::backoff::backoff_delay;
use crate::retry::executor::RetryExecutor;
use crate::retry::observer::{NoOpObserver, StatsObserver};
use crate::types::RetryConfig;

/// Create a test config with short delays
fn quick_config(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        min_delay_ms: 1, // Very short for tests
        max_delay_ms: 10,
    }
}

#[tokio::test]
async fn always_failing_op_runs_exactly_max_attempts() {
    for max_attempts in 1..=5 {
        let invocations = Arc::new(AtomicU32::new(0));
        let invocations_clone = invocations.clone();
        let executor = RetryExecutor::new(quick_config(max_attempts))
            .unwrap()
            .with_observer(NoOpObserver)
            .with_jitter(false);

        let result: Result<&str, io::Error> = executor
            .execute(|| {
                let invocations = invocations_clone.clone();
                async move {
                    let n = invocations.fetch_add(1, Ordering::SeqCst) + 1;
                    Err(io::Error::new(
                        io::ErrorKind::ConnectionRefused,
                        format!("refused on attempt {n}"),
                    ))
                }
            })
            .await;

        assert_eq!(invocations.load(Ordering::SeqCst), max_attempts);

        // The error from the final attempt surfaces, not any earlier one
        // and not a wrapper.
        let err = result.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionRefused);
        assert_eq!(err.to_string(), format!("refused on attempt {max_attempts}"));
    }
}

#[tokio::test]
async fn success_on_attempt_k_stops_there() {
    for succeed_on in 1..=4 {
        let invocations = Arc::new(AtomicU32::new(0));
        let invocations_clone = invocations.clone();
        let executor = RetryExecutor::new(quick_config(4))
            .unwrap()
            .with_observer(NoOpObserver)
            .with_jitter(false);

        let result: Result<String, io::Error> = executor
            .execute(|| {
                let invocations = invocations_clone.clone();
                async move {
                    let n = invocations.fetch_add(1, Ordering::SeqCst) + 1;
                    if n < succeed_on {
                        Err(io::Error::new(io::ErrorKind::TimedOut, "not yet"))
                    } else {
                        Ok(format!("result of attempt {n}"))
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), format!("result of attempt {succeed_on}"));
        assert_eq!(invocations.load(Ordering::SeqCst), succeed_on);
    }
}

#[tokio::test]
async fn observer_sees_every_transition() {
    let observer = Arc::new(StatsObserver::new());
    let invocations = Arc::new(AtomicU32::new(0));
    let invocations_clone = invocations.clone();
    let executor = RetryExecutor::new(quick_config(5))
        .unwrap()
        .with_observer(observer.clone())
        .with_jitter(false);

    let result: Result<&str, io::Error> = executor
        .execute(|| {
            let invocations = invocations_clone.clone();
            async move {
                let n = invocations.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(io::Error::new(io::ErrorKind::TimedOut, "flaky"))
                } else {
                    Ok("recovered")
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), "recovered");
    assert_eq!(observer.attempt_starts(), 3);
    assert_eq!(observer.failures(), 2);
    assert_eq!(observer.successes(), 1);
    assert_eq!(observer.exhaustions(), 0);
}

#[test]
fn delays_are_bounded_and_monotonic() {
    let config = RetryConfig {
        max_attempts: 8,
        min_delay_ms: 100,
        max_delay_ms: 1500,
    };

    let mut previous = Duration::ZERO;
    for attempt in 1..8 {
        let delay = backoff_delay(&config, attempt, false);
        assert!(delay >= config.min_delay());
        assert!(delay <= config.max_delay());
        assert!(delay >= previous);
        previous = delay;
    }

    // Jittered delays obey the same bounds.
    for attempt in 1..8 {
        for _ in 0..100 {
            let delay = backoff_delay(&config, attempt, true);
            assert!(delay >= config.min_delay());
            assert!(delay <= config.max_delay());
        }
    }
}

#[tokio::test]
async fn abort_during_backoff_stops_further_attempts() {
    let invocations = Arc::new(AtomicU32::new(0));
    let config = RetryConfig {
        max_attempts: 5,
        min_delay_ms: 200,
        max_delay_ms: 200,
    };

    let handle = tokio::spawn({
        let invocations = invocations.clone();
        async move {
            let executor = RetryExecutor::new(config)
                .unwrap()
                .with_observer(NoOpObserver)
                .with_jitter(false);
            let _: Result<&str, io::Error> = executor
                .execute(|| {
                    let invocations = invocations.clone();
                    async move {
                        invocations.fetch_add(1, Ordering::SeqCst);
                        Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
                    }
                })
                .await;
        }
    });

    // Let the first attempt fail and the backoff sleep begin, then cancel.
    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.abort();
    assert!(handle.await.unwrap_err().is_cancelled());

    // Long past when attempt 2 would have run.
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
}
