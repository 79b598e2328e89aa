//! Primary/fallback flow control
//!
//! The controller runs a primary operation and, if it fails, redirects to
//! an optional fallback. Whichever operation ran last supplies the error
//! the caller sees; nothing is wrapped or aggregated.

use std::error::Error;
use std::future::{Future, Ready};

use super::observer::{FlowObserver, TracingFlowObserver};

/// Flow controller for a primary operation with an optional fallback
///
/// The flow is linear: run the primary; on failure run the fallback if one
/// is configured; surface the last-run operation's error otherwise. The
/// controller performs no retries — wrap an operation with
/// [`RetryExecutor`](crate::RetryExecutor) before passing it in if retry
/// behavior is wanted. Retry and fallback stay orthogonal, composable
/// layers.
///
/// The controller holds only its observer, so a single instance is
/// reentrant: concurrent calls share nothing.
///
/// # Example
///
/// ```rust,no_run
/// use failover_core::FlowController;
///
/// async fn example() -> Result<String, std::io::Error> {
///     let controller = FlowController::new();
///     controller
///         .execute(
///             "data-sync",
///             || async { fetch_from_cloud().await },
///             Some(|| async { load_local_backup().await }),
///         )
///         .await
/// }
/// # async fn fetch_from_cloud() -> Result<String, std::io::Error> { unimplemented!() }
/// # async fn load_local_backup() -> Result<String, std::io::Error> { unimplemented!() }
/// ```
pub struct FlowController<O = TracingFlowObserver> {
    observer: O,
}

impl FlowController<TracingFlowObserver> {
    /// Create a controller logging transitions through `tracing`
    pub fn new() -> Self {
        Self {
            observer: TracingFlowObserver,
        }
    }
}

impl Default for FlowController<TracingFlowObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> FlowController<O>
where
    O: FlowObserver,
{
    /// Create a controller with a custom observer
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    /// Run `primary`, falling back to `fallback` on failure
    ///
    /// `context` labels the flow in observer events. Passing `None` (or
    /// [`no_fallback()`]) means "no fallback configured": the primary's
    /// failure then surfaces directly. When a fallback is present and also
    /// fails, *its* error surfaces — the fallback was the last operation
    /// attempted, so its failure is the terminal cause.
    ///
    /// Dropping the returned future cancels whichever operation is in
    /// flight; a cancelled primary never engages the fallback.
    pub async fn execute<T, E, P, PFut, F, FFut>(
        &self,
        context: &str,
        primary: P,
        fallback: Option<F>,
    ) -> Result<T, E>
    where
        P: FnOnce() -> PFut,
        PFut: Future<Output = Result<T, E>>,
        F: FnOnce() -> FFut,
        FFut: Future<Output = Result<T, E>>,
        E: Error,
    {
        self.observer.on_primary_start(context);

        let primary_err = match primary().await {
            Ok(result) => return Ok(result),
            Err(err) => err,
        };
        self.observer.on_primary_failed(context, &primary_err);

        let fallback = match fallback {
            Some(fallback) => fallback,
            None => {
                self.observer.on_no_fallback(context);
                return Err(primary_err);
            }
        };

        self.observer.on_fallback_start(context);
        match fallback().await {
            Ok(result) => {
                self.observer.on_fallback_success(context);
                Ok(result)
            }
            Err(fallback_err) => {
                self.observer.on_fallback_failed(context, &fallback_err);
                Err(fallback_err)
            }
        }
    }
}

/// The `None` case of an optional fallback, spelled so call sites stay
/// readable and type inference has a concrete operation type to work with
pub fn no_fallback<T, E>() -> Option<fn() -> Ready<Result<T, E>>> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::observer::NoOpFlowObserver;
    use std::io;

    #[tokio::test]
    async fn primary_success_returns_directly() {
        let controller = FlowController::with_observer(NoOpFlowObserver);

        let result: Result<&str, io::Error> = controller
            .execute("sync", || async { Ok("primary value") }, no_fallback())
            .await;

        assert_eq!(result.unwrap(), "primary value");
    }

    #[tokio::test]
    async fn no_fallback_surfaces_primary_error() {
        let controller = FlowController::with_observer(NoOpFlowObserver);

        let result: Result<&str, io::Error> = controller
            .execute(
                "sync",
                || async { Err(io::Error::new(io::ErrorKind::TimedOut, "primary timeout")) },
                no_fallback(),
            )
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
        assert_eq!(err.to_string(), "primary timeout");
    }

    #[tokio::test]
    async fn fallback_error_takes_precedence() {
        let controller = FlowController::with_observer(NoOpFlowObserver);

        let result: Result<&str, io::Error> = controller
            .execute(
                "sync",
                || async { Err(io::Error::new(io::ErrorKind::TimedOut, "primary timeout")) },
                Some(|| async {
                    Err(io::Error::new(io::ErrorKind::NotFound, "backup missing"))
                }),
            )
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(err.to_string(), "backup missing");
    }
}
