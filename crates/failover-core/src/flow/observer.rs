//! Flow transition observation and logging
//!
//! The `FlowObserver` trait receives a callback at every transition of the
//! primary/fallback flow. The controller holds an observer instance instead
//! of logging through a global; each event carries the caller's context
//! label.

use std::error::Error;

/// Observer trait for primary/fallback flow events
pub trait FlowObserver: Send + Sync {
    /// Called before the primary operation is invoked
    fn on_primary_start(&self, context: &str);

    /// Called when the primary operation fails
    fn on_primary_failed(&self, context: &str, error: &dyn Error);

    /// Called when the primary failed and no fallback is configured;
    /// the primary's error is about to surface
    fn on_no_fallback(&self, context: &str);

    /// Called before the fallback operation is invoked
    fn on_fallback_start(&self, context: &str);

    /// Called when the fallback operation succeeds
    fn on_fallback_success(&self, context: &str);

    /// Called when the fallback operation also fails; its error is about
    /// to surface
    fn on_fallback_failed(&self, context: &str, error: &dyn Error);
}

/// A no-op observer that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpFlowObserver;

impl FlowObserver for NoOpFlowObserver {
    fn on_primary_start(&self, _context: &str) {}

    fn on_primary_failed(&self, _context: &str, _error: &dyn Error) {}

    fn on_no_fallback(&self, _context: &str) {}

    fn on_fallback_start(&self, _context: &str) {}

    fn on_fallback_success(&self, _context: &str) {}

    fn on_fallback_failed(&self, _context: &str, _error: &dyn Error) {}
}

/// An observer that logs flow transitions using the `tracing` crate
///
/// # Log Levels
///
/// - `on_primary_start`: DEBUG
/// - `on_primary_failed`: WARN
/// - `on_no_fallback` / `on_fallback_failed`: ERROR
/// - `on_fallback_start` / `on_fallback_success`: INFO
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFlowObserver;

impl FlowObserver for TracingFlowObserver {
    fn on_primary_start(&self, context: &str) {
        tracing::debug!(context = %context, "executing primary operation");
    }

    fn on_primary_failed(&self, context: &str, error: &dyn Error) {
        tracing::warn!(context = %context, error = %error, "primary operation failed");
    }

    fn on_no_fallback(&self, context: &str) {
        tracing::error!(context = %context, "no fallback configured, surfacing primary failure");
    }

    fn on_fallback_start(&self, context: &str) {
        tracing::info!(context = %context, "engaging fallback operation");
    }

    fn on_fallback_success(&self, context: &str) {
        tracing::info!(context = %context, "recovered via fallback");
    }

    fn on_fallback_failed(&self, context: &str, error: &dyn Error) {
        tracing::error!(context = %context, error = %error, "fallback also failed");
    }
}

/// An observer that counts flow transitions
///
/// Useful for testing and metrics collection.
#[derive(Debug, Default)]
pub struct StatsFlowObserver {
    /// Primary start events
    pub primary_starts: std::sync::atomic::AtomicU32,
    /// Primary failure events
    pub primary_failures: std::sync::atomic::AtomicU32,
    /// Terminal failures with no fallback configured
    pub no_fallbacks: std::sync::atomic::AtomicU32,
    /// Fallback start events
    pub fallback_starts: std::sync::atomic::AtomicU32,
    /// Fallback success events
    pub fallback_successes: std::sync::atomic::AtomicU32,
    /// Fallback failure events
    pub fallback_failures: std::sync::atomic::AtomicU32,
}

impl StatsFlowObserver {
    /// Create a new stats observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of primary starts
    pub fn primary_starts(&self) -> u32 {
        self.primary_starts
            .load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Get the number of primary failures
    pub fn primary_failures(&self) -> u32 {
        self.primary_failures
            .load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Get the number of no-fallback terminals
    pub fn no_fallbacks(&self) -> u32 {
        self.no_fallbacks.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Get the number of fallback starts
    pub fn fallback_starts(&self) -> u32 {
        self.fallback_starts
            .load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Get the number of fallback successes
    pub fn fallback_successes(&self) -> u32 {
        self.fallback_successes
            .load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Get the number of fallback failures
    pub fn fallback_failures(&self) -> u32 {
        self.fallback_failures
            .load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl FlowObserver for StatsFlowObserver {
    fn on_primary_start(&self, _context: &str) {
        self.primary_starts
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    fn on_primary_failed(&self, _context: &str, _error: &dyn Error) {
        self.primary_failures
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    fn on_no_fallback(&self, _context: &str) {
        self.no_fallbacks
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    fn on_fallback_start(&self, _context: &str) {
        self.fallback_starts
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    fn on_fallback_success(&self, _context: &str) {
        self.fallback_successes
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    fn on_fallback_failed(&self, _context: &str, _error: &dyn Error) {
        self.fallback_failures
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

/// Implement FlowObserver for Arc<T> where T: FlowObserver
impl<T: FlowObserver + ?Sized> FlowObserver for std::sync::Arc<T> {
    fn on_primary_start(&self, context: &str) {
        (**self).on_primary_start(context)
    }

    fn on_primary_failed(&self, context: &str, error: &dyn Error) {
        (**self).on_primary_failed(context, error)
    }

    fn on_no_fallback(&self, context: &str) {
        (**self).on_no_fallback(context)
    }

    fn on_fallback_start(&self, context: &str) {
        (**self).on_fallback_start(context)
    }

    fn on_fallback_success(&self, context: &str) {
        (**self).on_fallback_success(context)
    }

    fn on_fallback_failed(&self, context: &str, error: &dyn Error) {
        (**self).on_fallback_failed(context, error)
    }
}

/// Implement FlowObserver for Box<T> where T: FlowObserver
impl<T: FlowObserver + ?Sized> FlowObserver for Box<T> {
    fn on_primary_start(&self, context: &str) {
        (**self).on_primary_start(context)
    }

    fn on_primary_failed(&self, context: &str, error: &dyn Error) {
        (**self).on_primary_failed(context, error)
    }

    fn on_no_fallback(&self, context: &str) {
        (**self).on_no_fallback(context)
    }

    fn on_fallback_start(&self, context: &str) {
        (**self).on_fallback_start(context)
    }

    fn on_fallback_success(&self, context: &str) {
        (**self).on_fallback_success(context)
    }

    fn on_fallback_failed(&self, context: &str, error: &dyn Error) {
        (**self).on_fallback_failed(context, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn stats_observer_counts_transitions() {
        let observer = StatsFlowObserver::new();
        let error = io::Error::other("test");

        observer.on_primary_start("sync");
        observer.on_primary_failed("sync", &error);
        observer.on_fallback_start("sync");
        observer.on_fallback_success("sync");

        assert_eq!(observer.primary_starts(), 1);
        assert_eq!(observer.primary_failures(), 1);
        assert_eq!(observer.fallback_starts(), 1);
        assert_eq!(observer.fallback_successes(), 1);
        assert_eq!(observer.fallback_failures(), 0);
        assert_eq!(observer.no_fallbacks(), 0);
    }

    #[test]
    fn noop_observer_does_nothing() {
        let observer = NoOpFlowObserver;
        let error = io::Error::other("test");

        observer.on_primary_start("sync");
        observer.on_primary_failed("sync", &error);
        observer.on_no_fallback("sync");
        observer.on_fallback_start("sync");
        observer.on_fallback_success("sync");
        observer.on_fallback_failed("sync", &error);
    }
}
