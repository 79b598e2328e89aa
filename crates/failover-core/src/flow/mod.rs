//! Primary/fallback flow control
//!
//! A [`FlowController`] runs a caller-supplied primary operation and, on
//! failure, an optional fallback. Observers receive an event at every
//! transition, tagged with the caller's context label. Composition with the
//! retry layer happens at the call site: wrap either operation with a
//! [`RetryExecutor`](crate::RetryExecutor) before handing it over.

mod controller;
mod observer;

pub use controller::{no_fallback, FlowController};
pub use observer::{FlowObserver, NoOpFlowObserver, StatsFlowObserver, TracingFlowObserver};
