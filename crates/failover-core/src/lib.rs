//! # failover-core
//!
//! Core library for the failover CLI providing:
//! - Retry execution with exponential backoff and injected observers
//! - Primary/fallback flow control for predictable degradation
//! - Retry configuration types with serde support
//!
//! The two pieces compose at the call site: wrap an operation with a
//! [`RetryExecutor`] and hand it to a [`FlowController`] together with an
//! optional fallback operation. Neither component keeps state across calls,
//! so a single instance can serve any number of concurrent invocations.

pub mod error;
pub mod flow;
pub mod retry;
pub mod types;

pub use error::{Error, Result};
pub use flow::{no_fallback, FlowController};
pub use retry::RetryExecutor;
pub use types::RetryConfig;
