//! Backoff delay calculation

use rand::Rng;
use std::time::Duration;

use crate::types::RetryConfig;

/// Exponent cap; past this the max-delay cap always wins anyway.
const MAX_EXPONENT: u32 = 20;

/// Calculate the delay before the next retry attempt
///
/// `attempt` is 1-based and names the attempt that just failed: after
/// attempt 1 the delay is `min_delay`, after attempt 2 it doubles, and so on
/// up to `max_delay`. With `jitter` enabled, up to 25% of the computed delay
/// is added and the sum is re-capped, so the result always lies within
/// `[min_delay, max_delay]`.
pub fn backoff_delay(config: &RetryConfig, attempt: u32, jitter: bool) -> Duration {
    let exponent = attempt.saturating_sub(1).min(MAX_EXPONENT);
    let factor = 2u32.saturating_pow(exponent);
    let capped = config
        .min_delay()
        .saturating_mul(factor)
        .min(config.max_delay());

    if jitter && !capped.is_zero() {
        let jitter_range = capped.as_millis() as u64 / 4;
        if jitter_range > 0 {
            let extra = rand::rng().random_range(0..=jitter_range);
            return (capped + Duration::from_millis(extra)).min(config.max_delay());
        }
    }

    capped
}
