//! Transient-failure handling for the address search.
//!
//! The geocode round-trip sits on the interactive path of a report, so a
//! timeout, a refused connection, or a 5xx from the gateway gets a small
//! number of re-attempts with a jittered, doubling delay. Application-level
//! failures (rejected confirmation key, unparseable envelope) are final on
//! the first attempt; waiting cannot fix them.

use std::future::Future;
use std::time::Duration;

use crate::error::JusoError;

/// Delays are capped well below a minute; past that the caller is better
/// served by an invalid record than by a hung resolution.
const DELAY_CAP_MS: u64 = 30_000;

/// Whether a failed attempt is worth repeating.
pub(crate) fn is_retriable(err: &JusoError) -> bool {
    match err {
        JusoError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        JusoError::Api { .. } | JusoError::Deserialize { .. } => false,
    }
}

/// Delay before re-attempt number `attempt` (1-based): `base_ms` doubled per
/// attempt, capped, then scaled by a random factor in `[0.75, 1.25)` so
/// concurrent resolutions drift apart instead of re-hitting the gateway in
/// lockstep.
fn backoff_delay_ms(attempt: u32, base_ms: u64) -> u64 {
    let doubled = base_ms
        .saturating_mul(1u64 << (attempt - 1).min(10))
        .min(DELAY_CAP_MS);
    let jitter = rand::random_range(0.75..1.25);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    {
        (doubled as f64 * jitter) as u64
    }
}

/// Runs `operation`, re-attempting transient failures up to `max_retries`
/// times. A budget of 0 means a single attempt with no waiting.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, JusoError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, JusoError>>,
{
    for attempt in 1..=max_retries {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if is_retriable(&err) => {
                let delay_ms = backoff_delay_ms(attempt, backoff_base_ms);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "address search attempt failed; waiting before re-attempt"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            Err(err) => return Err(err),
        }
    }
    operation().await
}
