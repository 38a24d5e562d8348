//! Minimum-interval throttle in front of the LLM
//!
//! The last call time lives in a shared [`RateLimitStore`]. A request reads
//! it, sleeps out the rest of the interval, then records its own call time.
//! Read and write are not atomic, so concurrent requests may overlap: this is
//! a soft limit. When the store fails, a fixed delay is applied instead.

pub mod store;

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ThrottleConfig;
use crate::error::Result;

pub use store::{InMemoryRateLimitStore, RateLimitStore};

/// Store key of the last LLM call time
pub const LAST_AI_REQUEST_KEY: &str = "last_ai_request";

/// What the throttle did for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleOutcome {
    /// Interval already elapsed, no wait
    Clear,
    /// Waited out the remaining interval
    Delayed(Duration),
    /// Store unavailable, waited the fixed fallback delay
    Degraded(Duration),
}

/// Best-effort minimum-interval gate
pub struct Throttle {
    store: Arc<dyn RateLimitStore>,
    min_interval: Duration,
    ttl: Duration,
    fallback_delay: Duration,
}

impl Throttle {
    pub fn new(store: Arc<dyn RateLimitStore>, config: &ThrottleConfig) -> Self {
        Self {
            store,
            min_interval: config.min_interval(),
            ttl: config.ttl(),
            fallback_delay: config.fallback_delay(),
        }
    }

    /// Throttle backed by a fresh in-memory store
    pub fn in_memory(config: &ThrottleConfig) -> Self {
        Self::new(Arc::new(InMemoryRateLimitStore::new()), config)
    }

    /// Block until the next call is allowed. Never fails.
    pub async fn wait(&self) -> ThrottleOutcome {
        match self.try_wait().await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    "Rate limit store unavailable ({}), applying fixed {:?} delay",
                    e,
                    self.fallback_delay
                );
                tokio::time::sleep(self.fallback_delay).await;
                ThrottleOutcome::Degraded(self.fallback_delay)
            }
        }
    }

    async fn try_wait(&self) -> Result<ThrottleOutcome> {
        let last_call = self.store.get(LAST_AI_REQUEST_KEY).await?;

        let outcome = match last_call {
            Some(last) => {
                // A timestamp from the future counts as "just now"
                let elapsed = Utc::now()
                    .signed_duration_since(last)
                    .to_std()
                    .unwrap_or(Duration::ZERO);

                if elapsed < self.min_interval {
                    let remaining = self.min_interval - elapsed;
                    tracing::debug!("Throttling LLM call for {:?}", remaining);
                    tokio::time::sleep(remaining).await;
                    ThrottleOutcome::Delayed(remaining)
                } else {
                    ThrottleOutcome::Clear
                }
            }
            None => ThrottleOutcome::Clear,
        };

        self.store
            .set(LAST_AI_REQUEST_KEY, Utc::now(), self.ttl)
            .await?;

        Ok(outcome)
    }
}
