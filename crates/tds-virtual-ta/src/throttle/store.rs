//! Key-value store holding throttle timestamps
//!
//! Entries expire after their TTL. The store is shared by every request, so
//! implementations must be safe to call concurrently.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::time::Duration;

use crate::error::Result;

/// Get/set-with-expiry store for timestamps
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Read a timestamp. Expired or missing keys yield `None`.
    async fn get(&self, key: &str) -> Result<Option<DateTime<Utc>>>;

    /// Store a timestamp that expires after `ttl`
    async fn set(&self, key: &str, value: DateTime<Utc>, ttl: Duration) -> Result<()>;
}

#[derive(Debug, Clone, Copy)]
struct StoredTimestamp {
    value: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// Process-local store
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    entries: DashMap<String, StoredTimestamp>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.entries.iter().filter(|e| e.expires_at > now).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn get(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let now = Utc::now();

        let stored = match self.entries.get(key) {
            Some(entry) => *entry,
            None => return Ok(None),
        };

        if stored.expires_at <= now {
            tracing::debug!("Rate limit key '{}' expired", key);
            self.entries.remove(key);
            return Ok(None);
        }

        Ok(Some(stored.value))
    }

    async fn set(&self, key: &str, value: DateTime<Utc>, ttl: Duration) -> Result<()> {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(365));
        let expires_at = Utc::now().checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.entries
            .insert(key.to_string(), StoredTimestamp { value, expires_at });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let store = InMemoryRateLimitStore::new();
        let now = Utc::now();

        assert!(store.get("last_ai_request").await.unwrap().is_none());
        store
            .set("last_ai_request", now, Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(store.get("last_ai_request").await.unwrap(), Some(now));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_gone() {
        let store = InMemoryRateLimitStore::new();
        store
            .set("last_ai_request", Utc::now(), Duration::ZERO)
            .await
            .unwrap();

        assert!(store.get("last_ai_request").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_overwrite() {
        let store = InMemoryRateLimitStore::new();
        let earlier = Utc::now() - chrono::Duration::seconds(30);
        let later = Utc::now();

        store.set("k", earlier, Duration::from_secs(60)).await.unwrap();
        store.set("k", later, Duration::from_secs(60)).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some(later));
    }
}
