use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Key for one cached response: operation name, the user the response was
/// computed for, and the request parameters rendered to a string.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct CacheKey {
    pub op: &'static str,
    pub user_id: Uuid,
    pub params: String,
}

impl CacheKey {
    pub fn new(op: &'static str, user_id: Uuid, params: impl Into<String>) -> Self {
        Self {
            op,
            user_id,
            params: params.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedEntry {
    stored_at: DateTime<Utc>,
    body: serde_json::Value,
}

/// Short-TTL cache in front of the read-heavy aggregate endpoints. Every
/// write path calls `flush_all`, matching the wipe-everything invalidation
/// of the original system, so entries can never outlive the data they were
/// derived from by more than the TTL.
#[derive(Clone)]
pub struct ResponseCache {
    entries: Arc<DashMap<CacheKey, CachedEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(60))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        if let Some(entry) = self.entries.get(key) {
            if Utc::now() - entry.stored_at < self.ttl {
                return serde_json::from_value(entry.body.clone()).ok();
            }
            drop(entry);
            self.entries.remove(key);
        }
        None
    }

    pub fn put<T: Serialize>(&self, key: CacheKey, value: &T) {
        // A value that fails to serialize is simply not cached.
        if let Ok(body) = serde_json::to_value(value) {
            self.entries.insert(
                key,
                CachedEntry {
                    stored_at: Utc::now(),
                    body,
                },
            );
        }
    }

    pub fn flush_all(&self) {
        self.entries.clear();
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_values() {
        let cache = ResponseCache::new();
        let key = CacheKey::new("stats", Uuid::new_v4(), "all");
        cache.put(key.clone(), &vec![1, 2, 3]);
        assert_eq!(cache.get::<Vec<i32>>(&key), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_miss_on_different_params() {
        let cache = ResponseCache::new();
        let user = Uuid::new_v4();
        cache.put(CacheKey::new("stats", user, "week"), &1i32);
        assert_eq!(cache.get::<i32>(&CacheKey::new("stats", user, "month")), None);
    }

    #[test]
    fn test_expired_entry_is_dropped() {
        let cache = ResponseCache::with_ttl(Duration::seconds(-1));
        let key = CacheKey::new("stats", Uuid::new_v4(), "all");
        cache.put(key.clone(), &1i32);
        assert_eq!(cache.get::<i32>(&key), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_flush_all_clears_every_user() {
        let cache = ResponseCache::new();
        cache.put(CacheKey::new("stats", Uuid::new_v4(), "all"), &1i32);
        cache.put(CacheKey::new("profile", Uuid::new_v4(), "x"), &2i32);
        cache.flush_all();
        assert_eq!(cache.len(), 0);
    }
}
