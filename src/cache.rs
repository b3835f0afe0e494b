//! In-memory caching for the public content endpoints.
//!
//! Uses moka for TTL-based caching. The cache holds fully serialized
//! response payloads keyed by section; every successful admin mutation
//! invalidates its section so public readers never see stale content
//! for longer than one request.

use moka::sync::Cache;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::time::Duration;

use crate::app_config;

static CONTENT_CACHE: Lazy<Cache<String, Value>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(u64::from(
            app_config::limits().content_cache_ttl_secs,
        )))
        .max_capacity(1_000)
        .build()
});

/// Cached public payload for a section key, if fresh.
pub fn get(key: &str) -> Option<Value> {
    CONTENT_CACHE.get(key)
}

pub fn insert(key: &str, value: Value) {
    CONTENT_CACHE.insert(key.to_owned(), value);
}

/// Drops one section after a mutation.
pub fn invalidate(key: &str) {
    CONTENT_CACHE.invalidate(key);
}

/// Drops every cached payload (the admin "clear cache" action).
pub fn clear() {
    CONTENT_CACHE.invalidate_all();
}
