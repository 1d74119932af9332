//! Key-addressed query cache. The binding reads through list/get keys and
//! marks entries stale after mutations; refetching is left to the reader.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Deterministic cache key, e.g. `["connectors"]` or `["connector", "42"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(Vec<String>);

impl CacheKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    pub fn with(mut self, part: impl Into<String>) -> Self {
        self.0.push(part.into());
        self
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// `["connectors"]` is a prefix of `["connectors", "page=2"]`.
    pub fn is_prefix_of(&self, other: &CacheKey) -> bool {
        other.0.len() >= self.0.len() && other.0[..self.0.len()] == self.0[..]
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedValue {
    pub value: Value,
    pub stale: bool,
}

/// Cache store consumed by the binding.
///
/// Writes carry the generation read before the fetch started. An
/// invalidation covering the key in between moves the generation on, and
/// the late write is then stored stale.
pub trait QueryCache: Send + Sync {
    fn read(&self, key: &CacheKey) -> Option<CachedValue>;

    /// Current generation of `key`; grows with every invalidation of a
    /// prefix of `key`, including keys not stored yet.
    fn generation(&self, key: &CacheKey) -> u64;

    fn write(&self, key: CacheKey, value: Value, generation: u64);

    /// Marks every entry whose key starts with `key` as stale.
    fn invalidate(&self, key: &CacheKey);
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<CacheKey, CachedValue>,
    // invalidated prefix -> counter value of its last invalidation
    invalidated: HashMap<CacheKey, u64>,
    counter: u64,
}

impl CacheState {
    fn generation(&self, key: &CacheKey) -> u64 {
        (0..=key.0.len())
            .filter_map(|len| self.invalidated.get(&CacheKey(key.0[..len].to_vec())))
            .copied()
            .max()
            .unwrap_or(0)
    }
}

#[derive(Clone, Default)]
pub struct MemoryCache {
    state: Arc<RwLock<CacheState>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_stale(&self, key: &CacheKey) -> Option<bool> {
        self.read(key).map(|entry| entry.stale)
    }

    pub fn len(&self) -> usize {
        self.state.read().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QueryCache for MemoryCache {
    fn read(&self, key: &CacheKey) -> Option<CachedValue> {
        self.state.read().ok()?.entries.get(key).cloned()
    }

    fn generation(&self, key: &CacheKey) -> u64 {
        self.state.read().map(|s| s.generation(key)).unwrap_or(0)
    }

    fn write(&self, key: CacheKey, value: Value, generation: u64) {
        if let Ok(mut state) = self.state.write() {
            let stale = state.generation(&key) != generation;
            if stale {
                log::debug!("{}: invalidated while loading, stored stale", key);
            }
            state.entries.insert(key, CachedValue { value, stale });
        }
    }

    fn invalidate(&self, key: &CacheKey) {
        if let Ok(mut state) = self.state.write() {
            state.counter += 1;
            let counter = state.counter;
            state.invalidated.insert(key.clone(), counter);
            for (_, entry) in state.entries.iter_mut().filter(|(k, _)| key.is_prefix_of(k)) {
                entry.stale = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_are_deterministic() {
        let a = CacheKey::new(["connectors"]).with("page=2");
        let b = CacheKey::new(["connectors", "page=2"]);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "[connectors, page=2]");
    }

    #[test]
    fn test_invalidate_marks_prefixed_entries_stale() {
        let cache = MemoryCache::new();
        let list = CacheKey::new(["connectors"]);
        let page = CacheKey::new(["connectors", "page=2"]);
        let other = CacheKey::new(["chargers"]);
        cache.write(list.clone(), json!([]), 0);
        cache.write(page.clone(), json!([]), 0);
        cache.write(other.clone(), json!([]), 0);

        cache.invalidate(&list);

        assert_eq!(cache.is_stale(&list), Some(true));
        assert_eq!(cache.is_stale(&page), Some(true));
        assert_eq!(cache.is_stale(&other), Some(false));
    }

    #[test]
    fn test_write_refreshes_stale_entry() {
        let cache = MemoryCache::new();
        let key = CacheKey::new(["tenants"]);
        cache.write(key.clone(), json!([1]), 0);
        cache.invalidate(&key);
        let generation = cache.generation(&key);
        cache.write(key.clone(), json!([2]), generation);
        assert_eq!(
            cache.read(&key),
            Some(CachedValue { value: json!([2]), stale: false })
        );
    }

    #[test]
    fn test_invalidate_unknown_key_is_noop() {
        let cache = MemoryCache::new();
        cache.invalidate(&CacheKey::new(["parties"]));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_write_after_invalidation_is_stale() {
        let cache = MemoryCache::new();
        let page = CacheKey::new(["connectors", "page=2"]);
        // read started before the first invalidation, key not stored yet
        let seen = cache.generation(&page);

        cache.invalidate(&CacheKey::new(["connectors"]));
        cache.write(page.clone(), json!([1]), seen);
        assert_eq!(cache.is_stale(&page), Some(true));

        let seen = cache.generation(&page);
        cache.invalidate(&CacheKey::new(["chargers"]));
        cache.write(page.clone(), json!([2]), seen);
        assert_eq!(cache.is_stale(&page), Some(false));
    }
}
