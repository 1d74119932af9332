//! Leptos side of the binding: reactive cache client and list hook.

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use std::sync::Arc;

use super::binding::{ResourceBinding, ResourceDeps};
use super::cache::{CacheKey, CachedValue, MemoryCache, QueryCache};
use super::entity::Resource;
use super::epoch::RequestEpoch;
use super::registry::ResourceRegistry;
use crate::layout::notifications::NotificationService;
use crate::system::auth::context::{use_auth, AuthTokenSource};

/// Query cache with a revision signal: every invalidation bumps the
/// revision so list hooks re-read their (now stale) keys.
#[derive(Clone)]
pub struct QueryClient {
    cache: MemoryCache,
    revision: RwSignal<u64>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self {
            cache: MemoryCache::new(),
            revision: RwSignal::new(0),
        }
    }

    /// Tracked read of the revision counter.
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }
}

impl QueryCache for QueryClient {
    fn read(&self, key: &CacheKey) -> Option<CachedValue> {
        self.cache.read(key)
    }

    fn generation(&self, key: &CacheKey) -> u64 {
        self.cache.generation(key)
    }

    fn write(&self, key: CacheKey, value: Value, generation: u64) {
        self.cache.write(key, value, generation);
    }

    fn invalidate(&self, key: &CacheKey) {
        self.cache.invalidate(key);
        self.revision.update(|r| *r += 1);
    }
}

/// Binds `T` using the registry, cache, notifications and auth found in context.
pub fn use_resource<T: Resource>() -> ResourceBinding<T> {
    let registry = expect_context::<ResourceRegistry>();
    let client = expect_context::<QueryClient>();
    let notices = expect_context::<NotificationService>();
    let (auth_state, _) = use_auth();

    registry.bind::<T>(ResourceDeps {
        auth: Arc::new(AuthTokenSource::new(auth_state)),
        cache: Arc::new(client),
        notices: Arc::new(notices),
    })
}

/// Reactive list state of one screen.
pub struct ResourceList<T: Send + Sync + 'static> {
    pub rows: RwSignal<Vec<T>>,
    pub is_loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl<T: Send + Sync + 'static> Clone for ResourceList<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ResourceList<T> {}

/// Loads the list on mount and again after every invalidation.
/// Responses of superseded loads are dropped.
pub fn use_resource_list<T: Resource>(binding: ResourceBinding<T>) -> ResourceList<T> {
    let client = expect_context::<QueryClient>();
    let epoch = Arc::new(RequestEpoch::default());
    let list = ResourceList {
        rows: RwSignal::new(Vec::new()),
        is_loading: RwSignal::new(true),
        error: RwSignal::new(None),
    };

    Effect::new(move |_| {
        client.revision();
        let ticket = epoch.begin();
        let epoch = Arc::clone(&epoch);
        let binding = binding.clone();
        // cache hits resolve without a fetch
        if !binding.has_fresh_list() {
            list.is_loading.set(true);
        }

        spawn_local(async move {
            let result = binding.list().await;
            if !epoch.is_current(ticket) {
                log::debug!(
                    "{}: dropping superseded list response",
                    binding.names().entity_type
                );
                return;
            }
            match result {
                Ok(rows) => {
                    list.rows.set(rows);
                    list.error.set(None);
                }
                Err(e) => {
                    log::error!("{}: {}", binding.names().operation_name(super::Operation::List), e);
                    list.rows.set(Vec::new());
                    list.error.set(Some(e.to_string()));
                }
            }
            list.is_loading.set(false);
        });
    });

    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_invalidation_bumps_revision_and_ages_late_writes() {
        let client = QueryClient::new();
        let key = CacheKey::new(["chargers"]);
        let seen = client.generation(&key);

        client.invalidate(&key);
        assert_eq!(client.revision.get_untracked(), 1);

        client.write(key.clone(), json!([]), seen);
        assert_eq!(client.read(&key).map(|c| c.stale), Some(true));

        client.write(key.clone(), json!([]), client.generation(&key));
        assert_eq!(client.read(&key).map(|c| c.stale), Some(false));
    }
}
