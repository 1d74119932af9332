//! Bound CRUD operations of one entity.

use leptos::prelude::{ArcRwSignal, Get, Update};
use serde_json::Value;
use std::sync::Arc;

use super::adapter::OperationBundle;
use super::cache::{CacheKey, QueryCache};
use super::entity::{Operation, Resource, ResourceNames};
use super::envelope::{decode_record, decode_rows, normalize_list};
use super::error::ResourceError;
use super::notice::{Notice, NoticeSink};

/// Source of the bearer token; `None` means "not signed in".
pub trait TokenSource: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// External collaborators of a binding.
#[derive(Clone)]
pub struct ResourceDeps {
    pub auth: Arc<dyn TokenSource>,
    pub cache: Arc<dyn QueryCache>,
    pub notices: Arc<dyn NoticeSink>,
}

/// In-flight call counters, one signal per operation.
struct PendingFlags {
    counts: [ArcRwSignal<usize>; 5],
}

impl Default for PendingFlags {
    fn default() -> Self {
        Self {
            counts: std::array::from_fn(|_| ArcRwSignal::new(0)),
        }
    }
}

impl PendingFlags {
    fn slot(&self, op: Operation) -> &ArcRwSignal<usize> {
        let index = match op {
            Operation::List => 0,
            Operation::Get => 1,
            Operation::Create => 2,
            Operation::Update => 3,
            Operation::Delete => 4,
        };
        &self.counts[index]
    }

    fn start(self: &Arc<Self>, op: Operation) -> PendingGuard {
        self.slot(op).update(|n| *n += 1);
        PendingGuard {
            flags: Arc::clone(self),
            op,
        }
    }
}

struct PendingGuard {
    flags: Arc<PendingFlags>,
    op: Operation,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.flags.slot(self.op).update(|n| *n = n.saturating_sub(1));
    }
}

/// `list`, `get_by_id`, `create`, `update`, `remove` for entity `T`.
///
/// Read path: a missing adapter function or an unexpected response shape
/// yields an empty result. Write path: every failure is returned as an
/// error and reported through the notice sink. Mutations invalidate the
/// list key (and the item key for update/delete) before they resolve.
pub struct ResourceBinding<T: Resource> {
    names: ResourceNames,
    ops: Arc<OperationBundle<T>>,
    deps: ResourceDeps,
    pending: Arc<PendingFlags>,
}

impl<T: Resource> Clone for ResourceBinding<T> {
    fn clone(&self) -> Self {
        Self {
            names: self.names.clone(),
            ops: Arc::clone(&self.ops),
            deps: self.deps.clone(),
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<T: Resource> ResourceBinding<T> {
    pub fn new(names: ResourceNames, ops: Arc<OperationBundle<T>>, deps: ResourceDeps) -> Self {
        Self {
            names,
            ops,
            deps,
            pending: Arc::new(PendingFlags::default()),
        }
    }

    pub fn names(&self) -> &ResourceNames {
        &self.names
    }

    pub fn list_key(&self) -> CacheKey {
        CacheKey::new([self.names.list_namespace()])
    }

    pub fn item_key(&self, id: &str) -> CacheKey {
        CacheKey::new([self.names.item_namespace(), id.to_string()])
    }

    /// True while at least one call of `op` is in flight. Tracked: a
    /// view or memo reading it updates when calls start and settle.
    pub fn is_pending(&self, op: Operation) -> bool {
        self.pending.slot(op).get() > 0
    }

    /// True when `list()` would be answered from cache.
    pub fn has_fresh_list(&self) -> bool {
        self.is_fresh(&self.list_key())
    }

    pub fn has_fresh_item(&self, id: &str) -> bool {
        self.is_fresh(&self.item_key(id.trim()))
    }

    fn is_fresh(&self, key: &CacheKey) -> bool {
        self.deps.cache.read(key).is_some_and(|c| !c.stale)
    }

    /// Marks every list of this entity stale (the "Refresh" button).
    pub fn invalidate_list(&self) {
        self.deps.cache.invalidate(&self.list_key());
    }

    pub async fn list(&self) -> Result<Vec<T>, ResourceError> {
        self.list_keyed(&[]).await
    }

    /// List with the cache key extended by caller-supplied parts
    /// (filters, page). The adapter call itself is the same.
    pub async fn list_keyed(&self, extra: &[&str]) -> Result<Vec<T>, ResourceError> {
        let token = self.require_token(Operation::List)?;
        let key = extra
            .iter()
            .fold(self.list_key(), |key, part| key.with(*part));

        if let Some(cached) = self.deps.cache.read(&key).filter(|c| !c.stale) {
            return Ok(self.decode_list(cached.value));
        }

        let Some(list) = self.ops.list.clone() else {
            log::warn!(
                "{}: adapter has no `{}`, returning an empty list",
                self.names.entity_type,
                self.names.operation_name(Operation::List)
            );
            return Ok(Vec::new());
        };

        let generation = self.deps.cache.generation(&key);
        let _pending = self.pending.start(Operation::List);
        let response = list(token).await.map_err(ResourceError::Transport)?;
        self.deps.cache.write(key, response.clone(), generation);
        Ok(self.decode_list(response))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<T>, ResourceError> {
        let token = self.require_token(Operation::Get)?;
        let id = self.require_id(Operation::Get, id)?;
        let key = self.item_key(&id);

        if let Some(cached) = self.deps.cache.read(&key).filter(|c| !c.stale) {
            return Ok(decode_record(&self.names.entity_type, cached.value));
        }

        let Some(get) = self.ops.get.clone() else {
            log::warn!(
                "{}: adapter has no `{}`, returning no record",
                self.names.entity_type,
                self.names.operation_name(Operation::Get)
            );
            return Ok(None);
        };

        let generation = self.deps.cache.generation(&key);
        let _pending = self.pending.start(Operation::Get);
        let response = get(id, token).await.map_err(ResourceError::Transport)?;
        self.deps.cache.write(key, response.clone(), generation);
        Ok(decode_record(&self.names.entity_type, response))
    }

    /// Returns the created record when the response can be decoded.
    pub async fn create(&self, data: T::Draft) -> Result<Option<T>, ResourceError> {
        let token = self.require_token(Operation::Create)?;
        let create = self.require_op(Operation::Create, self.ops.create.clone())?;

        let _pending = self.pending.start(Operation::Create);
        let result = create(data, token).await;
        let response = self.settle(Operation::Create, None, result)?;
        Ok(decode_record(&self.names.entity_type, response))
    }

    pub async fn update(&self, id: &str, data: T::Draft) -> Result<Option<T>, ResourceError> {
        let token = self.require_token(Operation::Update)?;
        let id = self.require_id(Operation::Update, id)?;
        let update = self.require_op(Operation::Update, self.ops.update.clone())?;

        let _pending = self.pending.start(Operation::Update);
        let result = update(id.clone(), data, token).await;
        let response = self.settle(Operation::Update, Some(&id), result)?;
        Ok(decode_record(&self.names.entity_type, response))
    }

    pub async fn remove(&self, id: &str) -> Result<(), ResourceError> {
        let token = self.require_token(Operation::Delete)?;
        let id = self.require_id(Operation::Delete, id)?;
        let delete = self.require_op(Operation::Delete, self.ops.delete.clone())?;

        let _pending = self.pending.start(Operation::Delete);
        let result = delete(id.clone(), token).await.map(|_| Value::Null);
        self.settle(Operation::Delete, Some(&id), result)?;
        Ok(())
    }

    fn decode_list(&self, response: Value) -> Vec<T> {
        decode_rows(&self.names.entity_type, normalize_list(response))
    }

    fn require_token(&self, op: Operation) -> Result<String, ResourceError> {
        self.deps
            .auth
            .token()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ResourceError::NotAuthenticated {
                operation: self.names.operation_name(op),
            })
    }

    fn require_id(&self, op: Operation, id: &str) -> Result<String, ResourceError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ResourceError::MissingId {
                operation: self.names.operation_name(op),
            });
        }
        Ok(id.to_string())
    }

    fn require_op<F>(&self, op: Operation, f: Option<F>) -> Result<F, ResourceError> {
        f.ok_or_else(|| {
            let error = ResourceError::MissingOperation {
                entity: self.names.entity_type.clone(),
                name: self.names.operation_name(op),
            };
            log::error!("{}", error);
            self.deps
                .notices
                .notify(Notice::failure(&self.names, op, &error.to_string()));
            error
        })
    }

    fn settle(
        &self,
        op: Operation,
        id: Option<&str>,
        result: Result<Value, String>,
    ) -> Result<Value, ResourceError> {
        match result {
            Ok(response) => {
                self.deps.cache.invalidate(&self.list_key());
                if let Some(id) = id {
                    self.deps.cache.invalidate(&self.item_key(id));
                }
                self.deps.notices.notify(Notice::success(&self.names, op));
                Ok(response)
            }
            Err(message) => {
                log::error!(
                    "{} failed: {}",
                    self.names.operation_name(op),
                    message
                );
                self.deps
                    .notices
                    .notify(Notice::failure(&self.names, op, &message));
                Err(ResourceError::Transport(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::resource::cache::{CachedValue, MemoryCache};
    use crate::shared::resource::notice::NoticeVariant;
    use crate::shared::resource::registry::ResourceRegistry;
    use serde::{Deserialize, Serialize};
    use leptos::prelude::ArcMemo;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Connector {
        id: String,
        connector_id: u32,
        status: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct ConnectorDraft {
        connector_id: u32,
        status: String,
    }

    impl Resource for Connector {
        const ENTITY_TYPE: &'static str = "Connector";
        type Draft = ConnectorDraft;
    }

    type Journal = Arc<Mutex<Vec<String>>>;

    fn push(journal: &Journal, entry: impl Into<String>) {
        journal.lock().unwrap().push(entry.into());
    }

    struct RecordingCache {
        inner: MemoryCache,
        journal: Journal,
    }

    impl QueryCache for RecordingCache {
        fn read(&self, key: &CacheKey) -> Option<CachedValue> {
            self.inner.read(key)
        }

        fn generation(&self, key: &CacheKey) -> u64 {
            self.inner.generation(key)
        }

        fn write(&self, key: CacheKey, value: Value, generation: u64) {
            push(&self.journal, format!("write:{}", key));
            self.inner.write(key, value, generation);
        }

        fn invalidate(&self, key: &CacheKey) {
            push(&self.journal, format!("invalidate:{}", key));
            self.inner.invalidate(key);
        }
    }

    struct StaticToken(Option<String>);

    impl TokenSource for StaticToken {
        fn token(&self) -> Option<String> {
            self.0.clone()
        }
    }

    struct RecordingSink(Arc<Mutex<Vec<Notice>>>);

    impl NoticeSink for RecordingSink {
        fn notify(&self, notice: Notice) {
            self.0.lock().unwrap().push(notice);
        }
    }

    struct Fixture {
        journal: Journal,
        cache: MemoryCache,
        notices: Arc<Mutex<Vec<Notice>>>,
        token: Option<String>,
    }

    impl Fixture {
        fn new(token: Option<&str>) -> Self {
            Self {
                journal: Arc::new(Mutex::new(Vec::new())),
                cache: MemoryCache::new(),
                notices: Arc::new(Mutex::new(Vec::new())),
                token: token.map(str::to_string),
            }
        }

        fn deps(&self) -> ResourceDeps {
            ResourceDeps {
                auth: Arc::new(StaticToken(self.token.clone())),
                cache: Arc::new(RecordingCache {
                    inner: self.cache.clone(),
                    journal: self.journal.clone(),
                }),
                notices: Arc::new(RecordingSink(self.notices.clone())),
            }
        }

        fn journal(&self) -> Vec<String> {
            self.journal.lock().unwrap().clone()
        }

        fn notices(&self) -> Vec<Notice> {
            self.notices.lock().unwrap().clone()
        }

        fn calls(&self, entry: &str) -> usize {
            self.journal().iter().filter(|e| *e == entry).count()
        }

        fn position(&self, entry: &str) -> usize {
            self.journal()
                .iter()
                .position(|e| e == entry)
                .unwrap_or_else(|| panic!("`{}` not in journal {:?}", entry, self.journal()))
        }

        /// get_connectors / create / update / delete; no get_connector.
        fn connector_bundle(&self) -> OperationBundle<Connector> {
            let j_list = self.journal.clone();
            let j_create = self.journal.clone();
            let j_update = self.journal.clone();
            let j_delete = self.journal.clone();
            OperationBundle::new()
                .list(move |_token| {
                    let journal = j_list.clone();
                    async move {
                        push(&journal, "adapter:list");
                        Ok::<_, String>(json!({"data": {"results": [
                            {"id": "1", "connector_id": 1, "status": "Available"},
                            {"id": "2", "connector_id": 2, "status": "Charging"}
                        ]}}))
                    }
                })
                .create(move |data: ConnectorDraft, _token| {
                    let journal = j_create.clone();
                    async move {
                        push(&journal, "adapter:create");
                        Ok::<_, String>(json!({
                            "id": "7",
                            "connector_id": data.connector_id,
                            "status": data.status
                        }))
                    }
                })
                .update(move |id, data: ConnectorDraft, _token| {
                    let journal = j_update.clone();
                    async move {
                        push(&journal, "adapter:update");
                        if data.status == "Broken" {
                            return Err("HTTP 422: unknown status".to_string());
                        }
                        Ok(json!({"data": {
                            "id": id,
                            "connector_id": data.connector_id,
                            "status": data.status
                        }}))
                    }
                })
                .delete(move |_id, _token| {
                    let journal = j_delete.clone();
                    async move {
                        push(&journal, "adapter:delete");
                        Ok::<_, String>(())
                    }
                })
        }

        fn bind(&self, bundle: OperationBundle<Connector>) -> ResourceBinding<Connector> {
            let registry = ResourceRegistry::default();
            registry.register(bundle).unwrap();
            registry.bind::<Connector>(self.deps())
        }
    }

    type Gates = Arc<Mutex<VecDeque<oneshot::Receiver<()>>>>;

    /// `n` gates; adapter calls take them in order and wait until the
    /// matching sender fires. Calls past the last gate go straight through.
    fn gates(n: usize) -> (VecDeque<oneshot::Sender<()>>, Gates) {
        let (senders, receivers): (VecDeque<_>, VecDeque<_>) =
            (0..n).map(|_| oneshot::channel()).unzip();
        (senders, Arc::new(Mutex::new(receivers)))
    }

    async fn pass(gate: Option<oneshot::Receiver<()>>) {
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }

    fn draft(connector_id: u32, status: &str) -> ConnectorDraft {
        ConnectorDraft {
            connector_id,
            status: status.to_string(),
        }
    }

    #[tokio::test]
    async fn test_connector_binding_end_to_end() {
        let fx = Fixture::new(Some("token"));
        let binding = fx.bind(fx.connector_bundle());
        assert_eq!(binding.names().plural, "Connectors");

        let created = binding.create(draft(7, "Available")).await.unwrap();
        assert_eq!(created.map(|c| c.connector_id), Some(7));
        assert!(fx.journal().contains(&"invalidate:[connectors]".to_string()));

        let notices = fx.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].variant, NoticeVariant::Success);
        assert_eq!(notices[0].title, "Connector created");

        let rows = binding.list().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].status, "Charging");
    }

    #[tokio::test]
    async fn test_update_invalidates_before_resolving() {
        let fx = Fixture::new(Some("token"));
        let binding = fx.bind(fx.connector_bundle());

        binding.list().await.unwrap();
        binding.list().await.unwrap();
        assert_eq!(fx.calls("adapter:list"), 1, "second list is served from cache");

        let updated = binding.update("2", draft(2, "Faulted")).await.unwrap();
        push(&fx.journal, "resolved:update");
        assert_eq!(updated.map(|c| c.status), Some("Faulted".to_string()));

        let resolved = fx.position("resolved:update");
        assert!(fx.position("adapter:update") < fx.position("invalidate:[connectors]"));
        assert!(fx.position("invalidate:[connectors]") < resolved);
        assert!(fx.position("invalidate:[connector, 2]") < resolved);
        assert_eq!(fx.cache.is_stale(&binding.list_key()), Some(true));

        binding.list().await.unwrap();
        assert_eq!(fx.calls("adapter:list"), 2, "stale list is refetched");
    }

    #[tokio::test]
    async fn test_missing_write_operation_fails_loudly() {
        let fx = Fixture::new(Some("token"));
        let mut bundle = fx.connector_bundle();
        bundle.delete = None;
        bundle.list = None;
        let binding = fx.bind(bundle);

        let err = binding.remove("1").await.unwrap_err();
        assert_eq!(
            err,
            ResourceError::MissingOperation {
                entity: "Connector".to_string(),
                name: "delete_connector".to_string(),
            }
        );
        assert!(err.to_string().contains("delete_connector"));
        assert_eq!(fx.notices()[0].variant, NoticeVariant::Error);

        assert_eq!(binding.list().await.unwrap(), Vec::<Connector>::new());
    }

    #[tokio::test]
    async fn test_missing_get_yields_no_record() {
        let fx = Fixture::new(Some("token"));
        let binding = fx.bind(fx.connector_bundle());
        assert_eq!(binding.get_by_id("1").await.unwrap(), None);
        assert!(fx.journal().is_empty());
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_io() {
        let fx = Fixture::new(None);
        let binding = fx.bind(fx.connector_bundle());

        let err = binding.list().await.unwrap_err();
        assert!(matches!(err, ResourceError::NotAuthenticated { .. }));
        let err = binding.create(draft(1, "Available")).await.unwrap_err();
        assert!(matches!(err, ResourceError::NotAuthenticated { .. }));
        assert!(fx.journal().is_empty());
        assert!(fx.notices().is_empty());
    }

    #[tokio::test]
    async fn test_blank_id_fails_before_io() {
        let fx = Fixture::new(Some("token"));
        let binding = fx.bind(fx.connector_bundle());

        let err = binding.update("  ", draft(1, "Available")).await.unwrap_err();
        assert_eq!(
            err,
            ResourceError::MissingId {
                operation: "update_connector".to_string()
            }
        );
        assert!(binding.remove("").await.is_err());
        assert!(fx.journal().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported_and_returned() {
        let fx = Fixture::new(Some("token"));
        let binding = fx.bind(fx.connector_bundle());

        let err = binding.update("2", draft(2, "Broken")).await.unwrap_err();
        assert_eq!(err, ResourceError::Transport("HTTP 422: unknown status".to_string()));

        let notices = fx.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].variant, NoticeVariant::Error);
        assert_eq!(notices[0].description, "HTTP 422: unknown status");
        assert!(!fx.journal().iter().any(|e| e.starts_with("invalidate:")));
        assert!(!binding.is_pending(Operation::Update));
    }

    #[tokio::test]
    async fn test_keyed_lists_share_the_namespace() {
        let fx = Fixture::new(Some("token"));
        let binding = fx.bind(fx.connector_bundle());

        binding.list_keyed(&["status=Available"]).await.unwrap();
        assert!(fx.journal().contains(&"write:[connectors, status=Available]".to_string()));

        binding.remove("1").await.unwrap();
        let key = binding.list_key().with("status=Available");
        assert_eq!(fx.cache.is_stale(&key), Some(true));
    }

    #[tokio::test]
    async fn test_unregistered_entity_degrades_on_reads() {
        let fx = Fixture::new(Some("token"));
        let binding = ResourceRegistry::default().bind::<Connector>(fx.deps());
        assert!(binding.list().await.unwrap().is_empty());
        assert!(binding.create(draft(1, "Available")).await.is_err());
    }

    #[tokio::test]
    async fn test_list_loaded_across_an_update_is_refetched() {
        let fx = Fixture::new(Some("token"));
        let status = Arc::new(Mutex::new("Available".to_string()));
        let (mut open, queue) = gates(1);

        let (s_list, s_update, j_list) = (status.clone(), status.clone(), fx.journal.clone());
        let bundle = OperationBundle::new()
            .list(move |_token| {
                // the server answers with the state it saw on arrival
                let seen = s_list.lock().unwrap().clone();
                let gate = queue.lock().unwrap().pop_front();
                let journal = j_list.clone();
                async move {
                    push(&journal, "adapter:list");
                    pass(gate).await;
                    Ok::<_, String>(json!([{"id": "1", "connector_id": 1, "status": seen}]))
                }
            })
            .update(move |id, data: ConnectorDraft, _token| {
                let status = s_update.clone();
                async move {
                    *status.lock().unwrap() = data.status.clone();
                    Ok::<_, String>(json!({
                        "id": id,
                        "connector_id": data.connector_id,
                        "status": data.status
                    }))
                }
            });
        let binding = fx.bind(bundle);

        let (first, _) = tokio::join!(binding.list(), async {
            binding.update("1", draft(1, "Faulted")).await.unwrap();
            let _ = open.pop_front().unwrap().send(());
        });
        assert_eq!(first.unwrap()[0].status, "Available");
        assert_eq!(fx.cache.is_stale(&binding.list_key()), Some(true));
        assert!(!binding.has_fresh_list());

        let rows = binding.list().await.unwrap();
        assert_eq!(fx.calls("adapter:list"), 2);
        assert_eq!(rows[0].status, "Faulted");
        assert!(binding.has_fresh_list());
    }

    #[tokio::test]
    async fn test_pending_flag_spans_success_and_failure() {
        let fx = Fixture::new(Some("token"));
        let (mut open, queue) = gates(2);
        let bundle = OperationBundle::new().update(move |id, data: ConnectorDraft, _token| {
            let gate = queue.lock().unwrap().pop_front();
            async move {
                pass(gate).await;
                if data.status == "Broken" {
                    return Err("HTTP 422: unknown status".to_string());
                }
                Ok(json!({"id": id, "connector_id": data.connector_id, "status": data.status}))
            }
        });
        let binding = fx.bind(bundle);
        let watched = binding.clone();
        let updating = ArcMemo::new(move |_| watched.is_pending(Operation::Update));
        assert!(!updating.get());

        let (result, during) = tokio::join!(binding.update("1", draft(1, "Faulted")), async {
            let during = updating.get();
            let _ = open.pop_front().unwrap().send(());
            during
        });
        assert!(result.is_ok());
        assert!(during);
        assert!(!updating.get());

        let (result, during) = tokio::join!(binding.update("1", draft(1, "Broken")), async {
            let during = updating.get();
            let _ = open.pop_front().unwrap().send(());
            during
        });
        assert!(result.is_err());
        assert!(during);
        assert!(!updating.get());
        assert!(!binding.is_pending(Operation::List));
    }

    #[tokio::test]
    async fn test_fresh_item_follows_the_cache() {
        let fx = Fixture::new(Some("token"));
        let bundle = fx.connector_bundle().get(|id, _token| async move {
            Ok::<_, String>(json!({"data": {"id": id, "connector_id": 3, "status": "Charging"}}))
        });
        let binding = fx.bind(bundle);

        assert!(!binding.has_fresh_item("3"));
        binding.get_by_id("3").await.unwrap();
        assert!(binding.has_fresh_item(" 3 "));

        binding.remove("3").await.unwrap();
        assert!(!binding.has_fresh_item("3"));
    }
}
