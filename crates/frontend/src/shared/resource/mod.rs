//! Resource binding: one factory call wires an entity type to list / get /
//! create / update / delete with cache keys and uniform outcome reporting.
//!
//! ```rust
//! let binding = use_resource::<Charger>();
//! let list = use_resource_list(binding.clone());
//! spawn_local(async move {
//!     let _ = binding.remove(&id).await;
//! });
//! ```

pub mod adapter;
pub mod binding;
pub mod cache;
pub mod entity;
pub mod envelope;
pub mod epoch;
pub mod error;
pub mod hooks;
pub mod notice;
pub mod registry;

pub use adapter::OperationBundle;
pub use binding::{ResourceBinding, ResourceDeps, TokenSource};
pub use cache::{CacheKey, MemoryCache, QueryCache};
pub use entity::{Operation, Pluralizer, Resource, ResourceNames};
pub use error::{RegistryError, ResourceError};
pub use hooks::{use_resource, use_resource_list, QueryClient, ResourceList};
pub use epoch::RequestEpoch;
pub use notice::{Notice, NoticeSink, NoticeVariant};
pub use registry::ResourceRegistry;
