//! Entity type → operation bundle map, filled once at startup.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::adapter::OperationBundle;
use super::binding::{ResourceBinding, ResourceDeps};
use super::entity::{Pluralizer, Resource, ResourceNames};
use super::error::RegistryError;

type AnyBundle = Arc<dyn Any + Send + Sync>;

#[derive(Clone, Default)]
pub struct ResourceRegistry {
    pluralizer: Pluralizer,
    bundles: Arc<RwLock<HashMap<&'static str, AnyBundle>>>,
}

impl ResourceRegistry {
    pub fn new(pluralizer: Pluralizer) -> Self {
        Self {
            pluralizer,
            bundles: Arc::default(),
        }
    }

    pub fn names_of<T: Resource>(&self) -> ResourceNames {
        ResourceNames::new(T::ENTITY_TYPE, &self.pluralizer)
    }

    /// Registers the adapter of `T`. Partial bundles are accepted; the
    /// missing conventional functions are logged.
    pub fn register<T: Resource>(&self, bundle: OperationBundle<T>) -> Result<(), RegistryError> {
        let names = self.names_of::<T>();
        let missing: Vec<String> = bundle
            .missing()
            .into_iter()
            .map(|op| names.operation_name(op))
            .collect();
        if !missing.is_empty() {
            log::warn!(
                "{}: adapter registered without {}",
                T::ENTITY_TYPE,
                missing.join(", ")
            );
        }

        let mut bundles = self
            .bundles
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if bundles.contains_key(T::ENTITY_TYPE) {
            return Err(RegistryError::Duplicate(T::ENTITY_TYPE.to_string()));
        }
        bundles.insert(T::ENTITY_TYPE, Arc::new(bundle));
        log::debug!("registered {} ({})", T::ENTITY_TYPE, names.plural);
        Ok(())
    }

    /// Fails unless all five operations of `T` are registered.
    pub fn require_complete<T: Resource>(&self) -> Result<(), RegistryError> {
        let names = self.names_of::<T>();
        let missing: Vec<String> = match self.bundle::<T>() {
            Some(bundle) => bundle
                .missing()
                .into_iter()
                .map(|op| names.operation_name(op))
                .collect(),
            None => super::entity::Operation::ALL
                .into_iter()
                .map(|op| names.operation_name(op))
                .collect(),
        };
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::Incomplete {
                entity: T::ENTITY_TYPE.to_string(),
                missing,
            })
        }
    }

    pub fn is_registered(&self, entity_type: &str) -> bool {
        self.bundles
            .read()
            .map(|b| b.contains_key(entity_type))
            .unwrap_or(false)
    }

    /// Produces the bound operations of `T`. An unregistered entity gets
    /// an empty bundle: reads come back empty, writes fail.
    pub fn bind<T: Resource>(&self, deps: ResourceDeps) -> ResourceBinding<T> {
        let ops = self.bundle::<T>().unwrap_or_else(|| {
            log::warn!("{}: no adapter registered", T::ENTITY_TYPE);
            Arc::new(OperationBundle::new())
        });
        ResourceBinding::new(self.names_of::<T>(), ops, deps)
    }

    fn bundle<T: Resource>(&self) -> Option<Arc<OperationBundle<T>>> {
        let any = self.bundles.read().ok()?.get(T::ENTITY_TYPE).cloned()?;
        any.downcast::<OperationBundle<T>>().ok()
    }
}
