pub mod a001_charger;
pub mod a002_connector;
pub mod a003_party;
pub mod a004_tenant;

use crate::shared::resource::{RegistryError, ResourceRegistry};

/// Registers the operation bundle of every aggregate shown in the console.
pub fn register_resources(registry: &ResourceRegistry) -> Result<(), RegistryError> {
    registry.register(a001_charger::api::bundle())?;
    registry.register(a002_connector::api::bundle())?;
    registry.register(a003_party::api::bundle())?;
    registry.register(a004_tenant::api::bundle())?;
    Ok(())
}
