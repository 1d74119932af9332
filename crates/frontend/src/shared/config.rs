//! Console configuration: embedded TOML defaults, optionally replaced by a
//! document stored in localStorage under [`CONFIG_STORAGE_KEY`].

use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::shared::components::pagination_controls::PaginationVisibility;
use crate::shared::components::table::CellFallback;
use crate::shared::resource::Pluralizer;

pub const CONFIG_STORAGE_KEY: &str = "console_config";

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000

[table]
fallback = "not_available"
empty_message = "No records found"
page_size = 20
page_size_options = [10, 20, 50, 100]
pagination = "hide_single_page"
tooltip_max_chars = 40

[resources.plurals]
Party = "Parties"
"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid console config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("table.page_size must be greater than zero")]
    ZeroPageSize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub api: ApiConfig,
    pub table: TableConfig,
    pub resources: ResourcesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend port on the page's host
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub fallback: CellFallback,
    pub empty_message: String,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub pagination: PaginationVisibility,
    pub tooltip_max_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Irregular plurals, entity type -> plural
    pub plurals: BTreeMap<String, String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            table: TableConfig::default(),
            resources: ResourcesConfig {
                plurals: BTreeMap::from([("Party".to_string(), "Parties".to_string())]),
            },
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            fallback: CellFallback::NotAvailable,
            empty_message: "No records found".to_string(),
            page_size: 20,
            page_size_options: vec![10, 20, 50, 100],
            pagination: PaginationVisibility::HideSinglePage,
            tooltip_max_chars: 40,
        }
    }
}

impl ConsoleConfig {
    pub fn pluralizer(&self) -> Pluralizer {
        Pluralizer::with_overrides(self.resources.plurals.clone())
    }
}

/// Parse a TOML document; absent keys keep their defaults.
pub fn parse_config(contents: &str) -> Result<ConsoleConfig, ConfigError> {
    let config: ConsoleConfig = toml::from_str(contents)?;
    if config.table.page_size == 0 {
        return Err(ConfigError::ZeroPageSize);
    }
    Ok(config)
}

fn stored_override() -> Option<String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(CONFIG_STORAGE_KEY).ok().flatten())
}

/// Load configuration
///
/// Search order:
/// 1. localStorage `console_config`
/// 2. Falls back to embedded default config
pub fn load_config() -> ConsoleConfig {
    if let Some(contents) = stored_override() {
        match parse_config(&contents) {
            Ok(config) => {
                log::info!("Loading config from localStorage `{}`", CONFIG_STORAGE_KEY);
                return config;
            }
            Err(e) => log::warn!("{}; using defaults", e),
        }
    }

    log::debug!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::error!("{}", e);
        ConsoleConfig::default()
    })
}

/// Config from context, defaults when none was provided.
pub fn use_config() -> ConsoleConfig {
    use_context::<ConsoleConfig>().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.table.fallback, CellFallback::NotAvailable);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = parse_config(
            r#"
            [table]
            fallback = "blank"
            pagination = "always"
            "#,
        )
        .unwrap();
        assert_eq!(config.table.fallback, CellFallback::Blank);
        assert_eq!(config.table.pagination, PaginationVisibility::Always);
        assert_eq!(config.table.page_size, 20);
        assert_eq!(config.api.port, 3000);
    }

    #[test]
    fn plural_overrides_reach_the_pluralizer() {
        let config = parse_config(
            r#"
            [resources.plurals]
            Party = "Parties"
            Chargebox = "Chargeboxes"
            "#,
        )
        .unwrap();
        let pluralizer = config.pluralizer();
        assert_eq!(pluralizer.plural("Chargebox"), "Chargeboxes");
        assert_eq!(pluralizer.plural("Party"), "Parties");
        assert_eq!(pluralizer.plural("Charger"), "Chargers");
    }

    #[test]
    fn invalid_documents_are_rejected() {
        assert!(matches!(parse_config("[table]\npage_size = 0"), Err(ConfigError::ZeroPageSize)));
        assert!(matches!(parse_config("[table\n"), Err(ConfigError::Parse(_))));
        assert!(parse_config("[table]\nfallback = \"dash\"").is_err());
    }
}
