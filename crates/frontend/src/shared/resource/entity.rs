//! Entity naming: pluralization, cache namespaces and conventional
//! adapter operation names derived from an entity type tag.

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

/// A domain type that can be bound to the CRUD lifecycle.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Entity type tag, e.g. "Charger" or "Party".
    const ENTITY_TYPE: &'static str;

    /// Payload accepted by create/update.
    type Draft: Serialize + Clone + 'static;
}

/// The five operations a binding exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::List,
        Operation::Get,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn is_write(self) -> bool {
        matches!(self, Operation::Create | Operation::Update | Operation::Delete)
    }

    /// Past-tense verb for notices.
    pub fn done_verb(self) -> &'static str {
        match self {
            Operation::List => "loaded",
            Operation::Get => "loaded",
            Operation::Create => "created",
            Operation::Update => "updated",
            Operation::Delete => "deleted",
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            Operation::List => "load",
            Operation::Get => "load",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

static DEFAULT_PLURALS: Lazy<HashMap<String, String>> =
    Lazy::new(|| HashMap::from([("Party".to_string(), "Parties".to_string())]));

/// Pluralizer with an explicit override table, checked before the `+ "s"` rule.
#[derive(Debug, Clone)]
pub struct Pluralizer {
    overrides: HashMap<String, String>,
}

impl Default for Pluralizer {
    fn default() -> Self {
        Self {
            overrides: DEFAULT_PLURALS.clone(),
        }
    }
}

impl Pluralizer {
    pub fn with_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut pluralizer = Self::default();
        pluralizer.overrides.extend(overrides);
        pluralizer
    }

    pub fn plural(&self, entity_type: &str) -> String {
        match self.overrides.get(entity_type) {
            Some(plural) => plural.clone(),
            None => format!("{}s", entity_type),
        }
    }
}

/// Names derived once per binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    pub entity_type: String,
    pub plural: String,
}

impl ResourceNames {
    pub fn new(entity_type: &str, pluralizer: &Pluralizer) -> Self {
        Self {
            entity_type: entity_type.to_string(),
            plural: pluralizer.plural(entity_type),
        }
    }

    /// Cache namespace of list queries: `lowercase(plural)`.
    pub fn list_namespace(&self) -> String {
        self.plural.to_lowercase()
    }

    /// Cache namespace of single-item queries: `lowercase(entity)`.
    pub fn item_namespace(&self) -> String {
        self.entity_type.to_lowercase()
    }

    /// Human label for notices, e.g. "charger".
    pub fn label(&self) -> String {
        to_snake_case(&self.entity_type).replace('_', " ")
    }

    /// Conventional adapter function name of an operation
    /// (`get_parties`, `get_party`, `create_party`, ...).
    pub fn operation_name(&self, op: Operation) -> String {
        let singular = to_snake_case(&self.entity_type);
        match op {
            Operation::List => format!("get_{}", to_snake_case(&self.plural)),
            Operation::Get => format!("get_{}", singular),
            Operation::Create => format!("create_{}", singular),
            Operation::Update => format!("update_{}", singular),
            Operation::Delete => format!("delete_{}", singular),
        }
    }
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_override_and_default_rule() {
        let p = Pluralizer::default();
        assert_eq!(p.plural("Party"), "Parties");
        assert_eq!(p.plural("Charger"), "Chargers");
        assert_eq!(p.plural("Connector"), "Connectors");
    }

    #[test]
    fn test_configured_overrides_extend_defaults() {
        let p = Pluralizer::with_overrides([("Tariff".to_string(), "Tariffs".to_string())]);
        assert_eq!(p.plural("Party"), "Parties");
        assert_eq!(p.plural("Tariff"), "Tariffs");
    }

    #[test]
    fn test_namespaces() {
        let names = ResourceNames::new("Party", &Pluralizer::default());
        assert_eq!(names.list_namespace(), "parties");
        assert_eq!(names.item_namespace(), "party");

        let names = ResourceNames::new("ChargingStation", &Pluralizer::default());
        assert_eq!(names.list_namespace(), "chargingstations");
    }

    #[test]
    fn test_operation_names() {
        let names = ResourceNames::new("Party", &Pluralizer::default());
        assert_eq!(names.operation_name(Operation::List), "get_parties");
        assert_eq!(names.operation_name(Operation::Get), "get_party");
        assert_eq!(names.operation_name(Operation::Delete), "delete_party");

        let names = ResourceNames::new("ChargingStation", &Pluralizer::default());
        assert_eq!(names.operation_name(Operation::List), "get_charging_stations");
        assert_eq!(names.operation_name(Operation::Update), "update_charging_station");
        assert_eq!(names.label(), "charging station");
    }
}
