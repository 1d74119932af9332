//! Row identity for keyed rendering and action correlation.

use serde_json::Value;
use std::sync::Arc;

use super::cell::resolve_path;

/// How the table derives a row's key.
///
/// Prefer [`RowKey::derive`]: it is stable for the same record no matter
/// where the row sits. [`RowKey::field`] falls back to `"row-<index>"` when
/// the field is null or absent, and such positional keys change whenever
/// sorting, filtering or paging moves the row.
pub enum RowKey<T> {
    Field(String),
    Derive(Arc<dyn Fn(&T) -> String + Send + Sync>),
}

impl<T> Clone for RowKey<T> {
    fn clone(&self) -> Self {
        match self {
            RowKey::Field(f) => RowKey::Field(f.clone()),
            RowKey::Derive(f) => RowKey::Derive(Arc::clone(f)),
        }
    }
}

impl<T> RowKey<T> {
    pub fn field(name: impl Into<String>) -> Self {
        RowKey::Field(name.into())
    }

    pub fn derive<F>(f: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        RowKey::Derive(Arc::new(f))
    }

    pub fn key_for(&self, row: &T, json: &Value, index: usize) -> String {
        match self {
            RowKey::Derive(f) => f(row),
            RowKey::Field(name) => match resolve_path(json, name) {
                Some(Value::String(s)) if !s.is_empty() => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => format!("row-{}", index),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(key: &RowKey<Value>, rows: &[Value]) -> Vec<String> {
        rows.iter()
            .enumerate()
            .map(|(i, r)| key.key_for(r, r, i))
            .collect()
    }

    #[test]
    fn field_key_uses_field_value() {
        let rows = vec![json!({"id": "c-1"}), json!({"id": 42})];
        assert_eq!(keys(&RowKey::field("id"), &rows), vec!["c-1", "42"]);
    }

    #[test]
    fn positional_fallback_is_not_stable_across_sort() {
        let mut rows = vec![json!({"name": "b"}), json!({"name": "a"})];
        let key = RowKey::field("id");
        let before = key.key_for(&rows[0], &rows[0], 0);
        assert_eq!(before, "row-0");

        rows.sort_by(|a, b| a["name"].as_str().cmp(&b["name"].as_str()));
        // the record "b" now sits at index 1 and gets a different key
        let position = rows.iter().position(|r| r["name"] == "b").unwrap();
        let after = key.key_for(&rows[position], &rows[position], position);
        assert_eq!(after, "row-1");
        assert_ne!(before, after);
    }

    #[test]
    fn derived_key_survives_sort() {
        let mut rows = vec![json!({"name": "b"}), json!({"name": "a"})];
        let key = RowKey::<Value>::derive(|r| format!("name:{}", r["name"].as_str().unwrap_or("")));
        let before = keys(&key, &rows);
        rows.reverse();
        let mut after = keys(&key, &rows);
        after.reverse();
        assert_eq!(before, after);
    }
}
