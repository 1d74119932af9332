//! Cell resolution: turns one row + one column into what the table shows.
//!
//! Order of precedence:
//! 1. custom renderer, returned as is;
//! 2. accessor value (dotted path over the row's JSON form, or a getter);
//! 3. fallback literal when the path hits null or a missing field;
//! 4. display coercion (`Yes`/`No`, `DD.MM.YYYY`, plain text).

use leptos::prelude::AnyView;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

use super::column::Column;
use crate::shared::date_utils::{parse_date_like, DateLike};

/// What a cell shows when its value is null or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellFallback {
    /// "N/A"
    #[default]
    NotAvailable,
    /// empty cell
    Blank,
}

impl CellFallback {
    pub fn text(self) -> &'static str {
        match self {
            CellFallback::NotAvailable => "N/A",
            CellFallback::Blank => "",
        }
    }
}

/// Typed value of a cell before formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(DateLike),
}

impl CellValue {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Missing,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => CellValue::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => match parse_date_like(s) {
                Some(date) => CellValue::Date(date),
                None => CellValue::Text(s.clone()),
            },
            other => CellValue::Text(other.to_string()),
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn display(&self, fallback: CellFallback) -> String {
        match self {
            CellValue::Missing => fallback.text().to_string(),
            CellValue::Bool(true) => "Yes".to_string(),
            CellValue::Bool(false) => "No".to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Date(d) => d.format(),
        }
    }

    /// Ordering used by client-side sorting. Missing values sort after
    /// everything else; mixed kinds compare by their display text.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Missing, Missing) => Ordering::Equal,
            (Missing, _) => Ordering::Greater,
            (_, Missing) => Ordering::Less,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Int(a), Float(b)) => (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal),
            (Float(a), Int(b)) => a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal),
            (Float(a), Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Date(a), Date(b)) => a.instant().cmp(&b.instant()),
            (Text(a), Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (a, b) => a
                .display(CellFallback::Blank)
                .to_lowercase()
                .cmp(&b.display(CellFallback::Blank).to_lowercase()),
        }
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(v: Option<V>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Missing)
    }
}

/// Resolved cell: either the column's own view or formatted text.
pub enum CellContent {
    Rendered(AnyView),
    Text(String),
}

/// JSON form of a row, the input of accessor paths.
pub fn row_json<T: Serialize>(row: &T) -> Value {
    serde_json::to_value(row).unwrap_or(Value::Null)
}

/// Follows a dotted path. Stops at the first null, missing field or
/// non-traversable value. Array segments are numeric indices.
pub fn resolve_path<'a>(row: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    let mut current = row;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
        if current.is_null() {
            return None;
        }
    }
    Some(current)
}

/// Text of a cell, ignoring any custom renderer. The tooltip overlay and
/// client-side search use this same function.
pub fn resolve_text<T>(row: &T, json: &Value, column: &Column<T>, fallback: CellFallback) -> String {
    match column.value(row, json) {
        Some(value) => value.display(column.fallback.unwrap_or(fallback)),
        None => String::new(),
    }
}

pub fn resolve_cell<T>(
    row: &T,
    json: &Value,
    column: &Column<T>,
    fallback: CellFallback,
) -> CellContent {
    if let Some(render) = &column.render {
        return CellContent::Rendered(render(row));
    }
    CellContent::Text(resolve_text(row, json, column, fallback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::prelude::IntoAny;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::sync::Arc;

    fn text_of(row: &Value, column: &Column<Value>, fallback: CellFallback) -> String {
        match resolve_cell(row, row, column, fallback) {
            CellContent::Text(t) => t,
            CellContent::Rendered(_) => panic!("expected text"),
        }
    }

    #[test]
    fn null_segment_short_circuits_to_fallback() {
        let row = json!({"a": {"b": null}});
        let column = Column::<Value>::path("C", "a.b.c");
        assert_eq!(text_of(&row, &column, CellFallback::NotAvailable), "N/A");
        assert_eq!(text_of(&row, &column, CellFallback::Blank), "");
    }

    #[test]
    fn missing_and_non_object_segments_fall_back() {
        let row = json!({"user": {"name": "Ann"}, "count": 3});
        assert_eq!(
            text_of(&row, &Column::path("X", "user.email"), CellFallback::NotAvailable),
            "N/A"
        );
        assert_eq!(
            text_of(&row, &Column::path("X", "count.value"), CellFallback::NotAvailable),
            "N/A"
        );
        assert_eq!(
            text_of(&row, &Column::path("X", "user.name"), CellFallback::NotAvailable),
            "Ann"
        );
    }

    #[test]
    fn zero_and_empty_string_are_values() {
        let row = json!({"count": 0, "note": ""});
        assert_eq!(
            text_of(&row, &Column::path("Count", "count"), CellFallback::NotAvailable),
            "0"
        );
        assert_eq!(
            text_of(&row, &Column::path("Note", "note"), CellFallback::NotAvailable),
            ""
        );
    }

    #[test]
    fn coercions() {
        let row = json!({
            "online": true,
            "archived": false,
            "power": 22.5,
            "seen": "2024-03-15T14:02:26Z",
            "born": "2024-03-15",
            "tags": ["a", "b"]
        });
        let f = CellFallback::NotAvailable;
        assert_eq!(text_of(&row, &Column::path("", "online"), f), "Yes");
        assert_eq!(text_of(&row, &Column::path("", "archived"), f), "No");
        assert_eq!(text_of(&row, &Column::path("", "power"), f), "22.5");
        assert_eq!(text_of(&row, &Column::path("", "seen"), f), "15.03.2024 14:02:26");
        assert_eq!(text_of(&row, &Column::path("", "born"), f), "15.03.2024");
        assert_eq!(text_of(&row, &Column::path("", "tags.1"), f), "b");
        assert_eq!(text_of(&row, &Column::path("", "tags.7"), f), "N/A");
    }

    #[test]
    fn column_fallback_overrides_table_fallback() {
        let row = json!({});
        let column = Column::<Value>::path("Name", "name").fallback(CellFallback::Blank);
        assert_eq!(text_of(&row, &column, CellFallback::NotAvailable), "");
    }

    #[test]
    fn column_without_source_is_empty() {
        let row = json!({"name": "x"});
        let column = Column::<Value>::new("Nothing");
        assert_eq!(text_of(&row, &column, CellFallback::NotAvailable), "");
    }

    #[test]
    fn renderer_overrides_accessor() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let column = Column::<Value>::path("Status", "status").with_render(move |_| {
            seen.fetch_add(1, AtomicOrdering::SeqCst);
            "custom".into_any()
        });
        let row = json!({"status": null});
        assert!(matches!(
            resolve_cell(&row, &row, &column, CellFallback::NotAvailable),
            CellContent::Rendered(_)
        ));
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 1);
        // text path still available for search and tooltips
        assert_eq!(resolve_text(&row, &row, &column, CellFallback::NotAvailable), "N/A");
    }

    #[test]
    fn compare_puts_missing_last() {
        assert_eq!(CellValue::Missing.compare(&CellValue::Int(1)), Ordering::Greater);
        assert_eq!(CellValue::Int(2).compare(&CellValue::Float(10.0)), Ordering::Less);
        assert_eq!(
            CellValue::text("beta").compare(&CellValue::text("Alpha")),
            Ordering::Greater
        );
    }
}
