//! Column model of [`DataTable`](super::DataTable).
//!
//! ```rust
//! let columns = vec![
//!     Column::path("Charge point", "charge_point_id").tooltip().sortable(),
//!     Column::path("City", "location.city"),
//!     Column::computed("Connectors", |c: &Charger| c.connector_count.into()),
//!     Column::path("Status", "status").with_render(|c: &Charger| status_badge(c)),
//! ];
//! ```

use leptos::prelude::AnyView;
use serde_json::Value;
use std::sync::Arc;

use super::cell::{resolve_path, CellFallback, CellValue};

pub type CellRenderer<T> = Arc<dyn Fn(&T) -> AnyView + Send + Sync>;
pub type CellGetter<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Where a column reads its value from.
pub enum Accessor<T> {
    /// Dotted path over the serialized row, e.g. `"location.city"`.
    Path(String),
    /// Typed getter.
    Get(CellGetter<T>),
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Path(p) => Accessor::Path(p.clone()),
            Accessor::Get(f) => Accessor::Get(Arc::clone(f)),
        }
    }
}

pub struct Column<T> {
    /// Identifier used as sort field; the path for path columns.
    pub id: String,
    pub header: String,
    pub accessor: Option<Accessor<T>>,
    pub render: Option<CellRenderer<T>>,
    pub class: Option<String>,
    pub min_width: f64,
    pub max_width: Option<f64>,
    pub tooltip: bool,
    /// Overrides the table-wide fallback.
    pub fallback: Option<CellFallback>,
    pub sortable: bool,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            render: self.render.clone(),
            class: self.class.clone(),
            min_width: self.min_width,
            max_width: self.max_width,
            tooltip: self.tooltip,
            fallback: self.fallback,
            sortable: self.sortable,
        }
    }
}

impl<T> Column<T> {
    pub const DEFAULT_MIN_WIDTH: f64 = 100.0;

    /// Column with neither accessor nor renderer: renders empty cells.
    pub fn new(header: impl Into<String>) -> Self {
        let header = header.into();
        Self {
            id: header.to_lowercase().replace(' ', "_"),
            header,
            accessor: None,
            render: None,
            class: None,
            min_width: Self::DEFAULT_MIN_WIDTH,
            max_width: None,
            tooltip: false,
            fallback: None,
            sortable: false,
        }
    }

    pub fn path(header: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        let mut column = Self::new(header);
        column.id = path.clone();
        column.accessor = Some(Accessor::Path(path));
        column
    }

    pub fn computed<F>(header: impl Into<String>, get: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        let mut column = Self::new(header);
        column.accessor = Some(Accessor::Get(Arc::new(get)));
        column
    }

    /// Column shown only through a custom view.
    pub fn rendered<F>(header: impl Into<String>, render: F) -> Self
    where
        F: Fn(&T) -> AnyView + Send + Sync + 'static,
    {
        Self::new(header).with_render(render)
    }

    /// Replaces the cell view. The accessor, if any, still drives
    /// search, sort and the tooltip text.
    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&T) -> AnyView + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn min_width(mut self, width: f64) -> Self {
        self.min_width = width;
        self
    }

    pub fn max_width(mut self, width: f64) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn tooltip(mut self) -> Self {
        self.tooltip = true;
        self
    }

    pub fn fallback(mut self, fallback: CellFallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Raw value of the cell, `None` when the column has no accessor.
    pub fn value(&self, row: &T, json: &Value) -> Option<CellValue> {
        match self.accessor.as_ref()? {
            Accessor::Path(path) => Some(
                resolve_path(json, path)
                    .map(CellValue::from_json)
                    .unwrap_or(CellValue::Missing),
            ),
            Accessor::Get(get) => Some(get(row)),
        }
    }

    /// Inline style with the width hints.
    pub fn cell_style(&self) -> String {
        match self.max_width {
            Some(max) => format!("min-width: {}px; max-width: {}px;", self.min_width, max),
            None => format!("min-width: {}px;", self.min_width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_column_uses_path_as_id() {
        let column = Column::<Value>::path("City", "location.city");
        assert_eq!(column.id, "location.city");
        let computed = Column::<Value>::computed("Last seen", |_| CellValue::Missing);
        assert_eq!(computed.id, "last_seen");
        assert_eq!(computed.clone().id("seen").id, "seen");
    }

    #[test]
    fn getter_and_path_values() {
        let row = json!({"power": 11});
        let by_path = Column::<Value>::path("Power", "power");
        let by_getter = Column::<Value>::computed("Twice", |r| {
            r.get("power")
                .and_then(Value::as_i64)
                .map(|p| p * 2)
                .into()
        });
        assert_eq!(by_path.value(&row, &row), Some(CellValue::Int(11)));
        assert_eq!(by_getter.value(&row, &row), Some(CellValue::Int(22)));
        assert_eq!(Column::<Value>::new("Empty").value(&row, &row), None);
    }

    #[test]
    fn width_hints() {
        let column = Column::<Value>::new("Id").min_width(80.0).max_width(200.0);
        assert_eq!(column.cell_style(), "min-width: 80px; max-width: 200px;");
    }
}
