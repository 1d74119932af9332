//! Generic table over any serializable row type.
//!
//! ```rust
//! <DataTable
//!     rows=list.rows
//!     is_loading=list.is_loading
//!     columns=columns
//!     row_key=RowKey::derive(|c: &Charger| c.id.clone())
//!     actions=RowActions::new().view(open_details)
//! />
//! ```

use leptos::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use thaw::*;

use super::cell::{resolve_cell, row_json, CellContent, CellFallback};
use super::cell_tooltip::CellTooltip;
use super::column::Column;
use super::layout::{TableShape, TableState};
use super::row_actions::{RowActions, RowActionsCell};
use super::row_key::RowKey;
use super::sortable_header_cell::{SortControl, SortableHeaderCell};
use crate::shared::config::use_config;
use crate::shared::list_utils::highlight_matches;

/// Class of a body row, fixed or computed per row.
pub enum RowClass<T> {
    Static(String),
    PerRow(Arc<dyn Fn(&T) -> String + Send + Sync>),
}

impl<T> RowClass<T> {
    pub fn per_row<F>(f: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        RowClass::PerRow(Arc::new(f))
    }

    pub fn class_for(&self, row: &T) -> String {
        match self {
            RowClass::Static(class) => class.clone(),
            RowClass::PerRow(f) => f(row),
        }
    }
}

#[derive(Clone)]
struct KeyedRow<T> {
    key: String,
    // re-render a row whose record changed under the same key
    fingerprint: String,
    row: T,
    json: Value,
}

struct CellOptions {
    fallback: CellFallback,
    tooltip_max_chars: usize,
    highlight: MaybeProp<String>,
}

fn render_cell<T>(row: &T, json: &Value, column: &Column<T>, opts: &CellOptions) -> AnyView {
    let content = match resolve_cell(row, json, column, opts.fallback) {
        CellContent::Rendered(view) => view,
        CellContent::Text(text) if column.tooltip => {
            view! { <CellTooltip text=text max_chars=opts.tooltip_max_chars /> }.into_any()
        }
        CellContent::Text(text) => {
            let highlight = opts.highlight;
            (move || highlight_matches(&text, &highlight.get().unwrap_or_default())).into_any()
        }
    };

    view! {
        <TableCell class=column.class.clone().unwrap_or_default() attr:style=column.cell_style()>
            <TableCellLayout truncate=true>{content}</TableCellLayout>
        </TableCell>
    }
    .into_any()
}

fn header_cell<T>(column: &Column<T>, sort: Option<SortControl>) -> AnyView {
    let header = column.header.clone();
    let min_width = column.min_width;
    let class = column.class.clone().unwrap_or_default();
    match sort {
        Some(sort) if column.sortable => {
            let sort_field = column.id.clone();
            view! {
                <SortableHeaderCell
                    label=header
                    sort_field=sort_field
                    sort=sort
                    min_width=min_width
                    class=class
                />
            }
            .into_any()
        }
        _ => view! {
            <TableHeaderCell resizable=true min_width=min_width class=format!("resizable {}", class)>
                {header}
            </TableHeaderCell>
        }
        .into_any(),
    }
}

/// Header and body for `rows` in one of three states: loading skeleton,
/// empty message, or one row per record. The action column appears only
/// when `actions` has at least one capability, in every state.
#[component]
pub fn DataTable<T>(
    #[prop(into)] rows: Signal<Vec<T>>,
    columns: Vec<Column<T>>,
    /// Identity of a row across renders
    row_key: RowKey<T>,
    #[prop(optional, into)] is_loading: MaybeProp<bool>,
    /// Message of the empty state (defaults from config)
    #[prop(optional, into)]
    empty_message: Option<String>,
    /// Fallback for null values (defaults from config)
    #[prop(optional)]
    fallback: Option<CellFallback>,
    #[prop(optional)] actions: Option<RowActions<T>>,
    #[prop(optional)] row_class: Option<RowClass<T>>,
    #[prop(optional)] on_row_click: Option<Callback<T>>,
    /// Sort state of the screen; sortable columns get clickable headers
    #[prop(optional)]
    sort: Option<SortControl>,
    /// Search text to highlight in plain text cells
    #[prop(optional, into)]
    highlight: MaybeProp<String>,
) -> impl IntoView
where
    T: Clone + Serialize + Send + Sync + 'static,
{
    let config = use_config();
    let opts = CellOptions {
        fallback: fallback.unwrap_or(config.table.fallback),
        tooltip_max_chars: config.table.tooltip_max_chars,
        highlight,
    };
    let empty_message =
        StoredValue::new(empty_message.unwrap_or_else(|| config.table.empty_message.clone()));

    let actions = actions.filter(RowActions::is_configured);
    let shape = TableShape::new(columns.len(), actions.is_some());

    let header = columns
        .iter()
        .map(|column| header_cell(column, sort))
        .collect_view();
    let action_header = shape.has_actions.then(|| {
        view! {
            <TableHeaderCell min_width=80.0 class="table__actions-header">"Actions"</TableHeaderCell>
        }
    });

    let columns = StoredValue::new(columns);
    let actions = StoredValue::new(actions);
    let row_class = StoredValue::new(row_class);
    let row_key = StoredValue::new(row_key);
    let opts = StoredValue::new_local(opts);

    let state = Memo::new(move |_| {
        TableState::resolve(is_loading.get().unwrap_or(false), rows.with(Vec::len))
    });

    let placeholder_rows = move || match state.get() {
        state @ TableState::Loading => shape
            .body_rows(state)
            .into_iter()
            .map(|width| {
                view! {
                    <TableRow class="table__row--skeleton">
                        {(0..width)
                            .map(|_| view! {
                                <TableCell>
                                    <div
                                        class="skeleton-cell"
                                        style="height: 14px; border-radius: 4px; background: #eceff3;"
                                    ></div>
                                </TableCell>
                            })
                            .collect_view()}
                    </TableRow>
                }
            })
            .collect_view()
            .into_any(),
        TableState::Empty => view! {
            <TableRow class="table__row--empty">
                <TableCell attr:colspan=shape.width().to_string()>
                    <div style="padding: 16px; text-align: center; color: #888;">
                        {empty_message.get_value()}
                    </div>
                </TableCell>
            </TableRow>
        }
        .into_any(),
        TableState::Populated(_) => ().into_any(),
    };

    let keyed_rows = move || -> Vec<KeyedRow<T>> {
        if !matches!(state.get(), TableState::Populated(_)) {
            return Vec::new();
        }
        rows.get()
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                let json = row_json(&row);
                KeyedRow {
                    key: row_key.with_value(|k| k.key_for(&row, &json, index)),
                    fingerprint: json.to_string(),
                    row,
                    json,
                }
            })
            .collect()
    };

    let render_row = move |item: KeyedRow<T>| {
        let KeyedRow { row, json, .. } = item;
        let class = row_class
            .with_value(|rc| rc.as_ref().map(|rc| rc.class_for(&row)))
            .unwrap_or_default();
        let cells = opts.with_value(|opts| {
            columns.with_value(|cols| {
                cols.iter()
                    .map(|column| render_cell(&row, &json, column, opts))
                    .collect_view()
            })
        });
        let action_row = row.clone();
        let action_cell = actions.get_value().map(move |actions| {
            view! {
                <TableCell class="table__actions">
                    <RowActionsCell row=action_row actions=actions />
                </TableCell>
            }
        });
        let style = if on_row_click.is_some() { "cursor: pointer;" } else { "" };

        view! {
            <TableRow
                class=class
                on:click=move |_| {
                    if let Some(cb) = on_row_click {
                        cb.run(row.clone());
                    }
                }
                attr:style=style
            >
                {cells}
                {action_cell}
            </TableRow>
        }
    };

    let row_identity = |item: &KeyedRow<T>| (item.key.clone(), item.fingerprint.clone());

    view! {
        <div class="table-wrapper">
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        {header}
                        {action_header}
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {placeholder_rows}
                    <For
                        each=keyed_rows
                        key=row_identity
                        children=render_row
                    />
                </TableBody>
            </Table>
        </div>
    }
}
