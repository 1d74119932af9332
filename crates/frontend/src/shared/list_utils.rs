//! Универсальные утилиты для работы со списками (поиск, сортировка, пагинация, UI компоненты)
//!
//! Search and sort work over the table's own columns, so what the user
//! searches is exactly the text the cells display.
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;

use crate::shared::components::pagination_controls::PaginationState;
use crate::shared::components::table::{
    resolve_text, row_json, CellFallback, CellValue, Column, SortControl,
};

/// Поиск включается с этой длины запроса
pub const MIN_SEARCH_CHARS: usize = 3;

const SEARCH_DEBOUNCE_MS: u32 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: String,
    pub ascending: bool,
}

impl SortState {
    pub fn by(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: true,
        }
    }

    /// Same field flips the direction, another field starts ascending.
    pub fn toggle(&mut self, field: &str) {
        if self.field == field {
            self.ascending = !self.ascending;
        } else {
            self.field = field.to_string();
            self.ascending = true;
        }
    }
}

/// Search text, sort and page requested by a list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: String,
    pub sort: Option<SortState>,
    pub page: usize,
    pub page_size: usize,
}

/// Rows of the current page with the pagination describing them.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T> {
    pub rows: Vec<T>,
    pub pagination: PaginationState,
}

/// Search, sort and paging state of one list screen.
#[derive(Clone, Copy)]
pub struct ListControls {
    pub filter: RwSignal<String>,
    pub sort: RwSignal<SortState>,
    pub page: RwSignal<usize>,
    pub page_size: RwSignal<usize>,
}

impl ListControls {
    pub fn new(default_sort: &str, page_size: usize) -> Self {
        Self {
            filter: RwSignal::new(String::new()),
            sort: RwSignal::new(SortState::by(default_sort)),
            page: RwSignal::new(1),
            page_size: RwSignal::new(page_size.max(1)),
        }
    }

    /// Tracked snapshot of the controls.
    pub fn query(&self) -> ListQuery {
        ListQuery {
            filter: self.filter.get(),
            sort: Some(self.sort.get()),
            page: self.page.get(),
            page_size: self.page_size.get(),
        }
    }

    /// New search text restarts from page 1.
    pub fn set_filter(&self, filter: String) {
        self.filter.set(filter);
        self.page.set(1);
    }

    pub fn set_page_size(&self, size: usize) {
        self.page_size.set(size.max(1));
        self.page.set(1);
    }

    pub fn sort_control(&self) -> SortControl {
        let sort = self.sort;
        SortControl {
            state: sort.into(),
            on_sort: Callback::new(move |field: String| sort.update(|s| s.toggle(&field))),
        }
    }
}

pub fn is_filter_active(filter: &str) -> bool {
    filter.trim().chars().count() >= MIN_SEARCH_CHARS
}

fn matches_filter<T>(row: &T, json: &Value, columns: &[Column<T>], needle: &str) -> bool {
    columns.iter().any(|column| {
        resolve_text(row, json, column, CellFallback::Blank)
            .to_lowercase()
            .contains(needle)
    })
}

/// Nulls go last in both directions.
fn compare_values(a: &CellValue, b: &CellValue, ascending: bool) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) if ascending => a.compare(b),
        (false, false) => a.compare(b).reverse(),
    }
}

/// Filter (case-insensitive over displayed text), sort by the column whose
/// id matches the sort field, then cut the requested page.
pub fn apply_list_view<T: Serialize + Clone>(
    rows: &[T],
    columns: &[Column<T>],
    query: &ListQuery,
) -> ListView<T> {
    let mut items: Vec<(&T, Value)> = rows.iter().map(|r| (r, row_json(r))).collect();

    if is_filter_active(&query.filter) {
        let needle = query.filter.trim().to_lowercase();
        items.retain(|(row, json)| matches_filter(*row, json, columns, &needle));
    }

    if let Some(sort) = &query.sort {
        match columns.iter().find(|c| c.id == sort.field) {
            Some(column) => {
                let mut keyed: Vec<(CellValue, (&T, Value))> = items
                    .into_iter()
                    .map(|(row, json)| {
                        let key = column.value(row, &json).unwrap_or(CellValue::Missing);
                        (key, (row, json))
                    })
                    .collect();
                keyed.sort_by(|a, b| compare_values(&a.0, &b.0, sort.ascending));
                items = keyed.into_iter().map(|(_, item)| item).collect();
            }
            None => log::warn!("sort field `{}` matches no column", sort.field),
        }
    }

    let pagination = PaginationState::new(items.len(), query.page_size, query.page);
    let rows = items[pagination.item_range()]
        .iter()
        .map(|(row, _)| (*row).clone())
        .collect();

    ListView { rows, pagination }
}

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    if !is_filter_active(filter) {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let filter_lower = filter.trim().to_lowercase();
    let text_lower = text.to_lowercase();

    // lowercase may change byte lengths; highlight only when offsets line up
    if text_lower.len() != text.len() || !text_lower.contains(&filter_lower) {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;

    while let Some(pos) = text_lower[last_pos..].find(&filter_lower) {
        let actual_pos = last_pos + pos;

        if actual_pos > last_pos {
            parts.push(view! { <span>{text[last_pos..actual_pos].to_string()}</span> }.into_any());
        }

        let match_end = actual_pos + filter_lower.len();
        parts.push(view! {
            <span class="search-highlight" style="background-color: #ff9800; color: white; padding: 1px 2px; border-radius: 2px; font-weight: 500;">
                {text[actual_pos..match_end].to_string()}
            </span>
        }.into_any());

        last_pos = match_end;
    }

    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (для отображения)
    #[prop(into)]
    value: Signal<String>,
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        format!("Search (min. {} characters)...", MIN_SEARCH_CHARS)
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let input_value = RwSignal::new(value.get_untracked());

    // Dropping a pending timeout cancels it
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input_change = move |new_value: String| {
        input_value.set(new_value.clone());
        let timeout = Timeout::new(SEARCH_DEBOUNCE_MS, move || on_change.run(new_value));
        pending.set_value(Some(timeout));
    };

    let clear_filter = move |_| {
        pending.set_value(None);
        input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div style="position: relative; display: inline-flex; align-items: center;">
            <input
                type="text"
                placeholder={placeholder}
                style=move || format!(
                    "width: 250px; padding: 6px 32px 6px 10px; border: 1px solid #ddd; border-radius: 4px; font-size: 15px; background: {};",
                    if is_filter_active(&value.get()) { "#fffbea" } else { "white" }
                )
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button
                    style="position: absolute; right: 6px; background: none; border: none; cursor: pointer; padding: 4px; display: inline-flex; align-items: center; color: #666; line-height: 1;"
                    on:click=clear_filter
                    title="Clear"
                >
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}

/// CSS класс индикатора сортировки
pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "sort-indicator sort-indicator--active"
    } else {
        "sort-indicator"
    }
}
