//! Компонент сортируемой ячейки заголовка таблицы
//!
//! ```rust
//! <SortableHeaderCell
//!     label="Vendor"
//!     sort_field="vendor"
//!     sort=SortControl { state: sort_state.into(), on_sort }
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator, SortState};
use leptos::prelude::*;
use thaw::*;

/// Sort state owned by the screen plus the callback that changes it.
/// The table only renders indicators and reports clicks.
#[derive(Clone, Copy)]
pub struct SortControl {
    pub state: Signal<SortState>,
    pub on_sort: Callback<String>,
}

/// Заголовок с индикатором сортировки (▲▼⇅), клик сообщает поле наверх.
#[component]
pub fn SortableHeaderCell(
    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// Поле для сортировки
    #[prop(into)]
    sort_field: String,

    sort: SortControl,

    /// Минимальная ширина колонки
    #[prop(optional, default = 100.0)]
    min_width: f64,

    #[prop(optional, into)]
    class: Option<String>,
) -> impl IntoView {
    let field_for_click = sort_field.clone();
    let field_for_indicator = sort_field.clone();
    let field_for_class = sort_field;

    let handle_click = move |_| {
        sort.on_sort.run(field_for_click.clone());
    };

    view! {
        <TableHeaderCell
            resizable=true
            min_width=min_width
            class=format!("resizable {}", class.unwrap_or_default())
        >
            <div
                class="table__sortable-header"
                style="cursor: pointer; padding-right: 12px; max-width: calc(100% - 12px);"
                on:click=handle_click
            >
                {label}
                <span class=move || sort.state.with(|s| get_sort_class(&s.field, &field_for_class))>
                    {move || {
                        sort.state.with(|s| {
                            get_sort_indicator(&s.field, &field_for_indicator, s.ascending)
                        })
                    }}
                </span>
            </div>
        </TableHeaderCell>
    }
}
