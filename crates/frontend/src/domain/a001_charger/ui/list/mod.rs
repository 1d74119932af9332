use contracts::domain::a001_charger::aggregate::Charger;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::TabRoute;
use crate::shared::browser::confirm;
use crate::shared::components::status_badge;
use crate::shared::components::table::{Column, DataTable, RowActions, RowClass, RowKey};
use crate::shared::components::PaginationControls;
use crate::shared::config::use_config;
use crate::shared::icons::icon;
use crate::shared::list_utils::{apply_list_view, ListControls, SearchInput};
use crate::shared::page_frame::{ErrorBanner, PageCategory, PageFrame};
use crate::shared::resource::{use_resource, use_resource_list, Operation};

pub fn charger_columns() -> Vec<Column<Charger>> {
    vec![
        Column::path("Charge point", "charge_point_id")
            .tooltip()
            .sortable()
            .min_width(160.0),
        Column::path("Vendor", "vendor").sortable(),
        Column::path("Model", "model"),
        Column::path("City", "location.city").sortable(),
        Column::path("Tenant", "tenant.name").sortable(),
        Column::path("Online", "is_online").sortable().min_width(80.0),
        Column::computed("Connectors", |c: &Charger| c.connector_count.into())
            .id("connector_count")
            .sortable()
            .class("text-right")
            .min_width(90.0),
        Column::path("Status", "status")
            .with_render(|c: &Charger| status_badge(c.status.as_deref()))
            .sortable(),
        Column::path("Last heartbeat", "last_heartbeat")
            .sortable()
            .min_width(150.0),
    ]
}

#[component]
#[allow(non_snake_case)]
pub fn ChargerList() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();
    let config = use_config();
    let binding = use_resource::<Charger>();
    let list = use_resource_list(binding.clone());
    let controls = ListControls::new("charge_point_id", config.table.page_size);
    let columns = StoredValue::new(charger_columns());

    let view_state = Memo::new(move |_| {
        let query = controls.query();
        list.rows
            .with(|rows| columns.with_value(|cols| apply_list_view(rows, cols, &query)))
    });
    let page_rows = Signal::derive(move || view_state.with(|v| v.rows.clone()));
    let pagination = Signal::derive(move || view_state.with(|v| v.pagination));

    let refresh = {
        let binding = binding.clone();
        move |_| binding.invalidate_list()
    };

    let delete_binding = StoredValue::new(binding);
    let is_busy = move |op: Operation| delete_binding.with_value(|b| b.is_pending(op));
    let actions = RowActions::new()
        .view(move |c: &Charger| tabs_store.open_route(&TabRoute::ChargerDetail(c.id.clone())))
        .delete(move |c: &Charger| {
            if !confirm(&format!("Delete charger {}?", c.charge_point_id)) {
                return;
            }
            let binding = delete_binding.get_value();
            let id = c.id.clone();
            spawn_local(async move {
                if let Err(e) = binding.remove(&id).await {
                    log::error!("Failed to delete charger {}: {}", id, e);
                }
            });
        })
        .delete_busy(Signal::derive(move || is_busy(Operation::Delete)));

    let header_actions = view! {
        <SearchInput
            value=controls.filter
            on_change=Callback::new(move |v: String| controls.set_filter(v))
            placeholder="Search chargers..."
        />
        <button
            class="button button--secondary"
            on:click=refresh
            disabled=move || is_busy(Operation::List)
        >
            {icon("refresh")}
            {"Refresh"}
        </button>
    }
    .into_any();

    view! {
        <PageFrame
            page_id="a001_charger--list"
            category=PageCategory::List
            title="Chargers"
            actions=header_actions
        >
            <ErrorBanner error=list.error />
            <DataTable
                rows=page_rows
                columns=charger_columns()
                row_key=RowKey::field("id")
                is_loading=list.is_loading
                actions=actions
                row_class=RowClass::per_row(|c: &Charger| {
                    if c.is_online { String::new() } else { "table__row--muted".to_string() }
                })
                on_row_click=Callback::new(move |c: Charger| {
                    tabs_store.open_route(&TabRoute::ChargerDetail(c.id))
                })
                sort=controls.sort_control()
                highlight=controls.filter
            />
            <PaginationControls
                state=pagination
                on_page_change=Callback::new(move |page: usize| controls.page.set(page))
                on_page_size_change=Callback::new(move |size: usize| controls.set_page_size(size))
            />
            <div class="list-footer">
                {move || format!("{} chargers", pagination.get().total_items)}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::components::table::resolve_text;
    use crate::shared::components::table::{row_json, CellFallback};
    use crate::shared::list_utils::{ListQuery, SortState};
    use contracts::domain::a001_charger::aggregate::{ChargerLocation, TenantRef};

    fn charger(id: &str, city: Option<&str>, online: bool) -> Charger {
        Charger {
            id: id.to_string(),
            charge_point_id: format!("CP-{}", id),
            vendor: Some("ABB".to_string()),
            model: None,
            firmware_version: None,
            status: Some("Available".to_string()),
            is_online: online,
            connector_count: 2,
            last_heartbeat: Some("2024-03-01T08:15:00Z".to_string()),
            location: city.map(|c| ChargerLocation {
                city: Some(c.to_string()),
                address: None,
            }),
            tenant: Some(TenantRef {
                id: "t1".to_string(),
                name: "Volt".to_string(),
            }),
        }
    }

    #[test]
    fn test_charger_cells() {
        let columns = charger_columns();
        let row = charger("1", None, true);
        let json = row_json(&row);
        let text = |id: &str| {
            let column = columns.iter().find(|c| c.id == id).unwrap();
            resolve_text(&row, &json, column, CellFallback::NotAvailable)
        };

        assert_eq!(text("location.city"), "N/A");
        assert_eq!(text("model"), "N/A");
        assert_eq!(text("tenant.name"), "Volt");
        assert_eq!(text("is_online"), "Yes");
        assert_eq!(text("connector_count"), "2");
        assert_eq!(text("last_heartbeat"), "01.03.2024 08:15:00");
    }

    #[test]
    fn test_charger_sort_by_city_keeps_missing_last() {
        let rows = vec![
            charger("1", None, true),
            charger("2", Some("Oslo"), false),
            charger("3", Some("Bergen"), true),
        ];
        let query = ListQuery {
            filter: String::new(),
            sort: Some(SortState::by("location.city")),
            page: 1,
            page_size: 10,
        };
        let view = apply_list_view(&rows, &charger_columns(), &query);
        let ids: Vec<&str> = view.rows.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }
}
