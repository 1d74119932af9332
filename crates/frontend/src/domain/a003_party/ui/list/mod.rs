use contracts::domain::a003_party::aggregate::Party;
use leptos::prelude::*;

use crate::shared::components::table::{CellFallback, Column, DataTable, RowKey};
use crate::shared::components::PaginationControls;
use crate::shared::config::use_config;
use crate::shared::icons::icon;
use crate::shared::list_utils::{apply_list_view, ListControls, SearchInput};
use crate::shared::page_frame::{ErrorBanner, PageCategory, PageFrame};
use crate::shared::resource::{use_resource, use_resource_list, Operation};

/// OCPI identity of a party; unique across the platform, unlike `id`
/// which differs between environments.
pub fn party_key(party: &Party) -> String {
    format!("{}-{}", party.country_code, party.party_id)
}

pub fn party_columns() -> Vec<Column<Party>> {
    vec![
        Column::computed("Party", |p: &Party| party_key(p).into())
            .id("party")
            .sortable()
            .min_width(110.0),
        Column::path("Name", "name").tooltip().sortable(),
        Column::path("Role", "role").sortable(),
        Column::path("Connected", "is_connected").sortable(),
        Column::path("Last sync", "last_synced_at")
            .sortable()
            .min_width(150.0),
    ]
}

#[component]
#[allow(non_snake_case)]
pub fn PartyList() -> impl IntoView {
    let config = use_config();
    let binding = use_resource::<Party>();
    let list = use_resource_list(binding.clone());
    let controls = ListControls::new("party", config.table.page_size);
    let columns = StoredValue::new(party_columns());

    let view_state = Memo::new(move |_| {
        let query = controls.query();
        list.rows
            .with(|rows| columns.with_value(|cols| apply_list_view(rows, cols, &query)))
    });
    let page_rows = Signal::derive(move || view_state.with(|v| v.rows.clone()));
    let pagination = Signal::derive(move || view_state.with(|v| v.pagination));

    let binding = StoredValue::new(binding);
    let header_actions = view! {
        <SearchInput
            value=controls.filter
            on_change=Callback::new(move |v: String| controls.set_filter(v))
            placeholder="Search parties..."
        />
        <button
            class="button button--secondary"
            on:click=move |_| binding.with_value(|b| b.invalidate_list())
            disabled=move || binding.with_value(|b| b.is_pending(Operation::List))
        >
            {icon("refresh")}
            {"Refresh"}
        </button>
    }
    .into_any();

    view! {
        <PageFrame
            page_id="a003_party--list"
            category=PageCategory::List
            title="OCPI Parties"
            actions=header_actions
        >
            <ErrorBanner error=list.error />
            <DataTable
                rows=page_rows
                columns=party_columns()
                row_key=RowKey::derive(party_key)
                is_loading=list.is_loading
                fallback=CellFallback::Blank
                empty_message="No parties connected".to_string()
                sort=controls.sort_control()
                highlight=controls.filter
            />
            <PaginationControls
                state=pagination
                on_page_change=Callback::new(move |page: usize| controls.page.set(page))
                on_page_size_change=Callback::new(move |size: usize| controls.set_page_size(size))
            />
        </PageFrame>
    }
}
