use contracts::domain::a002_connector::aggregate::{Connector, ConnectorDraft};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::browser::confirm;
use crate::shared::components::status_badge;
use crate::shared::components::table::{Column, DataTable, RowActions, RowKey};
use crate::shared::components::PaginationControls;
use crate::shared::config::use_config;
use crate::shared::icons::icon;
use crate::shared::list_utils::{apply_list_view, ListControls, SearchInput};
use crate::shared::page_frame::{ErrorBanner, PageCategory, PageFrame};
use crate::shared::resource::{use_resource, use_resource_list, Operation};

/// OCPP 1.6 ChargePointStatus values offered by the create form.
pub const CONNECTOR_STATUSES: [&str; 9] = [
    "Available",
    "Preparing",
    "Charging",
    "SuspendedEVSE",
    "SuspendedEV",
    "Finishing",
    "Reserved",
    "Unavailable",
    "Faulted",
];

pub fn connector_columns() -> Vec<Column<Connector>> {
    vec![
        Column::path("Connector", "connector_id")
            .sortable()
            .class("text-right")
            .min_width(90.0),
        Column::path("Charger", "charger_id").tooltip().sortable(),
        Column::path("Status", "status")
            .with_render(|c: &Connector| status_badge(Some(&c.status)))
            .sortable(),
        Column::path("Standard", "standard"),
        Column::path("Max power, kW", "max_power_kw")
            .sortable()
            .class("text-right"),
        Column::path("Updated", "updated_at").sortable().min_width(150.0),
    ]
}

/// Create form input; everything is kept as typed until it validates.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorForm {
    pub connector_id: String,
    pub status: String,
    pub charger_id: String,
}

impl Default for ConnectorForm {
    fn default() -> Self {
        Self {
            connector_id: "1".to_string(),
            status: CONNECTOR_STATUSES[0].to_string(),
            charger_id: String::new(),
        }
    }
}

impl ConnectorForm {
    pub fn to_draft(&self) -> Result<ConnectorDraft, String> {
        let connector_id: u32 = self
            .connector_id
            .trim()
            .parse()
            .map_err(|_| format!("Connector id must be a number, got `{}`", self.connector_id))?;
        if connector_id == 0 {
            return Err("Connector id 0 is reserved for the whole charger".to_string());
        }
        let charger_id = self.charger_id.trim();
        Ok(ConnectorDraft {
            connector_id,
            status: self.status.clone(),
            charger_id: (!charger_id.is_empty()).then(|| charger_id.to_string()),
        })
    }
}

#[component]
#[allow(non_snake_case)]
fn CreateConnectorForm(on_done: Callback<()>) -> impl IntoView {
    let binding = StoredValue::new(use_resource::<Connector>());
    let form = RwSignal::new(ConnectorForm::default());
    let (form_error, set_form_error) = signal::<Option<String>>(None);
    let saving = move || binding.with_value(|b| b.is_pending(Operation::Create));

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = match form.with_untracked(|f| f.to_draft()) {
            Ok(d) => d,
            Err(e) => {
                set_form_error.set(Some(e));
                return;
            }
        };
        set_form_error.set(None);
        let binding = binding.get_value();
        spawn_local(async move {
            // input stays in place on failure so it can be corrected
            if binding.create(draft).await.is_ok() {
                form.set(ConnectorForm::default());
                on_done.run(());
            }
        });
    };

    view! {
        <form class="inline-form" on:submit=submit>
            <label class="inline-form__field">
                "Connector id"
                <input
                    type="number"
                    min="1"
                    prop:value=move || form.with(|f| f.connector_id.clone())
                    on:input=move |ev| form.update(|f| f.connector_id = event_target_value(&ev))
                />
            </label>
            <label class="inline-form__field">
                "Status"
                <select
                    prop:value=move || form.with(|f| f.status.clone())
                    on:change=move |ev| form.update(|f| f.status = event_target_value(&ev))
                >
                    {CONNECTOR_STATUSES
                        .iter()
                        .map(|s| view! { <option value=*s>{*s}</option> })
                        .collect_view()}
                </select>
            </label>
            <label class="inline-form__field">
                "Charger id"
                <input
                    type="text"
                    placeholder="optional"
                    prop:value=move || form.with(|f| f.charger_id.clone())
                    on:input=move |ev| form.update(|f| f.charger_id = event_target_value(&ev))
                />
            </label>
            <button class="button button--primary" type="submit" disabled=saving>
                {icon("plus")}
                {move || if saving() { "Saving..." } else { "Create" }}
            </button>
            {move || form_error.get().map(|e| view! { <span class="inline-form__error">{e}</span> })}
        </form>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ConnectorList() -> impl IntoView {
    let config = use_config();
    let binding = use_resource::<Connector>();
    let list = use_resource_list(binding.clone());
    let controls = ListControls::new("connector_id", config.table.page_size);
    let columns = StoredValue::new(connector_columns());
    let (show_form, set_show_form) = signal(false);

    let view_state = Memo::new(move |_| {
        let query = controls.query();
        list.rows
            .with(|rows| columns.with_value(|cols| apply_list_view(rows, cols, &query)))
    });
    let page_rows = Signal::derive(move || view_state.with(|v| v.rows.clone()));
    let pagination = Signal::derive(move || view_state.with(|v| v.pagination));

    let binding = StoredValue::new(binding);
    let is_busy = move |op: Operation| binding.with_value(|b| b.is_pending(op));
    let actions = RowActions::new()
        .delete(move |c: &Connector| {
            if !confirm(&format!("Delete connector {}?", c.connector_id)) {
                return;
            }
            let binding = binding.get_value();
            let id = c.id.clone();
            spawn_local(async move {
                if let Err(e) = binding.remove(&id).await {
                    log::error!("Failed to delete connector {}: {}", id, e);
                }
            });
        })
        .delete_busy(Signal::derive(move || is_busy(Operation::Delete)));

    let header_actions = view! {
        <SearchInput
            value=controls.filter
            on_change=Callback::new(move |v: String| controls.set_filter(v))
            placeholder="Search connectors..."
        />
        <button
            class="button button--primary"
            on:click=move |_| set_show_form.update(|v| *v = !*v)
        >
            {icon("plus")}
            {"New connector"}
        </button>
        <button
            class="button button--secondary"
            on:click=move |_| binding.with_value(|b| b.invalidate_list())
            disabled=move || is_busy(Operation::List)
        >
            {icon("refresh")}
            {"Refresh"}
        </button>
    }
    .into_any();

    view! {
        <PageFrame
            page_id="a002_connector--list"
            category=PageCategory::List
            title="Connectors"
            actions=header_actions
        >
            <Show when=move || show_form.get()>
                <CreateConnectorForm on_done=Callback::new(move |_| set_show_form.set(false)) />
            </Show>
            <ErrorBanner error=list.error />
            <DataTable
                rows=page_rows
                columns=connector_columns()
                row_key=RowKey::field("id")
                is_loading=list.is_loading
                actions=actions
                sort=controls.sort_control()
                highlight=controls.filter
            />
            <PaginationControls
                state=pagination
                on_page_change=Callback::new(move |page: usize| controls.page.set(page))
                on_page_size_change=Callback::new(move |size: usize| controls.set_page_size(size))
            />
            <div class="list-footer">
                {move || format!("{} connectors", pagination.get().total_items)}
            </div>
        </PageFrame>
    }
}
