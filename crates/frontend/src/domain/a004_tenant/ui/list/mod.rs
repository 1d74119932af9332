use contracts::domain::a004_tenant::aggregate::{Tenant, TenantDraft};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::notifications::NotificationService;
use crate::shared::browser::{confirm, copy_to_clipboard_with_callback};
use crate::shared::components::table::{
    Column, DataTable, RowAction, RowActions, RowClass, RowKey,
};
use crate::shared::components::PaginationControls;
use crate::shared::config::use_config;
use crate::shared::icons::icon;
use crate::shared::list_utils::{apply_list_view, ListControls, SearchInput};
use crate::shared::page_frame::{ErrorBanner, PageCategory, PageFrame};
use crate::shared::resource::{
    use_resource, use_resource_list, Notice, NoticeSink, NoticeVariant, Operation,
    ResourceBinding,
};

pub fn tenant_columns() -> Vec<Column<Tenant>> {
    vec![
        Column::path("Name", "name").tooltip().sortable().min_width(160.0),
        Column::path("Contact", "contact_email").sortable(),
        Column::path("Active", "is_active").sortable().min_width(80.0),
        Column::path("Chargers", "charger_count")
            .sortable()
            .class("text-right")
            .min_width(90.0),
        Column::path("Created", "created_at").sortable().min_width(110.0),
    ]
}

/// Draft that only flips the activity flag of `tenant`.
pub fn with_active(tenant: &Tenant, is_active: bool) -> TenantDraft {
    TenantDraft {
        is_active,
        ..TenantDraft::from(tenant)
    }
}

fn set_active(binding: ResourceBinding<Tenant>, tenant: &Tenant, is_active: bool) {
    if tenant.is_active == is_active {
        return;
    }
    let id = tenant.id.clone();
    let draft = with_active(tenant, is_active);
    spawn_local(async move {
        if let Err(e) = binding.update(&id, draft).await {
            log::error!("Failed to change activity of tenant {}: {}", id, e);
        }
    });
}

#[component]
#[allow(non_snake_case)]
pub fn TenantList() -> impl IntoView {
    let config = use_config();
    let notices = expect_context::<NotificationService>();
    let binding = use_resource::<Tenant>();
    let list = use_resource_list(binding.clone());
    let controls = ListControls::new("name", config.table.page_size);
    let columns = StoredValue::new(tenant_columns());

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
        .extra(
            RowAction::new("Activate", move |t: &Tenant| {
                set_active(binding.get_value(), t, true)
            })
            .icon("plus"),
        )
        .extra(
            RowAction::new("Suspend", move |t: &Tenant| {
                set_active(binding.get_value(), t, false)
            })
            .icon("x"),
        )
        .extra(RowAction::new("Copy ID", move |t: &Tenant| {
            let id = t.id.clone();
            copy_to_clipboard_with_callback(&t.id, move || {
                notices.notify(Notice {
                    title: "Copied".to_string(),
                    description: format!("Tenant id {} copied to clipboard", id),
                    variant: NoticeVariant::Info,
                })
            });
        }))
        .delete(move |t: &Tenant| {
            let message = if t.charger_count > 0 {
                format!(
                    "Tenant {} still owns {} chargers. Delete anyway?",
                    t.name, t.charger_count
                )
            } else {
                format!("Delete tenant {}?", t.name)
            };
            if !confirm(&message) {
                return;
            }
            let binding = binding.get_value();
            let id = t.id.clone();
            spawn_local(async move {
                if let Err(e) = binding.remove(&id).await {
                    log::error!("Failed to delete tenant {}: {}", id, e);
                }
            });
        })
        .delete_busy(Signal::derive(move || is_busy(Operation::Delete)));

    let header_actions = view! {
        <SearchInput
            value=controls.filter
            on_change=Callback::new(move |v: String| controls.set_filter(v))
            placeholder="Search tenants..."
        />
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
            page_id="a004_tenant--list"
            category=PageCategory::List
            title="Tenants"
            actions=header_actions
        >
            <ErrorBanner error=list.error />
            <DataTable
                rows=page_rows
                columns=tenant_columns()
                row_key=RowKey::field("id")
                is_loading=list.is_loading
                actions=actions
                row_class=RowClass::per_row(|t: &Tenant| {
                    if t.is_active { String::new() } else { "table__row--muted".to_string() }
                })
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
