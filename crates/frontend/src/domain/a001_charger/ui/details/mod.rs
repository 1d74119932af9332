//! Charger card: identity, location and the connectors of one charger.

use contracts::domain::a001_charger::aggregate::Charger;
use contracts::domain::a002_connector::aggregate::Connector;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

use crate::domain::a002_connector::ui::list::connector_columns;
use crate::shared::components::status_badge;
use crate::shared::components::table::{DataTable, RowKey};
use crate::shared::date_utils::format_iso;
use crate::shared::icons::icon;
use crate::shared::page_frame::{ErrorBanner, PageCategory, PageFrame};
use crate::shared::resource::{use_resource, QueryClient, RequestEpoch};

/// Label/value pairs of the card; `None` values show as "-".
fn charger_fields(charger: &Charger) -> Vec<(&'static str, String)> {
    let or_dash = |v: Option<&str>| v.filter(|s| !s.is_empty()).unwrap_or("-").to_string();
    vec![
        ("Charge point", charger.charge_point_id.clone()),
        ("Vendor", or_dash(charger.vendor.as_deref())),
        ("Model", or_dash(charger.model.as_deref())),
        ("Firmware", or_dash(charger.firmware_version.as_deref())),
        (
            "City",
            or_dash(charger.location.as_ref().and_then(|l| l.city.as_deref())),
        ),
        (
            "Address",
            or_dash(charger.location.as_ref().and_then(|l| l.address.as_deref())),
        ),
        ("Tenant", or_dash(charger.tenant.as_ref().map(|t| t.name.as_str()))),
        (
            "Online",
            if charger.is_online { "Yes" } else { "No" }.to_string(),
        ),
        (
            "Last heartbeat",
            charger
                .last_heartbeat
                .as_deref()
                .map(format_iso)
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]
}

fn connectors_of(connectors: Vec<Connector>, charger_id: &str) -> Vec<Connector> {
    let mut own: Vec<Connector> = connectors
        .into_iter()
        .filter(|c| c.charger_id.as_deref() == Some(charger_id))
        .collect();
    own.sort_by_key(|c| c.connector_id);
    own
}

#[component]
#[allow(non_snake_case)]
pub fn ChargerDetails(id: String, on_close: Callback<()>) -> impl IntoView {
    let chargers = use_resource::<Charger>();
    let connectors = use_resource::<Connector>();
    let client = expect_context::<QueryClient>();

    let (charger, set_charger) = signal::<Option<Charger>>(None);
    let (own_connectors, set_own_connectors) = signal::<Vec<Connector>>(Vec::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);

    let charger_id = StoredValue::new(id);
    let epoch = Arc::new(RequestEpoch::default());

    // re-runs on every invalidation; only the latest load is applied
    Effect::new(move |_| {
        client.revision();
        let ticket = epoch.begin();
        let epoch = Arc::clone(&epoch);
        let id = charger_id.get_value();
        let chargers = chargers.clone();
        let connectors = connectors.clone();
        if !chargers.has_fresh_item(&id) || !connectors.has_fresh_list() {
            set_loading.set(true);
        }

        spawn_local(async move {
            let charger = chargers.get_by_id(&id).await;
            let all = connectors.list().await;
            if !epoch.is_current(ticket) {
                log::debug!("charger {}: dropping superseded load", id);
                return;
            }

            match charger {
                Ok(Some(c)) => {
                    set_charger.set(Some(c));
                    set_error.set(None);
                }
                Ok(None) => set_error.set(Some(format!("Charger {} not found", id))),
                Err(e) => {
                    log::error!("Failed to load charger {}: {}", id, e);
                    set_error.set(Some(e.to_string()));
                }
            }
            match all {
                Ok(all) => set_own_connectors.set(connectors_of(all, &id)),
                Err(e) => log::error!("Failed to load connectors of {}: {}", id, e),
            }
            set_loading.set(false);
        });
    });

    let title = Signal::derive(move || {
        charger
            .get()
            .map(|c| format!("Charger {}", c.charge_point_id))
            .unwrap_or_else(|| format!("Charger {}", charger_id.get_value()))
    });

    let header_actions = view! {
        <button class="button button--secondary" on:click=move |_| on_close.run(())>
            {icon("x")}
            {"Close"}
        </button>
    }
    .into_any();

    view! {
        <PageFrame
            page_id="a001_charger--detail"
            category=PageCategory::Detail
            title=title
            actions=header_actions
        >
            <ErrorBanner error=error />
            {move || {
                charger
                    .get()
                    .map(|c| {
                        let status = status_badge(c.status.as_deref());
                        view! {
                            <div class="details-grid">
                                <div class="details-grid__label">"Status"</div>
                                <div class="details-grid__value">{status}</div>
                                {charger_fields(&c)
                                    .into_iter()
                                    .map(|(label, value)| view! {
                                        <div class="details-grid__label">{label}</div>
                                        <div class="details-grid__value">{value}</div>
                                    })
                                    .collect_view()}
                            </div>
                        }
                    })
            }}
            <h2 class="section-title">"Connectors"</h2>
            <DataTable
                rows=own_connectors
                columns=connector_columns()
                row_key=RowKey::field("id")
                is_loading=loading
                empty_message="No connectors reported".to_string()
            />
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connector(id: &str, charger: Option<&str>, connector_id: u32) -> Connector {
        Connector {
            id: id.to_string(),
            charger_id: charger.map(str::to_string),
            connector_id,
            status: "Available".to_string(),
            standard: None,
            max_power_kw: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_connectors_of_filters_and_orders() {
        let all = vec![
            connector("a", Some("c1"), 2),
            connector("b", Some("c2"), 1),
            connector("c", None, 1),
            connector("d", Some("c1"), 1),
        ];
        let ids: Vec<String> = connectors_of(all, "c1").into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["d", "a"]);
    }

    #[test]
    fn test_charger_fields_dash_for_missing() {
        let charger = Charger {
            id: "1".to_string(),
            charge_point_id: "CP-1".to_string(),
            vendor: Some(String::new()),
            model: None,
            firmware_version: None,
            status: None,
            is_online: false,
            connector_count: 0,
            last_heartbeat: Some("2024-03-01T08:15:00".to_string()),
            location: None,
            tenant: None,
        };
        let fields = charger_fields(&charger);
        let get = |label: &str| fields.iter().find(|(l, _)| *l == label).map(|(_, v)| v.clone());
        assert_eq!(get("Vendor").as_deref(), Some("-"));
        assert_eq!(get("City").as_deref(), Some("-"));
        assert_eq!(get("Online").as_deref(), Some("No"));
        assert_eq!(get("Last heartbeat").as_deref(), Some("01.03.2024 08:15:00"));
    }
}
