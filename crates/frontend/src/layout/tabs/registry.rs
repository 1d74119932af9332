//! Tab content registry - единственный источник правды для маппинга tab.key → View
//!
//! Ключи списков совпадают с именами модулей агрегатов, детальные табы
//! получают суффикс `_detail_{id}`.

use crate::domain::a001_charger::ui::details::ChargerDetails;
use crate::domain::a001_charger::ui::list::ChargerList;
use crate::domain::a002_connector::ui::list::ConnectorList;
use crate::domain::a003_party::ui::list::PartyList;
use crate::domain::a004_tenant::ui::list::TenantList;
use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

const CHARGER_DETAIL_PREFIX: &str = "a001_charger_detail_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabRoute {
    Chargers,
    ChargerDetail(String),
    Connectors,
    Parties,
    Tenants,
}

impl TabRoute {
    /// Entries of the sidebar, in order: (route, icon).
    pub fn sections() -> [(TabRoute, &'static str); 4] {
        [
            (TabRoute::Chargers, "chargers"),
            (TabRoute::Connectors, "connectors"),
            (TabRoute::Parties, "parties"),
            (TabRoute::Tenants, "tenants"),
        ]
    }

    pub fn parse(key: &str) -> Option<TabRoute> {
        match key {
            "a001_charger" => Some(TabRoute::Chargers),
            "a002_connector" => Some(TabRoute::Connectors),
            "a003_party" => Some(TabRoute::Parties),
            "a004_tenant" => Some(TabRoute::Tenants),
            k => k
                .strip_prefix(CHARGER_DETAIL_PREFIX)
                .filter(|id| !id.is_empty())
                .map(|id| TabRoute::ChargerDetail(id.to_string())),
        }
    }

    pub fn key(&self) -> String {
        match self {
            TabRoute::Chargers => "a001_charger".to_string(),
            TabRoute::ChargerDetail(id) => format!("{}{}", CHARGER_DETAIL_PREFIX, id),
            TabRoute::Connectors => "a002_connector".to_string(),
            TabRoute::Parties => "a003_party".to_string(),
            TabRoute::Tenants => "a004_tenant".to_string(),
        }
    }

    pub fn title(&self) -> String {
        match self {
            TabRoute::Chargers => "Chargers".to_string(),
            TabRoute::ChargerDetail(id) => format!("Charger {}", id),
            TabRoute::Connectors => "Connectors".to_string(),
            TabRoute::Parties => "OCPI Parties".to_string(),
            TabRoute::Tenants => "Tenants".to_string(),
        }
    }
}

/// Рендерит контент таба по его ключу.
///
/// # Returns
/// AnyView с содержимым таба или placeholder для неизвестных ключей
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();

    match TabRoute::parse(key) {
        Some(TabRoute::Chargers) => view! { <ChargerList /> }.into_any(),
        Some(TabRoute::ChargerDetail(id)) => view! {
            <ChargerDetails
                id=id
                on_close=Callback::new(move |_| {
                    tabs_store.close_tab(&key_for_close);
                })
            />
        }
        .into_any(),
        Some(TabRoute::Connectors) => view! { <ConnectorList /> }.into_any(),
        Some(TabRoute::Parties) => view! { <PartyList /> }.into_any(),
        Some(TabRoute::Tenants) => view! { <TenantList /> }.into_any(),
        None => {
            log::warn!("Unknown tab type: {}", key);
            view! { <div class="placeholder">{"Not implemented yet"}</div> }.into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_back_to_routes() {
        let routes = [
            TabRoute::Chargers,
            TabRoute::ChargerDetail("c-17".to_string()),
            TabRoute::Connectors,
            TabRoute::Parties,
            TabRoute::Tenants,
        ];
        for route in routes {
            assert_eq!(TabRoute::parse(&route.key()), Some(route));
        }
    }

    #[test]
    fn unknown_and_empty_detail_keys() {
        assert_eq!(TabRoute::parse("a999_unknown"), None);
        assert_eq!(TabRoute::parse("a001_charger_detail_"), None);
    }
}
