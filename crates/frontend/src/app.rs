use crate::domain::register_resources;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::notifications::NotificationService;
use crate::layout::Shell;
use crate::shared::api_utils::init_api;
use crate::shared::config::load_config;
use crate::shared::resource::{QueryClient, ResourceRegistry};
use crate::system::auth::AuthProvider;
use leptos::prelude::*;

/// Shell with the tab state restored from `?active=`.
#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();

    // runs once, when the layout is created
    tabs_store.init_router_integration();

    view! { <Shell /> }
}

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    init_api(config.api.port);

    let registry = ResourceRegistry::new(config.pluralizer());
    if let Err(e) = register_resources(&registry) {
        log::error!("Resource registration failed: {}", e);
    }

    provide_context(config);
    provide_context(AppGlobalContext::new());
    provide_context(NotificationService::new());
    provide_context(QueryClient::new());
    provide_context(registry);

    view! {
        <AuthProvider>
            <MainLayout />
        </AuthProvider>
    }
}
