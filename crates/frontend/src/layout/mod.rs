pub mod global_context;
pub mod notifications;
pub mod sidebar;
pub mod tabs;
pub mod top_header;

use global_context::AppGlobalContext;
use leptos::prelude::*;
use notifications::NotificationHost;
use sidebar::Sidebar;
use tabs::{TabPage, TabStrip};
use top_header::TopHeader;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                    |
/// +------------------------------------------+
/// |  Sidebar  |  TabStrip + active TabPage    |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();

    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <Show when=move || tabs_store.left_open.get()>
                    <Sidebar />
                </Show>
                <div class="app-main">
                    <TabStrip />
                    <div class="tabs__content">
                        <For
                            each=move || tabs_store.opened.get()
                            key=|tab| tab.key.clone()
                            children=move |tab| view! { <TabPage tab=tab tabs_store=tabs_store /> }
                        />
                    </div>
                </div>
            </div>
            <NotificationHost />
        </div>
    }
}
