//! Sidebar: one entry per resource section.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::TabRoute;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();

    let items = TabRoute::sections()
        .into_iter()
        .map(|(route, icon_name)| {
            let key = route.key();
            let title = route.title();
            let is_active = move || tabs_store.active.with(|a| a.as_deref() == Some(key.as_str()));
            view! {
                <li
                    class="sidebar__item"
                    class:sidebar__item--active=is_active
                    on:click=move |_| tabs_store.open_route(&route)
                >
                    <span class="sidebar__icon">{icon(icon_name)}</span>
                    <span class="sidebar__label">{title}</span>
                </li>
            }
        })
        .collect_view();

    view! {
        <nav class="sidebar">
            <ul class="sidebar__list">{items}</ul>
        </nav>
    }
}
