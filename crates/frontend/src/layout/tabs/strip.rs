use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Полоса открытых табов с кнопками закрытия.
#[component]
pub fn TabStrip() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();

    view! {
        <div class="tabs__strip" role="tablist">
            <For
                each=move || tabs_store.opened.get()
                key=|tab| tab.key.clone()
                children=move |tab| {
                    let key_for_active = tab.key.clone();
                    let key_for_click = tab.key.clone();
                    let key_for_close = tab.key.clone();
                    let is_active = move || {
                        tabs_store.active.with(|a| a.as_deref() == Some(key_for_active.as_str()))
                    };
                    view! {
                        <div
                            class="tabs__tab"
                            class:tabs__tab--active=is_active
                            role="tab"
                            on:click=move |_| tabs_store.activate_tab(&key_for_click)
                        >
                            <span class="tabs__title">{tab.title}</span>
                            <button
                                class="tabs__close"
                                title="Close"
                                on:click=move |ev| {
                                    ev.stop_propagation();
                                    tabs_store.close_tab(&key_for_close);
                                }
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
