//! TopHeader component - application top navigation bar.

use crate::layout::global_context::AppGlobalContext;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let (auth_state, set_auth_state) = use_auth();

    let user_label = move || {
        auth_state.with(|s| match (&s.user_info, &s.access_token) {
            (Some(user), _) => user.full_name.clone().unwrap_or_else(|| user.username.clone()),
            (None, Some(_)) => "Signing in...".to_string(),
            (None, None) => "Not signed in".to_string(),
        })
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button class="top-header__toggle" title="Toggle sidebar" on:click=move |_| ctx.toggle_left()>
                    "☰"
                </button>
                <span class="top-header__title">"EV Charging Console"</span>
            </div>
            <div class="top-header__user">
                <span>{user_label}</span>
                <Show when=move || auth_state.with(|s| s.access_token.is_some())>
                    <button class="top-header__logout" on:click=move |_| do_logout(set_auth_state)>
                        "Sign out"
                    </button>
                </Show>
            </div>
        </div>
    }
}
