//! PageFrame: standard root wrapper for every page rendered inside a tab.
//!
//! Sets `id="{entity}--{category}"` and `data-page-category` on the root
//! element, and renders the page header with its action buttons.
//!
//! ```rust
//! view! {
//!     <PageFrame page_id="a001_charger--list" category=PageCategory::List title="Chargers">
//!         <DataTable ... />
//!     </PageFrame>
//! }
//! ```

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCategory {
    List,
    Detail,
}

impl PageCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            PageCategory::List => "list",
            PageCategory::Detail => "detail",
        }
    }

    fn class(self) -> &'static str {
        match self {
            PageCategory::List => "page",
            PageCategory::Detail => "page page--detail",
        }
    }
}

#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`, e.g. `"a001_charger--list"`.
    page_id: &'static str,
    category: PageCategory,
    #[prop(into)] title: Signal<String>,
    /// Buttons and inputs shown at the right of the header
    #[prop(optional)]
    actions: Option<AnyView>,
    children: Children,
) -> impl IntoView {
    view! {
        <div id=page_id class=category.class() data-page-category=category.as_str()>
            <div class="page-header">
                <h1 class="page-header__title">{move || title.get()}</h1>
                <div class="page-header__actions">
                    {actions}
                </div>
            </div>
            <div class="page__content">{children()}</div>
        </div>
    }
}

/// Error banner for a failed load.
#[component]
pub fn ErrorBanner(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    move || {
        error.get().map(|e| {
            view! {
                <div class="warning-box" style="background: var(--color-error-50); border-color: var(--color-error-100);">
                    <span class="warning-box__icon" style="color: var(--color-error);">"⚠"</span>
                    <span class="warning-box__text" style="color: var(--color-error);">{e}</span>
                </div>
            }
        })
    }
}
