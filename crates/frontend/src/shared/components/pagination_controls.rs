use crate::shared::config::use_config;
use crate::shared::icons::icon;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

/// Pagination state, 1-based. Owned by the screen, rendered by
/// [`PaginationControls`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl PaginationState {
    /// `total_pages = max(1, ceil(total_items / page_size))`; the requested
    /// page is clamped into `[1, total_pages]`.
    pub fn new(total_items: usize, page_size: usize, requested_page: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size).max(1);
        Self {
            current_page: requested_page.clamp(1, total_pages),
            total_pages,
            total_items,
            page_size,
        }
    }

    pub fn is_first(&self) -> bool {
        self.current_page <= 1
    }

    pub fn is_last(&self) -> bool {
        self.current_page >= self.total_pages
    }

    /// Page a navigation button requests, `None` when the button is disabled.
    pub fn target(&self, nav: PageNav) -> Option<usize> {
        match nav {
            PageNav::First | PageNav::Prev if self.is_first() => None,
            PageNav::Next | PageNav::Last if self.is_last() => None,
            PageNav::First => Some(1),
            PageNav::Prev => Some(self.current_page - 1),
            PageNav::Next => Some(self.current_page + 1),
            PageNav::Last => Some(self.total_pages),
        }
    }

    /// Index range of the current page's rows.
    pub fn item_range(&self) -> std::ops::Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    First,
    Prev,
    Next,
    Last,
}

/// Whether the controls render when there is a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationVisibility {
    Always,
    #[default]
    HideSinglePage,
}

impl PaginationVisibility {
    pub fn shows(self, total_pages: usize) -> bool {
        match self {
            PaginationVisibility::Always => true,
            PaginationVisibility::HideSinglePage => total_pages > 1,
        }
    }
}

/// PaginationControls component - reusable pagination controls
///
/// Emits only pages inside `[1, total_pages]`; it never changes the page itself.
#[component]
pub fn PaginationControls(
    #[prop(into)]
    state: Signal<PaginationState>,

    /// Callback when page changes (1-based)
    on_page_change: Callback<usize>,

    /// Callback when page size changes; the select is hidden without it
    #[prop(optional)]
    on_page_size_change: Option<Callback<usize>>,

    /// Available page size options (defaults from config)
    #[prop(optional)]
    page_size_options: Option<Vec<usize>>,

    /// Defaults from config
    #[prop(optional)]
    visibility: Option<PaginationVisibility>,
) -> impl IntoView {
    let config = use_config();
    let visibility = visibility.unwrap_or(config.table.pagination);
    let page_size_opts = page_size_options.unwrap_or_else(|| config.table.page_size_options.clone());
    let default_size = config.table.page_size;

    let nav_button = move |nav: PageNav, icon_name: &'static str, title: &'static str| {
        view! {
            <button
                class="pagination-btn"
                on:click=move |_| {
                    if let Some(page) = state.get_untracked().target(nav) {
                        on_page_change.run(page);
                    }
                }
                disabled=move || state.get().target(nav).is_none()
                title=title
            >
                {icon(icon_name)}
            </button>
        }
    };

    let size_select = on_page_size_change.map(|on_size| {
        view! {
            <select
                class="page-size-select"
                on:change=move |ev| {
                    let val = event_target_value(&ev).parse().unwrap_or(default_size);
                    on_size.run(val);
                }
                prop:value=move || state.get().page_size.to_string()
            >
                {page_size_opts.iter().map(|&size| {
                    view! {
                        <option value={size.to_string()} selected=move || state.get().page_size == size>
                            {size.to_string()}
                        </option>
                    }
                }).collect_view()}
            </select>
        }
    });

    view! {
        <div
            class="pagination-controls"
            style:display=move || if visibility.shows(state.get().total_pages) { "" } else { "none" }
        >
            {nav_button(PageNav::First, "chevrons-left", "First page")}
            {nav_button(PageNav::Prev, "chevron-left", "Previous page")}
            <span class="pagination-info">
                {move || {
                    let s = state.get();
                    format!("{} / {} ({})", s.current_page, s.total_pages, s.total_items)
                }}
            </span>
            {nav_button(PageNav::Next, "chevron-right", "Next page")}
            {nav_button(PageNav::Last, "chevrons-right", "Last page")}
            {size_select}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [PageNav; 4] = [PageNav::First, PageNav::Prev, PageNav::Next, PageNav::Last];

    #[test]
    fn total_pages_arithmetic() {
        assert_eq!(PaginationState::new(0, 20, 1).total_pages, 1);
        assert_eq!(PaginationState::new(20, 20, 1).total_pages, 1);
        assert_eq!(PaginationState::new(21, 20, 1).total_pages, 2);
        assert_eq!(PaginationState::new(101, 10, 1).total_pages, 11);
        // page size 0 is treated as 1
        assert_eq!(PaginationState::new(3, 0, 1).total_pages, 3);
    }

    #[test]
    fn requested_page_is_clamped() {
        assert_eq!(PaginationState::new(50, 10, 0).current_page, 1);
        assert_eq!(PaginationState::new(50, 10, 99).current_page, 5);
        assert_eq!(PaginationState::new(0, 10, 3).current_page, 1);
    }

    #[test]
    fn first_page_disables_back_navigation() {
        let s = PaginationState::new(50, 10, 1);
        assert_eq!(s.target(PageNav::Prev), None);
        assert_eq!(s.target(PageNav::First), None);
        assert_eq!(s.target(PageNav::Next), Some(2));
        assert_eq!(s.target(PageNav::Last), Some(5));
    }

    #[test]
    fn last_page_disables_forward_navigation() {
        let s = PaginationState::new(50, 10, 5);
        assert_eq!(s.target(PageNav::Next), None);
        assert_eq!(s.target(PageNav::Last), None);
        assert_eq!(s.target(PageNav::Prev), Some(4));
    }

    #[test]
    fn targets_never_leave_bounds() {
        for total in 0..40 {
            for size in 1..7 {
                for page in 0..10 {
                    let s = PaginationState::new(total, size, page);
                    for nav in ALL {
                        if let Some(p) = s.target(nav) {
                            assert!((1..=s.total_pages).contains(&p), "{:?} {:?}", s, nav);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn item_range_of_last_partial_page() {
        let s = PaginationState::new(23, 10, 3);
        assert_eq!(s.item_range(), 20..23);
        assert_eq!(PaginationState::new(0, 10, 1).item_range(), 0..0);
    }

    #[test]
    fn visibility_policy() {
        assert!(!PaginationVisibility::HideSinglePage.shows(1));
        assert!(PaginationVisibility::HideSinglePage.shows(2));
        assert!(PaginationVisibility::Always.shows(1));
        assert_eq!(PaginationVisibility::default(), PaginationVisibility::HideSinglePage);
    }
}
