//! Per-row actions: view / edit / delete plus extra actions, the extras
//! folded into an overflow menu when there are many.

use leptos::prelude::*;
use std::sync::Arc;

use crate::shared::icons::icon;

pub type RowHandler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Extras shown inline; beyond this they move into the overflow menu.
pub const INLINE_EXTRA_LIMIT: usize = 2;

pub struct RowAction<T> {
    pub label: String,
    pub icon: Option<&'static str>,
    pub on_select: RowHandler<T>,
}

impl<T> Clone for RowAction<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            icon: self.icon,
            on_select: Arc::clone(&self.on_select),
        }
    }
}

impl<T> RowAction<T> {
    pub fn new<F>(label: impl Into<String>, on_select: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            icon: None,
            on_select: Arc::new(on_select),
        }
    }

    pub fn icon(mut self, name: &'static str) -> Self {
        self.icon = Some(name);
        self
    }
}

/// Capabilities a screen hands to the table. The action column exists only
/// when at least one is set.
pub struct RowActions<T> {
    pub on_view: Option<RowHandler<T>>,
    pub on_edit: Option<RowHandler<T>>,
    pub on_delete: Option<RowHandler<T>>,
    /// Disables the delete buttons while true (a delete in flight).
    pub delete_busy: Option<Signal<bool>>,
    pub extra: Vec<RowAction<T>>,
}

impl<T> Default for RowActions<T> {
    fn default() -> Self {
        Self {
            on_view: None,
            on_edit: None,
            on_delete: None,
            delete_busy: None,
            extra: Vec::new(),
        }
    }
}

impl<T> Clone for RowActions<T> {
    fn clone(&self) -> Self {
        Self {
            on_view: self.on_view.clone(),
            on_edit: self.on_edit.clone(),
            on_delete: self.on_delete.clone(),
            delete_busy: self.delete_busy,
            extra: self.extra.clone(),
        }
    }
}

impl<T> RowActions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view<F: Fn(&T) + Send + Sync + 'static>(mut self, f: F) -> Self {
        self.on_view = Some(Arc::new(f));
        self
    }

    pub fn edit<F: Fn(&T) + Send + Sync + 'static>(mut self, f: F) -> Self {
        self.on_edit = Some(Arc::new(f));
        self
    }

    pub fn delete<F: Fn(&T) + Send + Sync + 'static>(mut self, f: F) -> Self {
        self.on_delete = Some(Arc::new(f));
        self
    }

    pub fn delete_busy(mut self, busy: impl Into<Signal<bool>>) -> Self {
        self.delete_busy = Some(busy.into());
        self
    }

    pub fn extra(mut self, action: RowAction<T>) -> Self {
        self.extra.push(action);
        self
    }

    pub fn is_configured(&self) -> bool {
        self.on_view.is_some()
            || self.on_edit.is_some()
            || self.on_delete.is_some()
            || !self.extra.is_empty()
    }

    /// Extras split into (inline, overflow): the first
    /// `INLINE_EXTRA_LIMIT` stay inline, the rest go to the menu.
    pub fn split_extra(&self) -> (&[RowAction<T>], &[RowAction<T>]) {
        self.extra.split_at(self.extra.len().min(INLINE_EXTRA_LIMIT))
    }
}

fn action_button<T: Clone + Send + Sync + 'static>(
    row: T,
    handler: RowHandler<T>,
    title: String,
    icon_name: Option<&'static str>,
    class: &'static str,
    busy: Option<Signal<bool>>,
) -> AnyView {
    let label = match icon_name {
        Some(name) => icon(name),
        None => title.clone().into_any(),
    };
    view! {
        <button
            class=class
            title=title
            disabled=move || busy.is_some_and(|b| b.get())
            on:click=move |ev| {
                ev.stop_propagation();
                handler(&row);
            }
        >
            {label}
        </button>
    }
    .into_any()
}

#[component]
pub fn RowActionsCell<T>(row: T, actions: RowActions<T>) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
{
    let menu_open = RwSignal::new(false);
    let (inline_extra, overflow) = actions.split_extra();
    let overflow = overflow.to_vec();

    let mut buttons: Vec<AnyView> = Vec::new();
    if let Some(h) = actions.on_view.clone() {
        buttons.push(action_button(row.clone(), h, "View".into(), Some("eye"), "row-action", None));
    }
    if let Some(h) = actions.on_edit.clone() {
        buttons.push(action_button(row.clone(), h, "Edit".into(), Some("edit"), "row-action", None));
    }
    for action in inline_extra {
        buttons.push(action_button(
            row.clone(),
            Arc::clone(&action.on_select),
            action.label.clone(),
            action.icon,
            "row-action",
            None,
        ));
    }
    if let Some(h) = actions.on_delete.clone() {
        buttons.push(action_button(
            row.clone(),
            h,
            "Delete".into(),
            Some("trash"),
            "row-action row-action--danger",
            actions.delete_busy,
        ));
    }

    let overflow_menu = (!overflow.is_empty()).then(|| {
        let items = overflow
            .into_iter()
            .map(|action| {
                let row = row.clone();
                let handler = Arc::clone(&action.on_select);
                view! {
                    <li>
                        <button
                            class="row-actions__menu-item"
                            on:click=move |ev| {
                                ev.stop_propagation();
                                menu_open.set(false);
                                handler(&row);
                            }
                        >
                            {action.label}
                        </button>
                    </li>
                }
            })
            .collect_view();
        view! {
            <span class="row-actions__overflow" style="position: relative;">
                <button
                    class="row-action"
                    title="More"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        menu_open.update(|o| *o = !*o);
                    }
                >
                    {icon("more")}
                </button>
                <ul
                    class="row-actions__menu"
                    style=move || format!(
                        "position: absolute; right: 0; z-index: 30; list-style: none; margin: 0; padding: 4px 0; background: #fff; border: 1px solid #ddd; border-radius: 4px; display: {};",
                        if menu_open.get() { "block" } else { "none" }
                    )
                >
                    {items}
                </ul>
            </span>
        }
    });

    view! {
        <div class="row-actions" style="display: inline-flex; gap: 4px; align-items: center;">
            {buttons}
            {overflow_menu}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_actions_are_not_configured() {
        let actions = RowActions::<u32>::new();
        assert!(!actions.is_configured());
        assert!(RowActions::<u32>::new().delete(|_| {}).is_configured());
        assert!(RowActions::<u32>::new()
            .extra(RowAction::new("Reset", |_| {}))
            .is_configured());
    }

    #[test]
    fn extras_past_the_limit_go_to_overflow() {
        let two = RowActions::<u32>::new()
            .extra(RowAction::new("A", |_| {}))
            .extra(RowAction::new("B", |_| {}));
        assert_eq!(two.split_extra().0.len(), 2);
        assert!(two.split_extra().1.is_empty());

        let four = two
            .extra(RowAction::new("C", |_| {}))
            .extra(RowAction::new("D", |_| {}));
        let (inline, overflow) = four.split_extra();
        assert_eq!(inline.iter().map(|a| a.label.as_str()).collect::<Vec<_>>(), ["A", "B"]);
        assert_eq!(overflow.iter().map(|a| a.label.as_str()).collect::<Vec<_>>(), ["C", "D"]);
    }

    #[test]
    fn delete_busy_is_carried_by_clones() {
        let actions = RowActions::<u32>::new()
            .delete(|_| {})
            .delete_busy(Signal::stored(true));
        let copy = actions.clone();
        assert_eq!(copy.delete_busy.map(|b| b.get_untracked()), Some(true));
        assert!(RowActions::<u32>::new().delete_busy.is_none());
    }
}
