//! Toast notifications. [`NotificationService`] is the UI side of the
//! resource binding's [`NoticeSink`].

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use uuid::Uuid;

use crate::shared::icons::icon;
use crate::shared::resource::{Notice, NoticeSink, NoticeVariant};

/// Oldest toasts are dropped beyond this.
pub const MAX_TOASTS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub notice: Notice,
}

fn dismiss_after_ms(variant: NoticeVariant) -> u32 {
    match variant {
        NoticeVariant::Success => 4_000,
        NoticeVariant::Info => 5_000,
        NoticeVariant::Error => 8_000,
    }
}

fn push_bounded(toasts: &mut Vec<Toast>, toast: Toast) {
    toasts.push(toast);
    if toasts.len() > MAX_TOASTS {
        let overflow = toasts.len() - MAX_TOASTS;
        toasts.drain(..overflow);
    }
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    pub toasts: RwSignal<Vec<Toast>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
        }
    }

    pub fn dismiss(&self, id: Uuid) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }
}

impl NoticeSink for NotificationService {
    fn notify(&self, notice: Notice) {
        let id = Uuid::new_v4();
        let delay = dismiss_after_ms(notice.variant);
        self.toasts.update(|toasts| push_bounded(toasts, Toast { id, notice }));

        let svc = *self;
        Timeout::new(delay, move || svc.dismiss(id)).forget();
    }
}

#[component]
pub fn NotificationHost() -> impl IntoView {
    let svc = expect_context::<NotificationService>();

    view! {
        <div
            class="toast-host"
            style="position: fixed; right: 16px; bottom: 16px; z-index: 2000; display: flex; flex-direction: column; gap: 8px;"
        >
            <For
                each=move || svc.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = match toast.notice.variant {
                        NoticeVariant::Success => "toast toast--success",
                        NoticeVariant::Error => "toast toast--error",
                        NoticeVariant::Info => "toast toast--info",
                    };
                    let id = toast.id;
                    view! {
                        <div class=class role="status" style="min-width: 280px; padding: 10px 12px; border-radius: 6px; background: #fff; box-shadow: 0 2px 8px rgba(0,0,0,0.15);">
                            <div style="display: flex; justify-content: space-between; gap: 8px;">
                                <strong>{toast.notice.title}</strong>
                                <button
                                    style="background: none; border: none; cursor: pointer; padding: 0;"
                                    title="Close"
                                    on:click=move |_| svc.dismiss(id)
                                >
                                    {icon("x")}
                                </button>
                            </div>
                            <div class="toast__description">{toast.notice.description}</div>
                        </div>
                    }
                }
            />
        </div>
    }
}
