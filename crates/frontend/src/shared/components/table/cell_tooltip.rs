//! Truncated cell text with the full text in a hover/tap overlay.

use leptos::prelude::*;

/// Cuts `text` to `max_chars` characters, marking the cut with "…".
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Both renderings come from the one `text` value the resolver produced.
#[component]
pub fn CellTooltip(
    #[prop(into)] text: String,
    #[prop(optional, default = 40)] max_chars: usize,
) -> impl IntoView {
    let open = RwSignal::new(false);
    let inline = truncate_text(&text, max_chars);
    let is_truncated = inline != text;

    view! {
        <span
            class="cell-tooltip"
            style="position: relative; display: inline-block; max-width: 100%;"
            on:mouseenter=move |_| open.set(true)
            on:mouseleave=move |_| open.set(false)
            on:click=move |ev| {
                // tap on touch screens
                ev.stop_propagation();
                open.update(|o| *o = !*o);
            }
        >
            <span class="cell-tooltip__inline">{inline}</span>
            <Show when=move || is_truncated && open.get()>
                <span
                    class="cell-tooltip__overlay"
                    role="tooltip"
                    style="position: absolute; left: 0; top: 100%; z-index: 20; padding: 4px 8px; background: #333; color: #fff; border-radius: 4px; white-space: normal; max-width: 400px;"
                >
                    {text.clone()}
                </span>
            </Show>
        </span>
    }
}
