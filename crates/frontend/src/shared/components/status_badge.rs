//! Badge for OCPP statuses (charger and connector).

use leptos::prelude::*;
use thaw::{Badge, BadgeAppearance, BadgeColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Good,
    Busy,
    Warning,
    Bad,
    Neutral,
}

/// Tone of an OCPP 1.6 ChargePointStatus value (case-insensitive).
pub fn status_tone(status: &str) -> StatusTone {
    match status.to_ascii_lowercase().as_str() {
        "available" => StatusTone::Good,
        "preparing" | "charging" | "finishing" | "reserved" => StatusTone::Busy,
        "suspendedev" | "suspendedevse" => StatusTone::Warning,
        "faulted" | "unavailable" => StatusTone::Bad,
        _ => StatusTone::Neutral,
    }
}

fn badge_color(tone: StatusTone) -> BadgeColor {
    match tone {
        StatusTone::Good => BadgeColor::Success,
        StatusTone::Busy => BadgeColor::Brand,
        StatusTone::Warning => BadgeColor::Warning,
        StatusTone::Bad => BadgeColor::Danger,
        StatusTone::Neutral => BadgeColor::Informative,
    }
}

/// Cell renderer; `None` shows as "Unknown".
pub fn status_badge(status: Option<&str>) -> AnyView {
    let label = status.unwrap_or("Unknown").to_string();
    let color = badge_color(status_tone(&label));
    view! {
        <Badge appearance=BadgeAppearance::Tint color=color>
            {label}
        </Badge>
    }
    .into_any()
}
