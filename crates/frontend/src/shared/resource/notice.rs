use super::entity::{Operation, ResourceNames};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Success,
    Error,
    Info,
}

/// User-visible outcome of an operation. The binding builds it; the UI
/// decides how to show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn success(names: &ResourceNames, op: Operation) -> Self {
        let label = names.label();
        Self {
            title: format!("{} {}", capitalize(&label), op.done_verb()),
            description: format!("The {} was {} successfully.", label, op.done_verb()),
            variant: NoticeVariant::Success,
        }
    }

    pub fn failure(names: &ResourceNames, op: Operation, message: &str) -> Self {
        Self {
            title: format!("Failed to {} {}", op.verb(), names.label()),
            description: message.to_string(),
            variant: NoticeVariant::Error,
        }
    }
}

/// Receives notices; fire-and-forget.
pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
