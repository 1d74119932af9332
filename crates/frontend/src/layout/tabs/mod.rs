//! Tab management module
//!
//! Содержит:
//! - `page` - компонент TabPage для обёртки контента таба
//! - `registry` - маппинг tab.key → View (единственный источник правды)
//! - `strip` - полоса открытых табов

pub mod page;
pub mod registry;
pub mod strip;

pub use page::TabPage;
pub use registry::TabRoute;
pub use strip::TabStrip;
