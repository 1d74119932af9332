pub mod pagination_controls;
pub mod status_badge;
pub mod table;

pub use pagination_controls::{PaginationControls, PaginationState, PaginationVisibility};
pub use status_badge::status_badge;
