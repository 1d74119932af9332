pub mod cell;
pub mod cell_tooltip;
pub mod column;
pub mod data_table;
pub mod layout;
pub mod row_actions;
pub mod row_key;
pub mod sortable_header_cell;

pub use cell::{resolve_cell, resolve_path, resolve_text, row_json, CellContent, CellFallback, CellValue};
pub use cell_tooltip::CellTooltip;
pub use column::{Accessor, Column};
pub use data_table::{DataTable, RowClass};
pub use layout::{TableShape, TableState, SKELETON_ROWS};
pub use row_actions::{RowAction, RowActions, RowActionsCell};
pub use row_key::RowKey;
pub use sortable_header_cell::{SortControl, SortableHeaderCell};
