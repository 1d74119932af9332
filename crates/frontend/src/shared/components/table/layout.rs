//! Shape of the rendered table for each state. The renderer draws
//! exactly what these functions describe.

/// Placeholder rows drawn while loading.
pub const SKELETON_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    Loading,
    Empty,
    Populated(usize),
}

impl TableState {
    /// Loading wins over any rows already present.
    pub fn resolve(is_loading: bool, row_count: usize) -> Self {
        match (is_loading, row_count) {
            (true, _) => TableState::Loading,
            (false, 0) => TableState::Empty,
            (false, n) => TableState::Populated(n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableShape {
    pub columns: usize,
    pub has_actions: bool,
}

impl TableShape {
    pub fn new(columns: usize, has_actions: bool) -> Self {
        Self { columns, has_actions }
    }

    /// Header cells, the action column included.
    pub fn width(&self) -> usize {
        self.columns + usize::from(self.has_actions)
    }

    /// Column span covered by each body row. The empty state is one cell
    /// spanning the full width.
    pub fn body_rows(&self, state: TableState) -> Vec<usize> {
        match state {
            TableState::Loading => vec![self.width(); SKELETON_ROWS],
            TableState::Empty => vec![self.width()],
            TableState::Populated(n) => vec![self.width(); n],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_are_exclusive_and_exhaustive() {
        assert_eq!(TableState::resolve(true, 0), TableState::Loading);
        assert_eq!(TableState::resolve(true, 3), TableState::Loading);
        assert_eq!(TableState::resolve(false, 0), TableState::Empty);
        assert_eq!(TableState::resolve(false, 3), TableState::Populated(3));
    }

    #[test]
    fn header_matches_body_in_every_state() {
        for has_actions in [false, true] {
            let shape = TableShape::new(4, has_actions);
            for (loading, rows) in [(true, 0), (true, 2), (false, 0), (false, 7)] {
                let state = TableState::resolve(loading, rows);
                let body = shape.body_rows(state);
                assert!(!body.is_empty());
                assert!(body.iter().all(|w| *w == shape.width()), "{:?}", state);
            }
        }
        assert_eq!(TableShape::new(4, true).width(), 5);
        assert_eq!(TableShape::new(4, false).width(), 4);
    }

    #[test]
    fn loading_draws_fixed_skeleton() {
        let shape = TableShape::new(3, false);
        assert_eq!(shape.body_rows(TableState::Loading).len(), SKELETON_ROWS);
        assert_eq!(shape.body_rows(TableState::Empty).len(), 1);
    }
}
