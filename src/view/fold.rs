//! Strict left fold over all rows.

use crate::row::Row;
use crate::view::TableView;

impl TableView {
    /// Fold every row into an accumulator, strictly left to right.
    ///
    /// `combine` sees the accumulator and the row (all columns, 1-based ordinals) for each
    /// row in order; the final accumulator is returned. Zero rows return `init` unchanged
    /// without invoking `combine`.
    pub fn fold_left<A, F>(&self, init: A, mut combine: F) -> A
    where
        F: FnMut(A, Row<'_>) -> A,
    {
        self.rows()
            .iter()
            .fold(init, |acc, tuple| combine(acc, Row::new(tuple)))
    }
}
