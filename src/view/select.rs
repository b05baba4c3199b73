//! Column projection by name and by ordinal position.

use crate::error::{QueryError, QueryResult};
use crate::view::TableView;

impl TableView {
    /// Project the named columns, in the order given, into a new view.
    ///
    /// Every name is validated before any column is copied; the first missing name fails with
    /// [`QueryError::ColumnNotFound`] and leaves the source untouched. A repeated name yields
    /// a repeated column.
    ///
    /// # Panics
    ///
    /// Panics if `names` is empty; a projection must name at least one column.
    pub fn select(&self, names: &[&str]) -> QueryResult<TableView> {
        assert!(!names.is_empty(), "select requires at least one column name");
        Ok(TableView::new(self.table().project_names(names)?))
    }

    /// Project the columns at the given 0-based positions into a new view.
    ///
    /// Positions are sorted ascending before bounds-checking and projection, so the result's
    /// columns always appear in ascending positional order regardless of the order given.
    /// A negative position fails with [`QueryError::InvalidPosition`]; a position at or past
    /// the column count fails with [`QueryError::PositionOutOfRange`]. Duplicates are kept.
    ///
    /// # Panics
    ///
    /// Panics if `positions` is empty; a projection must name at least one column.
    pub fn select_by_position(&self, positions: &[i64]) -> QueryResult<TableView> {
        assert!(
            !positions.is_empty(),
            "select_by_position requires at least one position"
        );
        for &position in positions {
            if position < 0 {
                return Err(QueryError::InvalidPosition { position });
            }
        }
        let mut sorted: Vec<usize> = positions.iter().map(|&p| p as usize).collect();
        sorted.sort_unstable();
        Ok(TableView::new(self.table().project_positions(&sorted)?))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::QueryError;
    use crate::table::Table;
    use crate::types::Value;
    use crate::view::TableView;

    fn utf8(s: &str) -> Value {
        Value::Utf8(s.to_string())
    }

    fn sample_view() -> TableView {
        TableView::new(
            Table::new(vec![
                ("a", vec![utf8("one"), utf8("two")]),
                ("b", vec![utf8("A"), utf8("B")]),
                ("d", vec![Value::Int64(1), Value::Int64(2)]),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn select_preserves_caller_order() {
        let view = sample_view();
        let selected = view.select(&["d", "a"]).unwrap();
        assert_eq!(
            selected.column_names(),
            &["d".to_string(), "a".to_string()]
        );
        assert_eq!(selected.table().column(0), &[Value::Int64(1), Value::Int64(2)]);
        assert_eq!(selected.row_count(), 2);
    }

    #[test]
    fn select_keeps_duplicate_names() {
        let view = sample_view();
        let selected = view.select(&["a", "a"]).unwrap();
        assert_eq!(selected.column_names(), &["a".to_string(), "a".to_string()]);
        assert_eq!(selected.table().column(0), selected.table().column(1));
    }

    #[test]
    fn select_reports_first_missing_column_and_leaves_source_untouched() {
        let view = sample_view();
        let before = view.clone();
        let err = view.select(&["a", "nope", "also-nope"]).unwrap_err();
        match err {
            QueryError::ColumnNotFound { column } => assert_eq!(column, "nope"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(view, before);
    }

    #[test]
    #[should_panic(expected = "at least one column name")]
    fn select_with_empty_list_panics() {
        sample_view().select(&[]).ok();
    }

    #[test]
    fn select_by_position_normalizes_to_ascending_order() {
        let view = sample_view();
        let selected = view.select_by_position(&[2, 0]).unwrap();
        assert_eq!(
            selected.column_names(),
            &["a".to_string(), "d".to_string()]
        );
    }

    #[test]
    fn select_by_position_rejects_negative_positions() {
        let view = sample_view();
        let err = view.select_by_position(&[0, -1]).unwrap_err();
        assert!(matches!(err, QueryError::InvalidPosition { position: -1 }));
    }

    #[test]
    fn select_by_position_rejects_out_of_range_positions() {
        let view = sample_view();
        let err = view.select_by_position(&[1, 3]).unwrap_err();
        match err {
            QueryError::PositionOutOfRange {
                position,
                column_count,
            } => {
                assert_eq!(position, 3);
                assert_eq!(column_count, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn select_by_position_keeps_duplicates() {
        let view = sample_view();
        let selected = view.select_by_position(&[1, 1]).unwrap();
        assert_eq!(selected.column_names(), &["b".to_string(), "b".to_string()]);
    }
}
