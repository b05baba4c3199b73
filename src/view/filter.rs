//! Row filtering by predicate.

use crate::row::Row;
use crate::table::Table;
use crate::types::Value;
use crate::view::TableView;

impl TableView {
    /// Keep the rows for which `predicate` returns true, in their original order.
    ///
    /// The predicate sees every column of the view, addressable through the row's 1-based
    /// ordinals. Kept rows carry their full value tuples and the result preserves the source
    /// schema, column names included. Zero matches yield a valid empty view.
    pub fn filter<P>(&self, mut predicate: P) -> TableView
    where
        P: FnMut(Row<'_>) -> bool,
    {
        let kept: Vec<Vec<Value>> = self
            .rows()
            .into_iter()
            .filter(|tuple| predicate(Row::new(tuple)))
            .collect();

        // Kept rows come straight out of a well-formed table, so rebuilding under the same
        // schema cannot fail.
        match Table::from_rows_with_schema(self.table().schema(), kept) {
            Ok(table) => TableView::new(table),
            Err(err) => unreachable!("filtered rows no longer fit their own schema: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::table::Table;
    use crate::types::Value;
    use crate::view::TableView;

    fn utf8(s: &str) -> Value {
        Value::Utf8(s.to_string())
    }

    fn sample_view() -> TableView {
        TableView::new(
            Table::new(vec![
                ("a", vec![utf8("one"), utf8("two"), utf8("one")]),
                ("d", vec![Value::Int64(1), Value::Int64(2), Value::Int64(3)]),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn filter_is_stable_and_keeps_full_tuples() {
        let view = sample_view();
        let kept = view.filter(|row| row.field(1).as_str() == Some("one"));
        assert_eq!(kept.row_count(), 2);
        assert_eq!(kept.table().column(0), &[utf8("one"), utf8("one")]);
        assert_eq!(
            kept.table().column(1),
            &[Value::Int64(1), Value::Int64(3)]
        );
    }

    #[test]
    fn filter_preserves_the_source_schema() {
        let view = sample_view();
        let kept = view.filter(|row| row.field(2).as_i64() == Some(2));
        assert_eq!(kept.column_names(), view.column_names());
        assert_eq!(
            kept.table().schema().fields,
            view.table().schema().fields
        );
    }

    #[test]
    fn filter_with_zero_matches_yields_a_valid_empty_view() {
        let view = sample_view();
        let kept = view.filter(|_| false);
        assert_eq!(kept.row_count(), 0);
        assert_eq!(kept.column_names(), view.column_names());
        let kept_again = kept.filter(|_| true);
        assert_eq!(kept_again.row_count(), 0);
    }

    #[test]
    fn filter_is_idempotent_for_the_same_predicate() {
        let view = sample_view();
        let predicate = |row: crate::row::Row<'_>| row.field(2).as_i64().unwrap() > 1;
        let once = view.filter(predicate);
        let twice = once.filter(predicate);
        assert_eq!(once, twice);
    }

    #[test]
    fn filter_works_on_a_view_with_repeated_column_names() {
        let view = sample_view().select(&["a", "a"]).unwrap();
        let kept = view.filter(|row| row.field(1).as_str() == Some("two"));
        assert_eq!(kept.row_count(), 1);
        assert_eq!(kept.column_names(), &["a".to_string(), "a".to_string()]);
    }

    #[test]
    fn filter_does_not_modify_the_source() {
        let view = sample_view();
        let before = view.clone();
        let _ = view.filter(|_| false);
        assert_eq!(view, before);
    }
}
