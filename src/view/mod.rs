//! Query operations over an immutable table view.
//!
//! A [`TableView`] wraps one [`crate::table::Table`] and exposes the query surface. Every
//! producing operation returns a new view backed by a fresh table; the source view is never
//! modified.
//!
//! Operations:
//!
//! - [`TableView::select`] / [`TableView::select_by_position`]: column projection
//! - [`TableView::map`] / [`TableView::typed_map`]: row-wise transformation
//! - [`TableView::filter`]: row filtering by predicate
//! - [`TableView::fold_left`]: strict left fold over all rows
//!
//! ## Example: select → map → filter → fold
//!
//! ```rust
//! use table_query::table::Table;
//! use table_query::types::Value;
//! use table_query::view::{MapOutput, TableView};
//!
//! let table = Table::new(vec![
//!     ("name", vec![Value::Utf8("one".into()), Value::Utf8("two".into())]),
//!     ("count", vec![Value::Int64(1), Value::Int64(2)]),
//! ])
//! .unwrap();
//! let view = TableView::new(table);
//!
//! // Project, then double the count column.
//! let doubled = view
//!     .map(
//!         |row| MapOutput::Scalar(Value::Int64(row.field(2).as_i64().unwrap() * 2)),
//!         &["name", "count"],
//!     )
//!     .unwrap();
//!
//! // Keep only the rows that doubled to 4.
//! let kept = doubled.filter(|row| row.field(1).as_i64() == Some(4));
//! assert_eq!(kept.row_count(), 1);
//!
//! // Sum the original counts.
//! let total = view.fold_left(0i64, |acc, row| acc + row.field(2).as_i64().unwrap_or(0));
//! assert_eq!(total, 3);
//! ```

pub mod filter;
pub mod fold;
pub mod map;
pub mod select;

pub use map::MapOutput;

use std::fmt;

use crate::table::Table;
use crate::types::Value;

/// An immutable view over one backing [`Table`].
///
/// Column names and the row count are cached at construction; operations that need them read
/// the cache rather than re-deriving them from the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    table: Table,
    column_names: Vec<String>,
    row_count: usize,
}

impl TableView {
    /// Wrap a table, caching its column names and row count.
    ///
    /// The table constructors enforce the storage invariants, so a view assumes a well-formed
    /// table.
    pub fn new(table: Table) -> Self {
        let column_names = table.schema().field_names().map(str::to_string).collect();
        let row_count = table.row_count();
        Self {
            table,
            column_names,
            row_count,
        }
    }

    /// The cached column names, in column order.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// The cached row count.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    /// The backing table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub(crate) fn rows(&self) -> Vec<Vec<Value>> {
        self.table.rows_as_tuples()
    }

    /// Serialize the view as a JSON array of row objects.
    ///
    /// Object keys follow `serde_json`'s map ordering; cell values use the untagged scalar
    /// representation of [`Value`].
    pub fn to_json(&self) -> serde_json::Result<String> {
        let rows: Vec<serde_json::Map<String, serde_json::Value>> = self
            .rows()
            .into_iter()
            .map(|row| {
                self.column_names
                    .iter()
                    .zip(row)
                    .map(|(name, value)| Ok((name.clone(), serde_json::to_value(value)?)))
                    .collect()
            })
            .collect::<serde_json::Result<_>>()?;
        serde_json::to_string(&rows)
    }
}

// Fixed-width text grid: header line, then one line per row, columns padded to the widest
// cell (in characters).
impl fmt::Display for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<Vec<String>> = self
            .rows()
            .iter()
            .map(|row| row.iter().map(Value::to_string).collect())
            .collect();

        let widths: Vec<usize> = self
            .column_names
            .iter()
            .enumerate()
            .map(|(col, name)| {
                rendered
                    .iter()
                    .map(|row| row[col].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let write_line = |f: &mut fmt::Formatter<'_>, cells: &[&str]| -> fmt::Result {
            for (col, cell) in cells.iter().enumerate() {
                if col > 0 {
                    f.write_str("  ")?;
                }
                if col + 1 == cells.len() {
                    f.write_str(cell)?;
                } else {
                    write!(f, "{cell:<width$}", width = widths[col])?;
                }
            }
            writeln!(f)
        };

        let header: Vec<&str> = self.column_names.iter().map(String::as_str).collect();
        write_line(f, &header)?;
        for row in &rendered {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            write_line(f, &cells)?;
        }
        Ok(())
    }
}
