//! Row-wise transformation, untyped and typed.
//!
//! [`TableView::map`] collects transform outputs into a freshly built table, growing as it
//! goes. [`TableView::typed_map`] takes an output element descriptor up front, pre-allocates
//! the whole output buffer to the view's cached row count, and writes each result into its
//! slot in place. The two produce value-for-value identical results, except that typed text
//! output is truncated to the descriptor's fixed width.

use crate::error::{QueryError, QueryResult};
use crate::row::Row;
use crate::table::{Table, TypedBuffer};
use crate::types::{ElementType, Value};
use crate::view::TableView;

/// Result of one transform invocation.
///
/// A transform either produces a single cell per row ([`MapOutput::Scalar`]) or a flat tuple
/// of cells ([`MapOutput::Composite`]), one output column per entry. The first produced value
/// fixes the shape for the whole operation, composite arity included.
#[derive(Debug, Clone, PartialEq)]
pub enum MapOutput {
    /// One output column.
    Scalar(Value),
    /// One output column per entry.
    Composite(Vec<Value>),
}

impl MapOutput {
    fn shape(&self) -> Shape {
        match self {
            MapOutput::Scalar(_) => Shape::Scalar,
            MapOutput::Composite(values) => Shape::Composite(values.len()),
        }
    }

    fn into_values(self) -> Vec<Value> {
        match self {
            MapOutput::Scalar(value) => vec![value],
            MapOutput::Composite(values) => values,
        }
    }
}

impl From<Value> for MapOutput {
    fn from(value: Value) -> Self {
        MapOutput::Scalar(value)
    }
}

impl From<Vec<Value>> for MapOutput {
    fn from(values: Vec<Value>) -> Self {
        MapOutput::Composite(values)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Scalar,
    Composite(usize),
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Scalar => f.write_str("scalar"),
            Shape::Composite(arity) => write!(f, "composite of {arity}"),
        }
    }
}

impl TableView {
    /// Apply `transform` to each row of the named columns, collecting the outputs into a new
    /// view with index-based default column names ("0", "1", ...).
    ///
    /// Column names are validated before any row is processed (first missing name is
    /// [`QueryError::ColumnNotFound`]); the transform sees the columns in the order given,
    /// addressable through the row's 1-based ordinals. The first output fixes the result
    /// shape; a later row producing a different shape fails with [`QueryError::Schema`].
    /// An empty view maps to an empty view without invoking the transform.
    pub fn map<F>(&self, mut transform: F, columns: &[&str]) -> QueryResult<TableView>
    where
        F: FnMut(Row<'_>) -> MapOutput,
    {
        let projected = self.table().project_names(columns)?;
        let rows = projected.rows_as_tuples();

        let mut outputs: Vec<Vec<Value>> = Vec::with_capacity(rows.len());
        let mut shape: Option<Shape> = None;
        for (index, tuple) in rows.iter().enumerate() {
            let output = transform(Row::new(tuple));
            match shape {
                None => shape = Some(output.shape()),
                Some(expected) if expected != output.shape() => {
                    return Err(QueryError::Schema {
                        message: format!(
                            "map output row {index} is {}, rows before it were {expected}",
                            output.shape()
                        ),
                    });
                }
                Some(_) => {}
            }
            outputs.push(output.into_values());
        }

        Ok(TableView::new(Table::from_rows(outputs)?))
    }

    /// Apply `transform` to each row of the named columns, writing the outputs into a buffer
    /// pre-allocated for `output_type` and the view's cached row count.
    ///
    /// Validation happens before any row is processed: column names as in [`TableView::map`],
    /// then the descriptor itself ([`QueryError::InvalidOutputType`] if unrecognized). Each
    /// output must conform to the descriptor or the operation fails with
    /// [`QueryError::Schema`]; text written into a fixed-width slot is truncated to the
    /// slot's character width. Results match [`TableView::map`] value for value, modulo that
    /// truncation.
    pub fn typed_map<F>(
        &self,
        mut transform: F,
        output_type: &ElementType,
        columns: &[&str],
    ) -> QueryResult<TableView>
    where
        F: FnMut(Row<'_>) -> MapOutput,
    {
        let projected = self.table().project_names(columns)?;
        let mut buffer = TypedBuffer::new(output_type, self.row_count())?;

        for (index, tuple) in projected.rows_as_tuples().iter().enumerate() {
            let output = transform(Row::new(tuple));
            buffer.write(index, output.into_values())?;
        }

        Ok(TableView::new(Table::from_typed_buffer(buffer)))
    }
}
