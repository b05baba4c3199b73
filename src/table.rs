//! Column-major table storage.
//!
//! [`Table`] is the storage collaborator underneath [`crate::view::TableView`]: an ordered
//! sequence of named columns, each a `Vec<Value>` of uniform logical type, all sharing one
//! length. Construction validates the invariants and surfaces [`QueryError::Schema`] for
//! malformed input; the query layer on top never mutates a table after construction.

use crate::error::{QueryError, QueryResult};
use crate::types::{DataType, ElementType, Field, Schema, Value};

/// Ordered, column-major tabular storage with uniform column lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: Schema,
    columns: Vec<Vec<Value>>,
    row_count: usize,
}

impl Table {
    /// Create a table from named columns.
    ///
    /// Infers each column's [`DataType`] from its first non-null value (an all-null column
    /// defaults to [`DataType::Utf8`]). Fails with [`QueryError::Schema`] if column lengths
    /// differ, a name repeats, or a column mixes value types.
    pub fn new(columns: Vec<(impl Into<String>, Vec<Value>)>) -> QueryResult<Self> {
        let mut fields = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());

        let mut row_count: Option<usize> = None;
        for (name, values) in columns {
            let name = name.into();
            if fields.iter().any(|f: &Field| f.name == name) {
                return Err(QueryError::Schema {
                    message: format!("duplicate column name '{name}'"),
                });
            }
            match row_count {
                None => row_count = Some(values.len()),
                Some(n) if n != values.len() => {
                    return Err(QueryError::Schema {
                        message: format!(
                            "column '{}' has {} rows, expected {}",
                            name,
                            values.len(),
                            n
                        ),
                    });
                }
                Some(_) => {}
            }
            let data_type = infer_column_type(&name, &values)?;
            fields.push(Field::new(name, data_type));
            data.push(values);
        }

        Ok(Self {
            schema: Schema::new(fields),
            row_count: row_count.unwrap_or(0),
            columns: data,
        })
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            schema: Schema::new(Vec::new()),
            columns: Vec::new(),
            row_count: 0,
        }
    }

    /// Create a table from row tuples, with index-based default column names ("0", "1", ...).
    ///
    /// The column count comes from the first row; a later row with a different arity fails
    /// with [`QueryError::Schema`]. Empty input yields [`Table::empty`].
    pub fn from_rows(rows: Vec<Vec<Value>>) -> QueryResult<Self> {
        let Some(first) = rows.first() else {
            return Ok(Self::empty());
        };
        let width = first.len();
        let names: Vec<String> = (0..width).map(|i| i.to_string()).collect();
        Self::from_rows_named(names, rows)
    }

    /// Create a table from row tuples, reusing an existing schema's column names.
    ///
    /// The names are taken as given (a projection may have repeated one, so no uniqueness
    /// check is re-run). Column types are re-inferred from the rows rather than copied, so an
    /// all-null column in the kept rows does not claim a type it cannot prove; with zero rows
    /// every type defaults to [`DataType::Utf8`]. Row arity must match the schema's field
    /// count.
    pub fn from_rows_with_schema(schema: &Schema, rows: Vec<Vec<Value>>) -> QueryResult<Self> {
        let width = schema.len();
        let row_count = rows.len();
        let mut columns: Vec<Vec<Value>> = (0..width)
            .map(|_| Vec::with_capacity(row_count))
            .collect();

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(QueryError::Schema {
                    message: format!("row {i} has {} values, schema has {width} fields", row.len()),
                });
            }
            for (col, value) in columns.iter_mut().zip(row) {
                col.push(value);
            }
        }

        let fields = schema
            .field_names()
            .zip(&columns)
            .map(|(name, values)| {
                let data_type = infer_column_type(name, values)?;
                Ok(Field::new(name, data_type))
            })
            .collect::<QueryResult<Vec<_>>>()?;

        Ok(Self {
            schema: Schema::new(fields),
            columns,
            row_count,
        })
    }

    fn from_rows_named(names: Vec<String>, rows: Vec<Vec<Value>>) -> QueryResult<Self> {
        let width = names.len();
        let mut columns: Vec<Vec<Value>> = (0..width)
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(QueryError::Schema {
                    message: format!("row {i} has {} values, expected {width}", row.len()),
                });
            }
            for (col, value) in columns.iter_mut().zip(row) {
                col.push(value);
            }
        }

        Self::new(names.into_iter().zip(columns).collect::<Vec<_>>())
    }

    /// Wrap a filled [`TypedBuffer`] as a table.
    ///
    /// A scalar element type becomes a single column; a composite becomes one column per
    /// sub-field. Column names are index-based defaults, as with [`Table::from_rows`].
    pub fn from_typed_buffer(buffer: TypedBuffer) -> Self {
        let (element_types, columns, row_count) = buffer.into_parts();
        let fields = element_types
            .iter()
            .enumerate()
            .map(|(i, et)| {
                let data_type = et
                    .scalar_data_type()
                    .unwrap_or(DataType::Utf8);
                Field::new(i.to_string(), data_type)
            })
            .collect();
        Self {
            schema: Schema::new(fields),
            columns,
            row_count,
        }
    }

    /// The table's schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Values of the column at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= column_count()`.
    pub fn column(&self, index: usize) -> &[Value] {
        &self.columns[index]
    }

    /// Column-subset copy in the order given, duplicates preserved positionally.
    ///
    /// Every name is checked before any column is copied; the first missing name fails with
    /// [`QueryError::ColumnNotFound`]. A projection may repeat a name, so the result is built
    /// directly rather than through [`Table::new`] and its uniqueness check.
    pub fn project_names(&self, names: &[&str]) -> QueryResult<Self> {
        let mut indices = Vec::with_capacity(names.len());
        for name in names {
            match self.schema.index_of(name) {
                Some(idx) => indices.push(idx),
                None => {
                    return Err(QueryError::ColumnNotFound {
                        column: (*name).to_string(),
                    });
                }
            }
        }
        Ok(self.copy_columns(&indices))
    }

    /// Column-subset copy at the given positions, in the order given.
    ///
    /// Every position is bounds-checked before any column is copied; the first out-of-range
    /// position fails with [`QueryError::PositionOutOfRange`].
    pub fn project_positions(&self, positions: &[usize]) -> QueryResult<Self> {
        for &pos in positions {
            if pos >= self.columns.len() {
                return Err(QueryError::PositionOutOfRange {
                    position: pos as i64,
                    column_count: self.columns.len(),
                });
            }
        }
        Ok(self.copy_columns(positions))
    }

    fn copy_columns(&self, indices: &[usize]) -> Self {
        let fields = indices
            .iter()
            .map(|&i| self.schema.fields[i].clone())
            .collect();
        let columns = indices.iter().map(|&i| self.columns[i].clone()).collect();
        Self {
            schema: Schema::new(fields),
            columns,
            row_count: self.row_count,
        }
    }

    /// Row-major materialization of the column-major storage.
    ///
    /// Used by the query layer before per-row processing; each tuple holds the row's values
    /// in column order.
    pub fn rows_as_tuples(&self) -> Vec<Vec<Value>> {
        (0..self.row_count)
            .map(|row| self.columns.iter().map(|col| col[row].clone()).collect())
            .collect()
    }
}

fn infer_column_type(name: &str, values: &[Value]) -> QueryResult<DataType> {
    let data_type = values
        .iter()
        .find_map(Value::data_type)
        .unwrap_or(DataType::Utf8);
    for (row, value) in values.iter().enumerate() {
        if !value.conforms_to(data_type) {
            return Err(QueryError::Schema {
                message: format!(
                    "column '{name}' row {row}: {value:?} does not conform to {data_type:?}"
                ),
            });
        }
    }
    Ok(data_type)
}

/// A pre-sized, pre-typed output buffer written in place by the typed-map path.
///
/// Allocation happens once, up front, for a fixed row count; each transform result is written
/// directly into its row slot instead of growing a list incrementally.
#[derive(Debug)]
pub struct TypedBuffer {
    element_types: Vec<ElementType>,
    columns: Vec<Vec<Value>>,
    len: usize,
}

impl TypedBuffer {
    /// Allocate a buffer of `len` slots of `element_type`.
    ///
    /// Fails with [`QueryError::InvalidOutputType`] if the descriptor is unrecognized
    /// (see [`ElementType::validate`]).
    pub fn new(element_type: &ElementType, len: usize) -> QueryResult<Self> {
        element_type.validate()?;
        let element_types: Vec<ElementType> = match element_type {
            ElementType::Composite(fields) => fields.clone(),
            scalar => vec![scalar.clone()],
        };
        let columns = element_types
            .iter()
            .map(|_| vec![Value::Null; len])
            .collect();
        Ok(Self {
            element_types,
            columns,
            len,
        })
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer has zero slots.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Values per slot: 1 for a scalar element type, the field count for a composite.
    pub fn width(&self) -> usize {
        self.element_types.len()
    }

    /// Write one element into slot `index`, in place.
    ///
    /// `values` must carry exactly [`TypedBuffer::width`] values, each conforming to its
    /// element type; otherwise the write fails with [`QueryError::Schema`]. Text written into
    /// a fixed-width slot is truncated to the slot's width in characters.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn write(&mut self, index: usize, values: Vec<Value>) -> QueryResult<()> {
        assert!(index < self.len, "slot {index} out of range [0, {})", self.len);
        if values.len() != self.element_types.len() {
            return Err(QueryError::Schema {
                message: format!(
                    "typed output row {index} has {} values, element type has {}",
                    values.len(),
                    self.element_types.len()
                ),
            });
        }
        for (field, (element_type, value)) in
            self.element_types.iter().zip(values).enumerate()
        {
            let encoded = encode_element(element_type, value).map_err(|message| {
                QueryError::Schema {
                    message: format!("typed output row {index} field {field}: {message}"),
                }
            })?;
            self.columns[field][index] = encoded;
        }
        Ok(())
    }

    fn into_parts(self) -> (Vec<ElementType>, Vec<Vec<Value>>, usize) {
        (self.element_types, self.columns, self.len)
    }
}

fn encode_element(element_type: &ElementType, value: Value) -> Result<Value, String> {
    match (element_type, value) {
        (_, Value::Null) => Ok(Value::Null),
        (ElementType::Int64, v @ Value::Int64(_)) => Ok(v),
        (ElementType::Float64, v @ Value::Float64(_)) => Ok(v),
        (ElementType::Bool, v @ Value::Bool(_)) => Ok(v),
        (ElementType::FixedUtf8(width), Value::Utf8(s)) => {
            if s.chars().count() > *width {
                Ok(Value::Utf8(s.chars().take(*width).collect()))
            } else {
                Ok(Value::Utf8(s))
            }
        }
        (et, v) => Err(format!("{v:?} does not conform to {et:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{Table, TypedBuffer};
    use crate::error::QueryError;
    use crate::types::{DataType, ElementType, Value};

    fn utf8(s: &str) -> Value {
        Value::Utf8(s.to_string())
    }

    fn sample_table() -> Table {
        Table::new(vec![
            ("a", vec![utf8("one"), utf8("two")]),
            ("d", vec![Value::Int64(1), Value::Int64(2)]),
        ])
        .unwrap()
    }

    #[test]
    fn new_infers_column_types() {
        let table = sample_table();
        assert_eq!(table.schema().fields[0].data_type, DataType::Utf8);
        assert_eq!(table.schema().fields[1].data_type, DataType::Int64);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn new_rejects_ragged_columns() {
        let err = Table::new(vec![
            ("a", vec![utf8("one")]),
            ("d", vec![Value::Int64(1), Value::Int64(2)]),
        ])
        .unwrap_err();
        assert!(matches!(err, QueryError::Schema { .. }));
    }

    #[test]
    fn new_rejects_duplicate_names() {
        let err = Table::new(vec![
            ("a", vec![Value::Int64(1)]),
            ("a", vec![Value::Int64(2)]),
        ])
        .unwrap_err();
        assert!(matches!(err, QueryError::Schema { .. }));
    }

    #[test]
    fn new_rejects_mixed_value_types() {
        let err = Table::new(vec![("a", vec![Value::Int64(1), utf8("two")])]).unwrap_err();
        assert!(matches!(err, QueryError::Schema { .. }));
    }

    #[test]
    fn all_null_column_defaults_to_utf8() {
        let table = Table::new(vec![("a", vec![Value::Null, Value::Null])]).unwrap();
        assert_eq!(table.schema().fields[0].data_type, DataType::Utf8);
    }

    #[test]
    fn from_rows_uses_index_based_names() {
        let table = Table::from_rows(vec![
            vec![Value::Int64(1), utf8("x")],
            vec![Value::Int64(2), utf8("y")],
        ])
        .unwrap();
        assert_eq!(
            table.schema().field_names().collect::<Vec<_>>(),
            vec!["0", "1"]
        );
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let err = Table::from_rows(vec![
            vec![Value::Int64(1), utf8("x")],
            vec![Value::Int64(2)],
        ])
        .unwrap_err();
        assert!(matches!(err, QueryError::Schema { .. }));
    }

    #[test]
    fn from_rows_empty_input_yields_empty_table() {
        let table = Table::from_rows(Vec::new()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn project_names_preserves_caller_order_and_duplicates() {
        let table = sample_table();
        let projected = table.project_names(&["d", "a", "d"]).unwrap();
        assert_eq!(
            projected.schema().field_names().collect::<Vec<_>>(),
            vec!["d", "a", "d"]
        );
        assert_eq!(projected.column(0), projected.column(2));
        assert_eq!(projected.row_count(), 2);
    }

    #[test]
    fn from_rows_with_schema_keeps_names_and_reinfers_types() {
        let table = sample_table();
        let kept = Table::from_rows_with_schema(
            table.schema(),
            vec![vec![utf8("two"), Value::Int64(2)]],
        )
        .unwrap();
        assert_eq!(
            kept.schema().field_names().collect::<Vec<_>>(),
            vec!["a", "d"]
        );
        assert_eq!(kept.schema().fields[1].data_type, DataType::Int64);
        assert_eq!(kept.row_count(), 1);
    }

    #[test]
    fn from_rows_with_schema_accepts_repeated_names_and_zero_rows() {
        let projected = sample_table().project_names(&["a", "a"]).unwrap();
        let kept = Table::from_rows_with_schema(projected.schema(), Vec::new()).unwrap();
        assert_eq!(
            kept.schema().field_names().collect::<Vec<_>>(),
            vec!["a", "a"]
        );
        assert_eq!(kept.row_count(), 0);
        assert_eq!(kept.schema().fields[0].data_type, DataType::Utf8);
    }

    #[test]
    fn project_names_fails_on_first_missing_column() {
        let table = sample_table();
        let err = table.project_names(&["missing", "also-missing"]).unwrap_err();
        match err {
            QueryError::ColumnNotFound { column } => assert_eq!(column, "missing"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rows_as_tuples_is_row_major() {
        let table = sample_table();
        assert_eq!(
            table.rows_as_tuples(),
            vec![
                vec![utf8("one"), Value::Int64(1)],
                vec![utf8("two"), Value::Int64(2)],
            ]
        );
    }

    #[test]
    fn typed_buffer_writes_in_place_and_truncates_text() {
        let mut buffer = TypedBuffer::new(&ElementType::FixedUtf8(3), 2).unwrap();
        buffer.write(0, vec![utf8("abcdef")]).unwrap();
        buffer.write(1, vec![utf8("xy")]).unwrap();

        let table = Table::from_typed_buffer(buffer);
        assert_eq!(table.column(0), &[utf8("abc"), utf8("xy")]);
        assert_eq!(table.schema().fields[0].data_type, DataType::Utf8);
    }

    #[test]
    fn typed_buffer_rejects_nonconforming_values() {
        let mut buffer = TypedBuffer::new(&ElementType::Int64, 1).unwrap();
        let err = buffer.write(0, vec![utf8("not an int")]).unwrap_err();
        assert!(matches!(err, QueryError::Schema { .. }));
    }

    #[test]
    fn typed_buffer_composite_becomes_one_column_per_field() {
        let element = ElementType::Composite(vec![ElementType::Int64, ElementType::Float64]);
        let mut buffer = TypedBuffer::new(&element, 2).unwrap();
        buffer
            .write(0, vec![Value::Int64(1), Value::Float64(0.5)])
            .unwrap();
        buffer
            .write(1, vec![Value::Int64(2), Value::Float64(1.5)])
            .unwrap();

        let table = Table::from_typed_buffer(buffer);
        assert_eq!(table.column_count(), 2);
        assert_eq!(
            table.schema().field_names().collect::<Vec<_>>(),
            vec!["0", "1"]
        );
        assert_eq!(table.column(0), &[Value::Int64(1), Value::Int64(2)]);
        assert_eq!(table.column(1), &[Value::Float64(0.5), Value::Float64(1.5)]);
    }
}
