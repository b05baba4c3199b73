//! `table-query` is a small functional query layer over an in-memory, column-major
//! [`table::Table`].
//!
//! A [`view::TableView`] wraps one table and exposes the query surface: column projection by
//! name or 0-based ordinal, row-wise transformation (untyped, or typed against a pre-allocated
//! output buffer), row filtering, and a strict left fold. Every producing operation returns a
//! new view backed by a fresh table; views are immutable.
//!
//! **Cell + schema types:**
//!
//! Cells are typed [`types::Value`]s described by a [`types::Schema`] of named
//! [`types::Field`]s. Supported logical types are:
//!
//! - [`types::DataType::Int64`]
//! - [`types::DataType::Float64`]
//! - [`types::DataType::Bool`]
//! - [`types::DataType::Utf8`]
//!
//! [`types::Value::Null`] marks a missing cell and conforms to every column type.
//!
//! ## Quick example: project and fold
//!
//! ```rust
//! use table_query::table::Table;
//! use table_query::types::Value;
//! use table_query::view::TableView;
//!
//! # fn main() -> Result<(), table_query::QueryError> {
//! let table = Table::new(vec![
//!     ("a", vec![Value::Utf8("one".into()), Value::Utf8("two".into())]),
//!     ("d", vec![Value::Int64(1), Value::Int64(2)]),
//! ])?;
//! let view = TableView::new(table);
//!
//! let projected = view.select(&["a", "d"])?;
//! assert_eq!(projected.row_count(), 2);
//!
//! let total = view.fold_left(0i64, |acc, row| acc + row.field(2).as_i64().unwrap_or(0));
//! assert_eq!(total, 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`view`]: the query surface (select / map / typed_map / filter / fold_left)
//! - [`table`]: column-major storage and the typed output buffer
//! - [`row`]: read-only positional access to one row (1-based ordinals)
//! - [`types`]: schema, cell values, output element descriptors
//! - [`error`]: error types used across the query layer
//!
//! ## Transformation example
//!
//! ```rust
//! use table_query::table::Table;
//! use table_query::types::{ElementType, Value};
//! use table_query::view::{MapOutput, TableView};
//!
//! # fn main() -> Result<(), table_query::QueryError> {
//! let table = Table::new(vec![
//!     ("name", vec![Value::Utf8("alpha".into()), Value::Utf8("beta".into())]),
//!     ("count", vec![Value::Int64(10), Value::Int64(20)]),
//! ])?;
//! let view = TableView::new(table);
//!
//! // Untyped map: the collected outputs get index-based column names.
//! let mapped = view.map(
//!     |row| MapOutput::Scalar(Value::Int64(row.field(2).as_i64().unwrap() + 1)),
//!     &["name", "count"],
//! )?;
//! assert_eq!(mapped.column_names(), &["0".to_string()]);
//!
//! // Typed map: same outputs, written into a buffer pre-allocated for the row count,
//! // with text truncated to the descriptor's fixed width.
//! let typed = view.typed_map(
//!     |row| MapOutput::Scalar(row.field(1).clone()),
//!     &ElementType::FixedUtf8(4),
//!     &["name"],
//! )?;
//! assert_eq!(typed.table().column(0), &[Value::Utf8("alph".into()), Value::Utf8("beta".into())]);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod row;
pub mod table;
pub mod types;
pub mod view;

pub use error::{QueryError, QueryResult};
