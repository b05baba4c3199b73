//! Core data model types for the query layer.
//!
//! A [`crate::table::Table`] stores values column-major, described by a [`Schema`] (a list of
//! typed [`Field`]s). [`ElementType`] describes the output element layout for the pre-allocated
//! typed-map path.

use serde::{Serialize, Serializer};

use crate::error::{QueryError, QueryResult};

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// An ordered list of fields describing a table's columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A single typed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the integer payload, if this is an [`Value::Int64`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the float payload, if this is a [`Value::Float64`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a [`Value::Utf8`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(v) => Some(v),
            _ => None,
        }
    }

    /// Logical type of this value; `None` for nulls, which carry no type of their own.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Int64(_) => Some(DataType::Int64),
            Value::Float64(_) => Some(DataType::Float64),
            Value::Bool(_) => Some(DataType::Bool),
            Value::Utf8(_) => Some(DataType::Utf8),
        }
    }

    /// Returns true if this value can live in a column of `data_type`.
    ///
    /// Nulls conform to every column type.
    pub fn conforms_to(&self, data_type: DataType) -> bool {
        match self.data_type() {
            None => true,
            Some(dt) => dt == data_type,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Utf8(v) => f.write_str(v),
        }
    }
}

// Untagged scalar representation, so a serialized row reads like the row itself
// rather than like the enum.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::Float64(v) => serializer.serialize_f64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Utf8(v) => serializer.serialize_str(v),
        }
    }
}

/// Output element descriptor for the pre-allocated typed-map path.
///
/// A descriptor is either a scalar element or a flat composite of scalar elements (each
/// sub-field becomes its own column in the result table). Text output is fixed-width: a
/// [`ElementType::FixedUtf8`] slot truncates written strings to `width` characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementType {
    /// 64-bit signed integer element.
    Int64,
    /// 64-bit float element.
    Float64,
    /// Boolean element.
    Bool,
    /// Fixed-width UTF-8 text element; strings longer than `width` characters are truncated.
    FixedUtf8(usize),
    /// Flat composite of scalar elements, one result column per entry.
    Composite(Vec<ElementType>),
}

impl ElementType {
    /// Validates that this descriptor is one the typed-map path recognizes.
    ///
    /// Rejected descriptors: zero-width text, empty composites, and nested composites
    /// (only flat fixed layouts are supported).
    pub fn validate(&self) -> QueryResult<()> {
        match self {
            ElementType::FixedUtf8(0) => Err(QueryError::InvalidOutputType {
                message: "fixed-width text element must have width > 0".to_string(),
            }),
            ElementType::Composite(fields) if fields.is_empty() => {
                Err(QueryError::InvalidOutputType {
                    message: "composite element must have at least one field".to_string(),
                })
            }
            ElementType::Composite(fields) => {
                for field in fields {
                    if matches!(field, ElementType::Composite(_)) {
                        return Err(QueryError::InvalidOutputType {
                            message: "composite elements cannot nest".to_string(),
                        });
                    }
                    field.validate()?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// The column [`DataType`] a scalar descriptor produces.
    ///
    /// Returns `None` for composites, which span multiple columns.
    pub fn scalar_data_type(&self) -> Option<DataType> {
        match self {
            ElementType::Int64 => Some(DataType::Int64),
            ElementType::Float64 => Some(DataType::Float64),
            ElementType::Bool => Some(DataType::Bool),
            ElementType::FixedUtf8(_) => Some(DataType::Utf8),
            ElementType::Composite(_) => None,
        }
    }
}
