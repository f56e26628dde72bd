//! The engine's loosely-typed input currency.
//!
//! This module provides [`Value`], the owned representation of one piece of
//! raw input (a decoded JSON node, a form field, an uploaded file), and
//! [`FilePart`] for multipart file payloads.

use indexmap::IndexMap;

/// An uploaded file from a multipart form.
///
/// `FilePart` carries the metadata and bytes of one file field. It is the
/// destination type for [`FileSchema`](crate::FileSchema).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilePart {
    /// The client-supplied file name.
    pub filename: String,
    /// The declared media type of the file content.
    pub content_type: String,
    /// The raw file bytes.
    pub data: Vec<u8>,
}

impl FilePart {
    /// Creates a file part from a name, content type, and raw bytes.
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Returns the size of the file content in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A loosely-typed input value.
///
/// `Value` is what every source adapter produces and what every coercer
/// consumes. Maps preserve insertion order so that field iteration and
/// issue discovery stay deterministic.
///
/// # Example
///
/// ```rust
/// use intake::Value;
///
/// let value = Value::map([
///     ("name", Value::from("Alice")),
///     ("age", Value::from(30)),
/// ]);
/// assert!(value.as_map().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The explicit absence of a value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered sequence of values.
    Seq(Vec<Value>),
    /// An ordered map of string keys to values.
    Map(IndexMap<String, Value>),
    /// An uploaded file.
    File(FilePart),
}

impl Value {
    /// Builds a map value from key/value pairs, preserving order.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Builds a sequence value from an iterator of values.
    pub fn seq<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Value::Seq(items.into_iter().collect())
    }

    /// Returns the name of this value's variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "map",
            Value::File(_) => "file",
        }
    }

    /// Returns true if this value counts as blank for parse purposes.
    ///
    /// Blank means `Null` or the empty string. Form and query sources
    /// deliver empty strings for fields a user left empty, so the empty
    /// string participates in required/default resolution the same way an
    /// absent key does.
    pub fn is_parse_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns the string content if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the map content if this is a map value.
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the sequence content if this is a sequence value.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Seq(v)
    }
}

impl From<FilePart> for Value {
    fn from(v: FilePart) -> Self {
        Value::File(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    Value::Null
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}
