//! Uploaded-file schema constraints.

use crate::coerce;
use crate::schema::{ScalarSchema, SchemaKind};
use crate::value::FilePart;

/// A schema validating uploaded file parts.
///
/// Files only appear in multipart sources; any other input shape fails
/// coercion.
///
/// # Example
///
/// ```rust
/// use intake::{FilePart, Schema, SchemaLike, Value};
///
/// let schema = Schema::file().max_size(1024).content_type(vec!["text/plain"]);
/// let mut upload = FilePart::default();
///
/// let part = FilePart::new("notes.txt", "text/plain", b"hello".to_vec());
/// let issues = schema.parse(Value::File(part), &mut upload);
/// assert!(issues.is_empty());
/// assert_eq!(upload.filename, "notes.txt");
/// ```
pub type FileSchema = ScalarSchema<FilePart>;

impl ScalarSchema<FilePart> {
    /// Creates a file schema. Only [`Value::File`](crate::Value::File)
    /// inputs coerce.
    pub fn new() -> Self {
        Self::with_kind(SchemaKind::File, Box::new(coerce::file))
    }

    /// Requires the file content to be at most `max` bytes.
    pub fn max_size(self, max: usize) -> Self {
        self.push_test(
            "max_size",
            format!("must be at most {} bytes", max),
            move |f: &FilePart, _| f.size() <= max,
        )
    }

    /// Requires the file content to be at least `min` bytes.
    pub fn min_size(self, min: usize) -> Self {
        self.push_test(
            "min_size",
            format!("must be at least {} bytes", min),
            move |f: &FilePart, _| f.size() >= min,
        )
    }

    /// Requires the declared content type to be one of the allowed types.
    pub fn content_type(self, allowed: Vec<&str>) -> Self {
        let allowed: Vec<String> = allowed.into_iter().map(String::from).collect();
        let message = format!("content type must be one of {:?}", allowed);
        self.push_test("content_type", message, move |f: &FilePart, _| {
            allowed.iter().any(|t| t == &f.content_type)
        })
    }
}

impl Default for ScalarSchema<FilePart> {
    fn default() -> Self {
        Self::new()
    }
}
