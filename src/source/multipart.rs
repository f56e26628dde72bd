//! Multipart form adapter.
//!
//! Represents an already-parsed `multipart/form-data` body: text fields and
//! file parts keyed by field name. Transport-level parsing (boundaries,
//! headers) belongs to the HTTP layer; this adapter consumes its output.

use indexmap::IndexMap;

use crate::value::{FilePart, Value};

/// An already-parsed multipart form.
///
/// One value per field name; when a name repeats, the first occurrence
/// wins and later ones are dropped.
///
/// # Example
///
/// ```rust
/// use intake::{FilePart, MultipartForm, Schema, SchemaLike};
///
/// #[derive(Default, Clone)]
/// struct Upload {
///     title: String,
///     attachment: FilePart,
/// }
///
/// let form = MultipartForm::new()
///     .text("title", "notes")
///     .file("attachment", FilePart::new("a.txt", "text/plain", b"hi".to_vec()));
///
/// let schema = Schema::object()
///     .field("title", Schema::string().required(), |u: &mut Upload| &mut u.title)
///     .field("attachment", Schema::file().required(), |u: &mut Upload| {
///         &mut u.attachment
///     });
///
/// let mut upload = Upload::default();
/// let issues = schema.parse(form, &mut upload);
/// assert!(issues.is_empty());
/// assert_eq!(upload.attachment.filename, "a.txt");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultipartForm {
    entries: IndexMap<String, Value>,
}

impl MultipartForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text field, builder style. A repeated name is ignored.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries
            .entry(name.into())
            .or_insert_with(|| Value::String(value.into()));
        self
    }

    /// Adds a file field, builder style. A repeated name is ignored.
    pub fn file(mut self, name: impl Into<String>, part: FilePart) -> Self {
        self.entries
            .entry(name.into())
            .or_insert(Value::File(part));
        self
    }

    /// Returns true if the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &IndexMap<String, Value> {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_wins() {
        let form = MultipartForm::new().text("name", "first").text("name", "second");
        assert_eq!(form.entries().get("name"), Some(&Value::from("first")));
    }

    #[test]
    fn test_text_and_file_fields() {
        let part = FilePart::new("a.bin", "application/octet-stream", vec![1, 2, 3]);
        let form = MultipartForm::new()
            .text("title", "report")
            .file("data", part.clone());

        assert_eq!(form.entries().get("title"), Some(&Value::from("report")));
        assert_eq!(form.entries().get("data"), Some(&Value::File(part)));
    }

    #[test]
    fn test_field_order_preserved() {
        let form = MultipartForm::new().text("z", "1").text("a", "2");
        let keys: Vec<_> = form.entries().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }
}
