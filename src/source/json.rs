//! JSON body adapter.
//!
//! Decodes a JSON request body into a [`Source`]. The body must be a JSON
//! object; malformed JSON, a bare `null`, or any non-object root is a
//! decode failure reported at `$root`.

use std::io::Read;

use crate::error::{Issue, IssueCode};
use crate::provider::SourceTag;
use crate::value::Value;

use super::Source;

/// Decodes a JSON object from a string.
///
/// # Example
///
/// ```rust
/// use intake::{source::json, Schema, SchemaLike};
///
/// let schema = Schema::object()
///     .field("name", Schema::string().required(), |d: &mut (String,)| &mut d.0);
///
/// let mut dest = (String::new(),);
/// let issues = schema.parse(json::from_str(r#"{"name": "Jane"}"#), &mut dest);
/// assert!(issues.is_empty());
///
/// let issues = schema.parse(json::from_str("{not json"), &mut dest);
/// assert!(issues.get("$root").is_some());
/// ```
pub fn from_str(body: &str) -> Result<Source, Issue> {
    let decoded: serde_json::Value = serde_json::from_str(body).map_err(decode_issue)?;
    into_object_source(decoded)
}

/// Decodes a JSON object from raw bytes.
pub fn from_slice(body: &[u8]) -> Result<Source, Issue> {
    let decoded: serde_json::Value = serde_json::from_slice(body).map_err(decode_issue)?;
    into_object_source(decoded)
}

/// Decodes a JSON object from a reader (e.g. a request body stream).
pub fn from_reader<R: Read>(body: R) -> Result<Source, Issue> {
    let decoded: serde_json::Value = serde_json::from_reader(body).map_err(decode_issue)?;
    into_object_source(decoded)
}

fn decode_issue(err: serde_json::Error) -> Issue {
    Issue::new(
        IssueCode::SourceDecode,
        format!("could not decode JSON body: {}", err),
    )
    .with_cause(std::sync::Arc::new(err))
}

fn into_object_source(decoded: serde_json::Value) -> Result<Source, Issue> {
    match Value::from(decoded) {
        Value::Map(map) => Ok(Source::Map(map, Some(SourceTag::Json))),
        other => Err(Issue::new(
            IssueCode::SourceDecode,
            format!("expected a JSON object, got {}", other.type_name()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_body_decodes() {
        let source = from_str(r#"{"name": "Jane", "age": 30}"#).unwrap();
        match source {
            Source::Map(map, tag) => {
                assert_eq!(map.get("name"), Some(&Value::from("Jane")));
                assert_eq!(map.get("age"), Some(&Value::from(30)));
                assert_eq!(tag, Some(SourceTag::Json));
            }
            other => panic!("expected map source, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_body_is_decode_issue() {
        let issue = from_str("{oops").unwrap_err();
        assert_eq!(issue.code, IssueCode::SourceDecode);
        assert!(std::error::Error::source(&issue).is_some());
    }

    #[test]
    fn test_null_body_is_decode_issue() {
        let issue = from_str("null").unwrap_err();
        assert_eq!(issue.code, IssueCode::SourceDecode);
        assert_eq!(issue.message, "expected a JSON object, got null");
    }

    #[test]
    fn test_array_root_is_decode_issue() {
        let issue = from_str("[1, 2]").unwrap_err();
        assert_eq!(issue.code, IssueCode::SourceDecode);
        assert_eq!(issue.message, "expected a JSON object, got sequence");
    }

    #[test]
    fn test_from_slice_and_reader_match() {
        let body = br#"{"k": "v"}"#;
        assert!(from_slice(body).is_ok());
        assert!(from_reader(&body[..]).is_ok());
    }
}
