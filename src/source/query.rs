//! Query-string and urlencoded-form adapter.
//!
//! Parses `application/x-www-form-urlencoded` material (a URL query string
//! or a form body) into a [`Source`] with multi-value semantics: repeated
//! keys accumulate, `+` decodes to space, and `%XX` escapes decode. An
//! invalid escape is a decode failure reported at `$root`.

use indexmap::IndexMap;

use crate::error::{Issue, IssueCode};
use crate::provider::SourceTag;
use crate::value::Value;

use super::Source;

/// An ordered multimap of urlencoded keys to their values.
///
/// Keys keep first-seen order and each key keeps its values in arrival
/// order, so issue discovery stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlValues {
    entries: IndexMap<String, Vec<String>>,
}

impl UrlValues {
    /// Creates an empty multimap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value under a key, builder style.
    ///
    /// # Example
    ///
    /// ```rust
    /// use intake::UrlValues;
    ///
    /// let values = UrlValues::new().append("tag", "a").append("tag", "b");
    /// assert_eq!(values.get_all("tag").unwrap().len(), 2);
    /// ```
    pub fn append(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key.into(), value.into());
        self
    }

    /// Appends a value under a key.
    pub fn push(&mut self, key: String, value: String) {
        self.entries.entry(key).or_default().push(value);
    }

    /// Returns every value stored under a key, or `None` when absent.
    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Returns true if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts the multimap into a map value: single-valued keys become
    /// strings, multi-valued and `[]`-suffixed keys become sequences.
    pub fn to_value(&self) -> Value {
        let mut map = IndexMap::new();
        for (key, values) in &self.entries {
            let value = if (key.len() > 2 && key.ends_with("[]")) || values.len() > 1 {
                Value::Seq(values.iter().map(|v| Value::String(v.clone())).collect())
            } else {
                values
                    .first()
                    .map(|v| Value::String(v.clone()))
                    .unwrap_or(Value::Null)
            };
            map.insert(key.clone(), value);
        }
        Value::Map(map)
    }
}

/// Parses a URL query string (a leading `?` is tolerated) into a source
/// tagged [`SourceTag::Query`].
///
/// # Example
///
/// ```rust
/// use intake::{source::query, Schema, SchemaLike};
///
/// let schema = Schema::object()
///     .field("q", Schema::string().required(), |d: &mut (String,)| &mut d.0);
///
/// let mut dest = (String::new(),);
/// let issues = schema.parse(query::from_query("?q=hello+world"), &mut dest);
/// assert!(issues.is_empty());
/// assert_eq!(dest.0, "hello world");
/// ```
pub fn from_query(raw: &str) -> Result<Source, Issue> {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    parse(raw, SourceTag::Query)
}

/// Parses an urlencoded form body into a source tagged [`SourceTag::Form`].
pub fn from_form(raw: &str) -> Result<Source, Issue> {
    parse(raw, SourceTag::Form)
}

fn parse(raw: &str, tag: SourceTag) -> Result<Source, Issue> {
    let mut values = UrlValues::new();
    for pair in raw.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        values.push(decode(key)?, decode(value)?);
    }
    Ok(Source::Url(values, tag))
}

/// Percent-decodes one key or value, with `+` as space.
fn decode(raw: &str) -> Result<String, Issue> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let hi = bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16));
                let lo = bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16));
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi * 16 + lo) as u8);
                        i += 3;
                    }
                    _ => {
                        return Err(Issue::new(
                            IssueCode::SourceDecode,
                            format!("invalid percent-encoding in '{}'", raw),
                        ))
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).map_err(|_| {
        Issue::new(
            IssueCode::SourceDecode,
            format!("invalid UTF-8 after decoding '{}'", raw),
        )
    })
}
