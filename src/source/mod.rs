//! Input sources and their adapters.
//!
//! A [`Source`] is what one Parse call consumes: a bare value, a decoded
//! map, urlencoded values, or a multipart form. Adapters in [`json`],
//! [`query`], and [`multipart`] build sources from raw request material;
//! anything implementing [`IntoSource`] can be handed to
//! [`SchemaLike::parse`](crate::SchemaLike::parse) directly.

pub mod json;
pub mod multipart;
pub mod query;

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::error::Issue;
use crate::provider::{ParseData, Provider, SourceTag};
use crate::value::Value;

pub use multipart::MultipartForm;
pub use query::UrlValues;

/// The decoded input of one Parse call.
///
/// A source owns its data; the engine borrows a [`ParseData`] view from it
/// for the duration of the call.
#[derive(Debug)]
pub enum Source {
    /// A bare value (scalar, sequence, or map), looked up positionally.
    Value(Value),
    /// A decoded key/value map, optionally tagged with the convention that
    /// produced it.
    Map(IndexMap<String, Value>, Option<SourceTag>),
    /// Urlencoded values from a query string or form body.
    Url(UrlValues, SourceTag),
    /// A multipart form with text fields and file parts.
    Multipart(MultipartForm),
}

impl Source {
    pub(crate) fn parse_data(&self) -> ParseData<'_> {
        match self {
            Source::Value(value) => ParseData::Value(Cow::Borrowed(value)),
            Source::Map(map, tag) => ParseData::Provider(Provider::Map { map, tag: *tag }),
            Source::Url(values, tag) => ParseData::Provider(Provider::Url {
                values,
                tag: *tag,
            }),
            Source::Multipart(form) => ParseData::Provider(Provider::Multipart { form }),
        }
    }
}

/// Conversion into a [`Source`], fallible for adapters that decode raw
/// request material.
///
/// A failed conversion surfaces as a single issue at `$root`; no field
/// processing happens and the destination is untouched.
pub trait IntoSource {
    /// Performs the conversion.
    fn into_source(self) -> Result<Source, Issue>;
}

impl IntoSource for Source {
    fn into_source(self) -> Result<Source, Issue> {
        Ok(self)
    }
}

impl IntoSource for Result<Source, Issue> {
    fn into_source(self) -> Result<Source, Issue> {
        self
    }
}

impl IntoSource for Value {
    fn into_source(self) -> Result<Source, Issue> {
        Ok(Source::Value(self))
    }
}

macro_rules! scalar_into_source {
    ($($ty:ty),*) => {
        $(impl IntoSource for $ty {
            fn into_source(self) -> Result<Source, Issue> {
                Ok(Source::Value(Value::from(self)))
            }
        })*
    };
}

scalar_into_source!(&str, String, i64, f64, bool);

impl IntoSource for UrlValues {
    fn into_source(self) -> Result<Source, Issue> {
        Ok(Source::Url(self, SourceTag::Query))
    }
}

/// A JSON object becomes a map source tagged [`SourceTag::Json`] so field
/// aliases resolve; any other JSON node is a bare value.
impl IntoSource for serde_json::Value {
    fn into_source(self) -> Result<Source, Issue> {
        match Value::from(self) {
            Value::Map(map) => Ok(Source::Map(map, Some(SourceTag::Json))),
            other => Ok(Source::Value(other)),
        }
    }
}

impl IntoSource for IndexMap<String, Value> {
    fn into_source(self) -> Result<Source, Issue> {
        Ok(Source::Map(self, None))
    }
}

impl IntoSource for MultipartForm {
    fn into_source(self) -> Result<Source, Issue> {
        Ok(Source::Multipart(self))
    }
}

/// A decoder for one request body content type.
pub type BodyDecoder = fn(&[u8]) -> Result<Source, Issue>;

/// The content-type to decoder table for dispatching raw request bodies.
///
/// Immutable after construction; build one at startup and share it. The
/// defaults cover `application/json` and
/// `application/x-www-form-urlencoded`.
///
/// # Example
///
/// ```rust
/// use intake::{Schema, SchemaLike, SourceConfig};
///
/// let config = SourceConfig::new();
/// let schema = Schema::object()
///     .field("name", Schema::string().required(), |d: &mut (String,)| &mut d.0);
///
/// let mut dest = (String::new(),);
/// let body = config.decode("application/json; charset=utf-8", br#"{"name": "Jane"}"#);
/// let issues = schema.parse(body, &mut dest);
/// assert!(issues.is_empty());
/// assert_eq!(dest.0, "Jane");
/// ```
#[derive(Debug, Clone)]
pub struct SourceConfig {
    decoders: Vec<(String, BodyDecoder)>,
}

fn decode_urlencoded(body: &[u8]) -> Result<Source, Issue> {
    let text = std::str::from_utf8(body).map_err(|_| {
        Issue::new(
            crate::error::IssueCode::SourceDecode,
            "form body is not valid UTF-8",
        )
    })?;
    query::from_form(text)
}

impl SourceConfig {
    /// Creates a config with the default decoders.
    pub fn new() -> Self {
        Self {
            decoders: vec![
                ("application/json".to_string(), json::from_slice as BodyDecoder),
                (
                    "application/x-www-form-urlencoded".to_string(),
                    decode_urlencoded as BodyDecoder,
                ),
            ],
        }
    }

    /// Registers a decoder for a content type, replacing any existing one,
    /// builder style.
    pub fn with_decoder(mut self, content_type: impl Into<String>, decoder: BodyDecoder) -> Self {
        let content_type = content_type.into();
        self.decoders.retain(|(ct, _)| *ct != content_type);
        self.decoders.push((content_type, decoder));
        self
    }

    /// Decodes a request body by its `Content-Type` header value.
    ///
    /// Media-type parameters (`; charset=...`) are ignored. An unknown
    /// content type is a decode failure reported at `$root`.
    pub fn decode(&self, content_type: &str, body: &[u8]) -> Result<Source, Issue> {
        let media_type = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        let decoder = self
            .decoders
            .iter()
            .find(|(ct, _)| *ct == media_type)
            .map(|(_, decoder)| decoder)
            .ok_or_else(|| {
                Issue::new(
                    crate::error::IssueCode::SourceDecode,
                    format!("no decoder registered for '{}'", media_type),
                )
            })?;
        decoder(body)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::new()
    }
}
