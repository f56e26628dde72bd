//! The uniform read interface over one nesting level of an input source.
//!
//! This module provides [`Provider`], the source-agnostic key/field lookup
//! the processing engine drives, [`SourceTag`] for per-source field
//! aliasing, [`FieldKey`] descriptors for object fields, and [`ParseData`],
//! the per-field input handed to each schema.

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::source::{MultipartForm, UrlValues};
use crate::value::Value;

/// The naming convention a source uses to resolve field keys.
///
/// An object field may declare an alias per tag (e.g. its JSON name differs
/// from its form name); lookup falls back to the declared key when no alias
/// matches the active source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTag {
    /// A decoded JSON body.
    Json,
    /// An urlencoded form body.
    Form,
    /// URL query parameters.
    Query,
    /// A multipart form body.
    Multipart,
}

/// The lookup descriptor for one declared object field.
///
/// A `FieldKey` is built once at schema construction time and resolved
/// against the active source tag at call time, so key resolution is a pure
/// data lookup with no runtime type introspection.
///
/// # Example
///
/// ```rust
/// use intake::{FieldKey, SourceTag};
///
/// let key = FieldKey::new("tags").alias(SourceTag::Query, "tags[]");
/// assert_eq!(key.resolve(Some(SourceTag::Query)), "tags[]");
/// assert_eq!(key.resolve(Some(SourceTag::Json)), "tags");
/// assert_eq!(key.resolve(None), "tags");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldKey {
    name: String,
    aliases: Vec<(SourceTag, String)>,
}

impl FieldKey {
    /// Creates a descriptor with the given declared key and no aliases.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
        }
    }

    /// Declares the lookup key to use when the source carries `tag`.
    pub fn alias(mut self, tag: SourceTag, key: impl Into<String>) -> Self {
        self.aliases.push((tag, key.into()));
        self
    }

    /// The declared key (the fallback when no alias matches).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves the effective lookup key for a source tag.
    pub fn resolve(&self, tag: Option<SourceTag>) -> &str {
        tag.and_then(|t| {
            self.aliases
                .iter()
                .find(|(alias_tag, _)| *alias_tag == t)
                .map(|(_, key)| key.as_str())
        })
        .unwrap_or(&self.name)
    }
}

impl From<&str> for FieldKey {
    fn from(name: &str) -> Self {
        FieldKey::new(name)
    }
}

impl From<String> for FieldKey {
    fn from(name: String) -> Self {
        FieldKey::new(name)
    }
}

/// A read-only view over one nesting level of an input source.
///
/// Each variant differs only in how it performs the key lookup; the
/// processing engine is otherwise source-agnostic. Providers are cheap
/// `Copy` borrows and are never mutated.
#[derive(Debug, Clone, Copy)]
pub enum Provider<'a> {
    /// A map of already-decoded values, optionally tagged with the source
    /// convention that produced it (e.g. [`SourceTag::Json`]).
    Map {
        /// The wrapped key/value entries.
        map: &'a IndexMap<String, Value>,
        /// The naming convention of the producing source, if any.
        tag: Option<SourceTag>,
    },
    /// URL-encoded values (query string or form body) with multi-value
    /// semantics.
    Url {
        /// The wrapped multimap.
        values: &'a UrlValues,
        /// [`SourceTag::Query`] or [`SourceTag::Form`].
        tag: SourceTag,
    },
    /// Multipart form fields and files, one value per name.
    Multipart {
        /// The wrapped form.
        form: &'a MultipartForm,
    },
}

impl<'a> Provider<'a> {
    /// Wraps a plain map with no source tag.
    pub fn plain_map(map: &'a IndexMap<String, Value>) -> Self {
        Provider::Map { map, tag: None }
    }

    /// The naming convention of this provider, if it carries one.
    pub fn tag(&self) -> Option<SourceTag> {
        match self {
            Provider::Map { tag, .. } => *tag,
            Provider::Url { tag, .. } => Some(*tag),
            Provider::Multipart { .. } => Some(SourceTag::Multipart),
        }
    }

    /// Fetches the value stored under `key`, or `None` when absent.
    ///
    /// The URL-values variant preserves the multi-value policy exactly: a
    /// key ending in `[]` always yields a sequence even for a single
    /// value, a key with more than one value yields a sequence, and a key
    /// with exactly one value yields that bare scalar. Downstream coercers
    /// branch on scalar-vs-sequence shape, so the asymmetry is load-bearing.
    pub fn get(&self, key: &str) -> Option<Cow<'a, Value>> {
        match self {
            Provider::Map { map, .. } => map.get(key).map(Cow::Borrowed),
            Provider::Url { values, .. } => {
                let all = values.get_all(key)?;
                if key.len() > 2 && key.ends_with("[]") {
                    Some(Cow::Owned(Value::Seq(
                        all.iter().map(|v| Value::String(v.clone())).collect(),
                    )))
                } else if all.len() > 1 {
                    Some(Cow::Owned(Value::Seq(
                        all.iter().map(|v| Value::String(v.clone())).collect(),
                    )))
                } else {
                    all.first().map(|v| Cow::Owned(Value::String(v.clone())))
                }
            }
            Provider::Multipart { form } => form.entries().get(key).map(Cow::Borrowed),
        }
    }

    /// Fetches a value through a field descriptor, returning the value and
    /// the key that was effectively used (also the path segment name).
    pub fn get_by_field<'k>(&self, field: &'k FieldKey) -> (Option<Cow<'a, Value>>, &'k str) {
        let key = field.resolve(self.tag());
        (self.get(key), key)
    }

    /// Returns a provider scoped to the value under `key`, for descending
    /// into nested structures.
    ///
    /// Map-backed providers wrap the child map (tag preserved) and return
    /// `None` when the child is absent or not a map. URL and multipart
    /// sources are flat: they return themselves, so nested object schemas
    /// resolve their fields against the same key space.
    pub fn nested(&self, key: &str) -> Option<Provider<'a>> {
        match self {
            Provider::Map { map, tag } => match map.get(key) {
                Some(Value::Map(child)) => Some(Provider::Map {
                    map: child,
                    tag: *tag,
                }),
                _ => None,
            },
            Provider::Url { .. } | Provider::Multipart { .. } => Some(*self),
        }
    }

    /// Returns the raw wrapped value, for schemas that need direct access.
    pub fn underlying(&self) -> Value {
        match self {
            Provider::Map { map, .. } => Value::Map((*map).clone()),
            Provider::Url { values, .. } => values.to_value(),
            Provider::Multipart { form } => Value::Map(form.entries().clone()),
        }
    }
}

/// The input handed to one field's processing.
///
/// `Absent` means the parent source had no entry for the field's key,
/// `Value` is a scalar or composite value extracted from the parent, and
/// `Provider` is a keyed view for object schemas to iterate.
#[derive(Debug)]
pub enum ParseData<'a> {
    /// No entry existed for the resolved key.
    Absent,
    /// An extracted value.
    Value(Cow<'a, Value>),
    /// A keyed view for object descent.
    Provider(Provider<'a>),
}

impl ParseData<'_> {
    /// Returns true if this input counts as blank for parse purposes
    /// (absent, `Null`, or the empty string).
    pub fn is_blank(&self) -> bool {
        match self {
            ParseData::Absent => true,
            ParseData::Value(v) => v.is_parse_blank(),
            ParseData::Provider(_) => false,
        }
    }
}
