//! Runtime validation and coercion for loosely-typed input.
//!
//! `intake` turns raw request material (JSON bodies, query strings, form
//! posts, multipart uploads) into typed Rust values, reporting every
//! problem it finds under the path where it occurred (`users[0].name`).
//! Schemas are declared once, are immutable afterwards, and are safe to
//! share across threads.
//!
//! # Parsing
//!
//! A schema coerces lenient input (numeric strings, single values where a
//! list is expected) into a destination you provide, then runs its
//! validation pipeline:
//!
//! ```rust
//! use intake::{Schema, SchemaLike};
//! use serde_json::json;
//!
//! #[derive(Default, Clone)]
//! struct Signup {
//!     email: String,
//!     age: i64,
//! }
//!
//! let schema = Schema::object()
//!     .field("email", Schema::string().required().email(), |s: &mut Signup| {
//!         &mut s.email
//!     })
//!     .field("age", Schema::integer().min(13), |s: &mut Signup| &mut s.age);
//!
//! let mut signup = Signup::default();
//! let issues = schema.parse(json!({"email": "a@b.co", "age": "42"}), &mut signup);
//! assert!(issues.is_empty());
//! assert_eq!(signup.age, 42);
//! ```
//!
//! # Issues
//!
//! Parsing never panics and never stops at the first problem: every field
//! is processed and every issue lands in the returned [`IssueMap`], keyed
//! by path. Problems with the source itself (a malformed JSON body) are
//! reported under the `$root` sentinel:
//!
//! ```rust
//! use intake::{source::json, Schema, SchemaLike};
//!
//! let schema = Schema::object()
//!     .field("name", Schema::string().required(), |d: &mut (String,)| &mut d.0);
//!
//! let mut dest = (String::new(),);
//! let issues = schema.parse(json::from_str("{not json"), &mut dest);
//! assert!(issues.get("$root").is_some());
//! ```
//!
//! # Validation
//!
//! [`SchemaLike::validate`] runs the same pipeline against a value that is
//! already typed, skipping coercion. It treats a zero-valued destination
//! as blank, so `required` and defaults behave the same in both modes.

pub mod coerce;
mod context;
mod engine;
mod error;
mod path;
mod provider;
mod schema;
pub mod source;
mod value;

pub use context::{ExecCtx, ExecOptions, IssueFormatter, SchemaCtx};
pub use error::{CoerceError, Issue, IssueCode, IssueMap};
pub use path::{PathBuilder, PathSegment, ROOT_PATH};
pub use provider::{FieldKey, ParseData, Provider, SourceTag};
pub use schema::{
    ArraySchema, BooleanSchema, FileSchema, FloatSchema, IntegerSchema, ObjectSchema,
    OptionSchema, ScalarSchema, Schema, SchemaKind, SchemaLike, StringSchema,
};
pub use source::{BodyDecoder, IntoSource, MultipartForm, Source, SourceConfig, UrlValues};
pub use value::{FilePart, Value};
