//! The capability contract shared by every schema kind.
//!
//! [`SchemaLike`] is the seam the processing engine dispatches over:
//! primitive and composite kinds differ only in their `process`/`verify`
//! bodies, while the public `parse`/`validate` operations are provided
//! once as default methods.

use crate::context::{self, ExecCtx, ExecOptions, SchemaCtx};
use crate::error::IssueMap;
use crate::path::ROOT_PATH;
use crate::source::IntoSource;

/// The declared type tag of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// A string scalar.
    String,
    /// An integer scalar.
    Integer,
    /// A float scalar.
    Float,
    /// A boolean scalar.
    Boolean,
    /// An uploaded file.
    File,
    /// A sequence of one element schema.
    Array,
    /// A keyed structure with declared field bindings.
    Object,
}

impl SchemaKind {
    /// The tag as a lowercase string, for diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Integer => "integer",
            SchemaKind::Float => "float",
            SchemaKind::Boolean => "boolean",
            SchemaKind::File => "file",
            SchemaKind::Array => "array",
            SchemaKind::Object => "object",
        }
    }
}

/// A schema that can parse loosely-typed input into a typed destination
/// and validate an already-typed destination.
///
/// Schemas are immutable after construction and safe to share across
/// concurrent calls; all per-call state lives in the execution context.
/// The `Send + Sync` bounds enforce that at compile time.
///
/// # Example
///
/// ```rust
/// use intake::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::string().required().min_len(2);
/// let mut name = String::new();
///
/// let issues = schema.parse(json!("Jane"), &mut name);
/// assert!(issues.is_empty());
/// assert_eq!(name, "Jane");
/// ```
pub trait SchemaLike: Send + Sync {
    /// The destination type this schema assigns into.
    type Output;

    /// The schema's declared type tag.
    fn kind(&self) -> SchemaKind;

    /// Runs the parse algorithm for one field. Issues land in the
    /// context's execution state under the current path.
    fn process(&self, ctx: &mut SchemaCtx<'_, '_, Self::Output>);

    /// Runs the validate algorithm (no coercion) against an already-typed
    /// destination.
    fn verify(&self, dest: &mut Self::Output, exec: &mut ExecCtx);

    /// Parses a raw input into `dest`, returning issues grouped by path.
    ///
    /// An empty map signals success. When the source itself cannot be
    /// decoded, the single issue is reported at `$root` and no field
    /// processing occurs.
    fn parse<I>(&self, source: I, dest: &mut Self::Output) -> IssueMap
    where
        I: IntoSource,
        Self: Sized,
    {
        self.parse_with(source, dest, ExecOptions::default())
    }

    /// Parses with call-scoped options (e.g. a custom issue formatter).
    fn parse_with<I>(&self, source: I, dest: &mut Self::Output, options: ExecOptions) -> IssueMap
    where
        I: IntoSource,
        Self: Sized,
    {
        let source = match source.into_source() {
            Ok(source) => source,
            Err(issue) => {
                let mut map = IssueMap::new();
                map.push(ROOT_PATH, issue);
                return map;
            }
        };

        let mut exec = context::acquire(options);
        let mut ctx = SchemaCtx {
            data: source.parse_data(),
            dest,
            exec: &mut exec,
            kind: self.kind(),
        };
        self.process(&mut ctx);
        exec.take_issues()
    }

    /// Validates an already-typed destination, returning issues grouped by
    /// path.
    fn validate(&self, dest: &mut Self::Output) -> IssueMap
    where
        Self: Sized,
    {
        self.validate_with(dest, ExecOptions::default())
    }

    /// Validates with call-scoped options.
    fn validate_with(&self, dest: &mut Self::Output, options: ExecOptions) -> IssueMap
    where
        Self: Sized,
    {
        let mut exec = context::acquire(options);
        self.verify(dest, &mut exec);
        exec.take_issues()
    }
}
