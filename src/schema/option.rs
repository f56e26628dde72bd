//! Optional wrapper schemas.
//!
//! An option schema wraps any inner schema and targets `Option<T>`: blank
//! input yields `None` without issues, present input parses through the
//! inner schema and yields `Some` only when it parsed cleanly.

use crate::context::{ExecCtx, SchemaCtx};
use crate::provider::ParseData;

use super::traits::{SchemaKind, SchemaLike};

/// A schema for an `Option` destination, distinguishing "absent" from
/// "present but zero-valued".
///
/// # Example
///
/// ```rust
/// use intake::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::optional(Schema::integer().min(0));
/// let mut age: Option<i64> = None;
///
/// assert!(schema.parse(json!(null), &mut age).is_empty());
/// assert_eq!(age, None);
///
/// assert!(schema.parse(json!(0), &mut age).is_empty());
/// assert_eq!(age, Some(0));
/// ```
pub struct OptionSchema<S: SchemaLike> {
    inner: S,
}

impl<S: SchemaLike> OptionSchema<S> {
    /// Wraps an inner schema.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S> SchemaLike for OptionSchema<S>
where
    S: SchemaLike,
    S::Output: Default + Send + Sync + 'static,
{
    type Output = Option<S::Output>;

    /// Reports the inner schema's kind so keyed sources still hand nested
    /// providers to `Option<struct>` fields.
    fn kind(&self) -> SchemaKind {
        self.inner.kind()
    }

    fn process(&self, ctx: &mut SchemaCtx<'_, '_, Option<S::Output>>) {
        if ctx.data.is_blank() {
            *ctx.dest = None;
            return;
        }

        let before = ctx.exec.issue_count();
        let mut staged = S::Output::default();
        let data = std::mem::replace(&mut ctx.data, ParseData::Absent);
        {
            let mut child = SchemaCtx {
                data,
                dest: &mut staged,
                exec: &mut *ctx.exec,
                kind: self.inner.kind(),
            };
            self.inner.process(&mut child);
        }

        // only a clean inner parse produces Some
        if ctx.exec.issue_count() == before {
            *ctx.dest = Some(staged);
        }
    }

    fn verify(&self, dest: &mut Option<S::Output>, exec: &mut ExecCtx) {
        if let Some(inner) = dest.as_mut() {
            self.inner.verify(inner, exec);
        }
    }
}
