//! Per-call execution state.
//!
//! This module provides [`ExecCtx`], the state owned by one Parse/Validate
//! call (issue accumulator, path builder, issue formatter), [`ExecOptions`]
//! for call-scoped configuration, [`SchemaCtx`], the per-field view
//! threaded through recursion, and a bounded pool that recycles execution
//! contexts between calls.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Issue, IssueList, IssueMap};
use crate::path::PathBuilder;
use crate::provider::ParseData;
use crate::schema::SchemaKind;

/// Rewrites an issue's message before it is recorded.
///
/// The formatter receives the issue and the rendered path it will be
/// recorded under, and returns the message to store.
pub type IssueFormatter = Arc<dyn Fn(&Issue, &str) -> String + Send + Sync>;

/// Call-scoped options resolved into the execution context at call start.
///
/// # Example
///
/// ```rust
/// use intake::{ExecOptions, Schema, SchemaLike, Value};
///
/// let options = ExecOptions::new()
///     .formatter(|issue, path| format!("{}: {}", path, issue.message));
///
/// let schema = Schema::string().required();
/// let mut dest = String::new();
/// let issues = schema.parse_with(Value::Null, &mut dest, options);
/// assert_eq!(issues.get("$root").unwrap()[0].message, "$root: is required");
/// ```
#[derive(Clone, Default)]
pub struct ExecOptions {
    formatter: Option<IssueFormatter>,
}

impl ExecOptions {
    /// Creates the default options (no formatter override).
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the issue formatter for this call.
    pub fn formatter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Issue, &str) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(f));
        self
    }
}

/// The state of one Parse/Validate call.
///
/// One context exists per call, shared by every recursion frame of that
/// call: all issues land in its list tagged with the path builder's
/// current rendering. Contexts are recycled through a pool; every
/// per-call-mutable field is reset before reuse.
#[derive(Default)]
pub struct ExecCtx {
    issues: IssueList,
    path: PathBuilder,
    formatter: Option<IssueFormatter>,
}

impl ExecCtx {
    /// Renders the path of the field currently being processed.
    ///
    /// Available to test and transform closures that want path-aware
    /// behavior.
    pub fn current_path(&self) -> String {
        self.path.render()
    }

    /// Returns the number of issues recorded so far in this call.
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Records an issue at the current path, applying the formatter.
    pub fn record(&mut self, issue: Issue) {
        let path = self.path.render();
        let issue = match &self.formatter {
            Some(format) => {
                let message = format(&issue, &path);
                Issue { message, ..issue }
            }
            None => issue,
        };
        self.issues.push(path, issue);
    }

    /// The mutable path builder, for composite schemas descending into
    /// children. Pushes and pops must stay balanced.
    pub fn path_mut(&mut self) -> &mut PathBuilder {
        &mut self.path
    }

    pub(crate) fn take_issues(&mut self) -> IssueMap {
        self.issues.drain_into_map()
    }

    fn reset(&mut self) {
        self.issues.clear();
        self.path.clear();
        self.formatter = None;
    }
}

/// The per-field view threaded through recursive descent.
///
/// A schema context is a plain stack frame: the input for this field, the
/// destination to assign, the shared execution context, and the schema's
/// declared kind. Child contexts reborrow the parent's execution context,
/// so no per-field state can outlive its frame.
pub struct SchemaCtx<'a, 'v, T> {
    /// The input for this field.
    pub data: ParseData<'v>,
    /// The destination this field assigns into.
    pub dest: &'a mut T,
    /// The call-wide execution context.
    pub exec: &'a mut ExecCtx,
    /// The declared kind of the schema processing this field.
    pub kind: SchemaKind,
}

const POOL_LIMIT: usize = 32;

static POOL: Mutex<Vec<Box<ExecCtx>>> = Mutex::new(Vec::new());

/// Acquires an execution context for one call, recycled from the pool when
/// one is free.
///
/// The returned guard hands the context back on drop, fully reset, on
/// every exit path. Pooling is semantically transparent: a freshly
/// allocated context behaves identically to a recycled one.
pub(crate) fn acquire(options: ExecOptions) -> PooledCtx {
    let recycled = POOL.lock().pop();
    let mut ctx = recycled.unwrap_or_default();
    ctx.formatter = options.formatter;
    PooledCtx { ctx: Some(ctx) }
}

/// Scoped ownership of a pooled [`ExecCtx`].
pub(crate) struct PooledCtx {
    ctx: Option<Box<ExecCtx>>,
}

impl Deref for PooledCtx {
    type Target = ExecCtx;

    fn deref(&self) -> &ExecCtx {
        self.ctx.as_ref().expect("context present until drop")
    }
}

impl DerefMut for PooledCtx {
    fn deref_mut(&mut self) -> &mut ExecCtx {
        self.ctx.as_mut().expect("context present until drop")
    }
}

impl Drop for PooledCtx {
    fn drop(&mut self) {
        if let Some(mut ctx) = self.ctx.take() {
            ctx.reset();
            let mut free = POOL.lock();
            if free.len() < POOL_LIMIT {
                free.push(ctx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueCode;

    #[test]
    fn test_record_tags_current_path() {
        let mut ctx = ExecCtx::default();
        ctx.path_mut().push_field("user");
        ctx.path_mut().push_field("name");
        ctx.record(Issue::new(IssueCode::Required, "is required"));
        ctx.path_mut().pop();
        ctx.path_mut().pop();

        let map = ctx.take_issues();
        assert_eq!(map.get("user.name").unwrap()[0].message, "is required");
    }

    #[test]
    fn test_record_at_root() {
        let mut ctx = ExecCtx::default();
        ctx.record(Issue::new(IssueCode::SourceDecode, "bad body"));

        let map = ctx.take_issues();
        assert!(map.get("$root").is_some());
    }

    #[test]
    fn test_formatter_rewrites_message() {
        let mut ctx = ExecCtx::default();
        ctx.formatter = Some(Arc::new(|issue, path| {
            format!("{} at {}", issue.code, path)
        }));
        ctx.path_mut().push_field("age");
        ctx.record(Issue::new(IssueCode::Coerce, "cannot coerce"));

        let map = ctx.take_issues();
        assert_eq!(map.get("age").unwrap()[0].message, "coerce at age");
    }

    #[test]
    fn test_pooled_context_resets_on_release() {
        {
            let mut pooled = acquire(ExecOptions::new());
            pooled.path_mut().push_field("stale");
            pooled.record(Issue::new(IssueCode::Required, "stale issue"));
        }

        let pooled = acquire(ExecOptions::new());
        assert_eq!(pooled.issue_count(), 0);
        assert_eq!(pooled.current_path(), "$root");
    }
}
