//! The generic scalar schema every primitive kind is built on.

use crate::coerce::Coercer;
use crate::context::{ExecCtx, SchemaCtx};
use crate::engine::{parse_primitive, validate_primitive, Processor, Rules, Test};
use crate::error::CoerceError;
use crate::value::Value;

use super::traits::{SchemaKind, SchemaLike};

/// A schema for one primitive destination type.
///
/// `ScalarSchema` bundles the declared kind, the coercer, and the shared
/// per-field settings (pipeline, default, required, catch). The per-type
/// entry points ([`StringSchema`](crate::StringSchema),
/// [`IntegerSchema`](crate::IntegerSchema), ...) are aliases of this type
/// with kind-specific constraint builders.
///
/// # Example
///
/// ```rust
/// use intake::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::integer().min(0).max(120);
/// let mut age = 0i64;
///
/// // numeric strings coerce
/// let issues = schema.parse(json!("42"), &mut age);
/// assert!(issues.is_empty());
/// assert_eq!(age, 42);
/// ```
pub struct ScalarSchema<T> {
    pub(crate) kind: SchemaKind,
    pub(crate) rules: Rules<T>,
    pub(crate) coercer: Coercer<T>,
}

impl<T: Send + Sync + 'static> ScalarSchema<T> {
    pub(crate) fn with_kind(kind: SchemaKind, coercer: Coercer<T>) -> Self {
        Self {
            kind,
            rules: Rules::default(),
            coercer,
        }
    }

    /// Marks the field as required: blank input records a `required` issue.
    pub fn required(mut self) -> Self {
        self.rules.required = Some(Test::required());
        self
    }

    /// Marks the field as optional (the default): blank input passes and
    /// leaves the destination untouched.
    pub fn optional(mut self) -> Self {
        self.rules.required = None;
        self
    }

    /// Substitutes `value` for blank input. Defaults are trusted: they
    /// bypass coercion and the pipeline entirely.
    pub fn default(mut self, value: T) -> Self {
        self.rules.default = Some(value);
        self
    }

    /// Substitutes `value` when coercion fails, suppressing the coercion
    /// issue. The pipeline still runs against the catch value.
    pub fn catch(mut self, value: T) -> Self {
        self.rules.catch = Some(value);
        self
    }

    /// Appends a named test to the pipeline.
    ///
    /// A failing test records an issue and the pipeline continues, so one
    /// field may accumulate several issues in one call.
    pub fn test<F>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T, &ExecCtx) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        let message = format!("failed '{}' check", name);
        self.rules
            .pipeline
            .push(Processor::Test(Test::new(name, message, check)));
        self
    }

    /// Appends an in-place transform to the pipeline.
    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&mut T, &ExecCtx) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
            + Send
            + Sync
            + 'static,
    {
        self.rules
            .pipeline
            .push(Processor::Transform(Box::new(transform)));
        self
    }

    /// Replaces the default coercer for this schema.
    pub fn with_coercer<F>(mut self, coercer: F) -> Self
    where
        F: Fn(&Value) -> Result<T, CoerceError> + Send + Sync + 'static,
    {
        self.coercer = Box::new(coercer);
        self
    }

    /// Sets a custom message for the most recently declared constraint,
    /// falling back to the required test, then the coercion message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.rules.set_last_message(message.into());
        self
    }

    pub(crate) fn push_test<F>(mut self, name: &str, message: String, check: F) -> Self
    where
        F: Fn(&T, &ExecCtx) -> bool + Send + Sync + 'static,
    {
        self.rules
            .pipeline
            .push(Processor::Test(Test::new(name, message, check)));
        self
    }
}

impl<T> SchemaLike for ScalarSchema<T>
where
    T: Clone + Default + PartialEq + Send + Sync + 'static,
{
    type Output = T;

    fn kind(&self) -> SchemaKind {
        self.kind
    }

    fn process(&self, ctx: &mut SchemaCtx<'_, '_, T>) {
        parse_primitive(ctx, &self.rules, self.coercer.as_ref());
    }

    fn verify(&self, dest: &mut T, exec: &mut ExecCtx) {
        validate_primitive(dest, &self.rules, exec);
    }
}
