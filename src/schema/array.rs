//! Sequence schemas.
//!
//! An array schema applies one element schema to every item of a sequence
//! input, recording element issues under indexed paths (`tags[0]`,
//! `users[2].name`). A bare scalar input coerces to a one-element sequence
//! so single-valued form fields still satisfy array schemas.

use std::borrow::Cow;

use crate::coerce;
use crate::context::{ExecCtx, SchemaCtx};
use crate::engine::{resolve_blank, run_pipeline, Processor, Rules, Test};
use crate::error::{CoerceError, Issue, IssueCode};
use crate::provider::ParseData;
use crate::value::Value;

use super::traits::{SchemaKind, SchemaLike};

/// A schema for a `Vec` destination with one element schema.
///
/// # Example
///
/// ```rust
/// use intake::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::array(Schema::string().min_len(2)).min_items(1);
/// let mut tags: Vec<String> = Vec::new();
///
/// let issues = schema.parse(json!(["rust", "x"]), &mut tags);
/// assert_eq!(issues.len(), 1);
/// assert!(issues.get("[1]").is_some());
/// assert_eq!(tags[0], "rust");
/// ```
pub struct ArraySchema<S: SchemaLike> {
    element: S,
    rules: Rules<Vec<S::Output>>,
    coercer: Box<dyn Fn(&Value) -> Result<Vec<Value>, CoerceError> + Send + Sync>,
}

impl<S> ArraySchema<S>
where
    S: SchemaLike,
    S::Output: Clone + Default + Send + Sync + 'static,
{
    /// Creates an array schema applying `element` to every item.
    pub fn new(element: S) -> Self {
        Self {
            element,
            rules: Rules::default(),
            coercer: Box::new(coerce::element_list),
        }
    }

    /// Marks the sequence as required: blank input records a `required`
    /// issue.
    pub fn required(mut self) -> Self {
        self.rules.required = Some(Test::required());
        self
    }

    /// Marks the sequence as optional (the default).
    pub fn optional(mut self) -> Self {
        self.rules.required = None;
        self
    }

    /// Substitutes `value` for blank input, bypassing element processing
    /// and the pipeline.
    pub fn default(mut self, value: Vec<S::Output>) -> Self {
        self.rules.default = Some(value);
        self
    }

    /// Substitutes `value` when the input has no sequence shape at all.
    pub fn catch(mut self, value: Vec<S::Output>) -> Self {
        self.rules.catch = Some(value);
        self
    }

    /// Requires at least `min` items.
    pub fn min_items(self, min: usize) -> Self {
        self.push_test(
            "min_items",
            format!("must have at least {} items", min),
            move |v: &Vec<S::Output>, _| v.len() >= min,
        )
    }

    /// Requires at most `max` items.
    pub fn max_items(self, max: usize) -> Self {
        self.push_test(
            "max_items",
            format!("must have at most {} items", max),
            move |v: &Vec<S::Output>, _| v.len() <= max,
        )
    }

    /// Requires exactly `len` items.
    pub fn len(self, len: usize) -> Self {
        self.push_test(
            "length",
            format!("must have exactly {} items", len),
            move |v: &Vec<S::Output>, _| v.len() == len,
        )
    }

    /// Requires at least one item.
    pub fn non_empty(self) -> Self {
        self.push_test(
            "non_empty",
            "must not be empty".to_string(),
            |v: &Vec<S::Output>, _| !v.is_empty(),
        )
    }

    /// Requires the parsed sequence to contain `needle`.
    pub fn contains(self, needle: S::Output) -> Self
    where
        S::Output: PartialEq,
    {
        self.push_test(
            "contains",
            "missing a required item".to_string(),
            move |v: &Vec<S::Output>, _| v.contains(&needle),
        )
    }

    /// Replaces the element-list coercer deciding how a raw value becomes
    /// a list of elements.
    pub fn with_coercer<F>(mut self, coercer: F) -> Self
    where
        F: Fn(&Value) -> Result<Vec<Value>, CoerceError> + Send + Sync + 'static,
    {
        self.coercer = Box::new(coercer);
        self
    }

    /// Appends an in-place transform over the whole sequence, run after
    /// element processing.
    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&mut Vec<S::Output>, &ExecCtx) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
            + Send
            + Sync
            + 'static,
    {
        self.rules
            .pipeline
            .push(Processor::Transform(Box::new(transform)));
        self
    }

    /// Appends a named test over the whole sequence.
    pub fn test<F>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Vec<S::Output>, &ExecCtx) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        let message = format!("failed '{}' check", name);
        self.rules
            .pipeline
            .push(Processor::Test(Test::new(name, message, check)));
        self
    }

    /// Sets a custom message for the most recently declared constraint.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.rules.set_last_message(message.into());
        self
    }

    fn push_test<F>(mut self, name: &str, message: String, check: F) -> Self
    where
        F: Fn(&Vec<S::Output>, &ExecCtx) -> bool + Send + Sync + 'static,
    {
        self.rules
            .pipeline
            .push(Processor::Test(Test::new(name, message, check)));
        self
    }
}

impl<S> SchemaLike for ArraySchema<S>
where
    S: SchemaLike,
    S::Output: Clone + Default + Send + Sync + 'static,
{
    type Output = Vec<S::Output>;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Array
    }

    fn process(&self, ctx: &mut SchemaCtx<'_, '_, Vec<S::Output>>) {
        if ctx.data.is_blank() {
            resolve_blank(ctx.dest, &self.rules, ctx.exec);
            return;
        }

        let coerced = match &ctx.data {
            ParseData::Value(raw) => (self.coercer)(raw),
            ParseData::Provider(_) => Err(CoerceError::new("sequence", "keyed input")),
            ParseData::Absent => return,
        };

        let items = match coerced {
            Ok(items) => items,
            Err(err) => match &self.rules.catch {
                Some(fallback) => {
                    *ctx.dest = fallback.clone();
                    run_pipeline(ctx.dest, &self.rules.pipeline, ctx.exec);
                    return;
                }
                None => {
                    let message = self
                        .rules
                        .coerce_message
                        .clone()
                        .unwrap_or_else(|| err.to_string());
                    ctx.exec.record(
                        Issue::new(IssueCode::Coerce, message)
                            .with_cause(std::sync::Arc::new(err)),
                    );
                    return;
                }
            },
        };

        ctx.dest.clear();
        ctx.dest.resize_with(items.len(), S::Output::default);

        for (i, item) in items.iter().enumerate() {
            ctx.exec.path_mut().push_index(i);
            let mut child = SchemaCtx {
                data: ParseData::Value(Cow::Borrowed(item)),
                dest: &mut ctx.dest[i],
                exec: &mut *ctx.exec,
                kind: self.element.kind(),
            };
            self.element.process(&mut child);
            ctx.exec.path_mut().pop();
        }

        run_pipeline(ctx.dest, &self.rules.pipeline, ctx.exec);
    }

    fn verify(&self, dest: &mut Vec<S::Output>, exec: &mut ExecCtx) {
        if dest.is_empty() {
            resolve_blank(dest, &self.rules, exec);
            return;
        }
        for (i, item) in dest.iter_mut().enumerate() {
            exec.path_mut().push_index(i);
            self.element.verify(item, exec);
            exec.path_mut().pop();
        }
        run_pipeline(dest, &self.rules.pipeline, exec);
    }
}
