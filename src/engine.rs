//! The shared processing algorithm every schema kind delegates to.
//!
//! One algorithm runs per field: presence resolution (default, required,
//! optional-empty), coercion with catch fallback, and the processor
//! pipeline. Composite kinds reuse the same presence and pipeline steps
//! and replace coercion with recursion into children.

use std::error::Error;
use std::sync::Arc;

use crate::context::{ExecCtx, SchemaCtx};
use crate::error::{CoerceError, Issue, IssueCode};
use crate::provider::ParseData;
use crate::value::Value;

/// A named validation predicate with its attached message.
pub(crate) struct Test<T> {
    pub(crate) name: String,
    pub(crate) message: String,
    pub(crate) check: Box<dyn Fn(&T, &ExecCtx) -> bool + Send + Sync>,
}

impl<T> Test<T> {
    pub(crate) fn new<F>(name: impl Into<String>, message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T, &ExecCtx) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            message: message.into(),
            check: Box::new(check),
        }
    }

    /// The default required test: a blank input always fails it.
    pub(crate) fn required() -> Self {
        Test::new("required", "is required", |_, _| false)
    }
}

pub(crate) type TransformFn<T> =
    Box<dyn Fn(&mut T, &ExecCtx) -> Result<(), Box<dyn Error + Send + Sync>> + Send + Sync>;

/// One step of a schema's pipeline: a pure test or an in-place transform.
pub(crate) enum Processor<T> {
    Test(Test<T>),
    Transform(TransformFn<T>),
}

/// The per-field settings shared by every schema kind: the processor
/// pipeline, the default, the required test, the catch value, and an
/// optional custom coercion message.
pub(crate) struct Rules<T> {
    pub(crate) pipeline: Vec<Processor<T>>,
    pub(crate) default: Option<T>,
    pub(crate) required: Option<Test<T>>,
    pub(crate) catch: Option<T>,
    pub(crate) coerce_message: Option<String>,
}

impl<T> Default for Rules<T> {
    fn default() -> Self {
        Self {
            pipeline: Vec::new(),
            default: None,
            required: None,
            catch: None,
            coerce_message: None,
        }
    }
}

impl<T> Rules<T> {
    /// Sets the custom message for the most recently declared constraint:
    /// the last pipeline test, else the required test, else the coercion
    /// message.
    pub(crate) fn set_last_message(&mut self, message: String) {
        if let Some(Processor::Test(test)) = self.pipeline.last_mut() {
            test.message = message;
        } else if let Some(required) = &mut self.required {
            required.message = message;
        } else {
            self.coerce_message = Some(message);
        }
    }
}

/// Resolves a blank input: substitute the default, evaluate the required
/// test, or accept the optional-empty and leave the destination untouched.
///
/// Defaults bypass the pipeline entirely; they are trusted values.
pub(crate) fn resolve_blank<T: Clone>(dest: &mut T, rules: &Rules<T>, exec: &mut ExecCtx) {
    if let Some(default) = &rules.default {
        *dest = default.clone();
        return;
    }
    if let Some(required) = &rules.required {
        if !(required.check)(&*dest, &*exec) {
            exec.record(Issue::new(IssueCode::Required, required.message.clone()));
        }
    }
}

/// The parse algorithm for primitive kinds: presence, coercion with catch
/// fallback, then the pipeline.
pub(crate) fn parse_primitive<T: Clone>(
    ctx: &mut SchemaCtx<'_, '_, T>,
    rules: &Rules<T>,
    coercer: &(dyn Fn(&Value) -> Result<T, CoerceError> + Send + Sync),
) {
    if ctx.data.is_blank() {
        resolve_blank(ctx.dest, rules, ctx.exec);
        return;
    }

    let coerced = match &ctx.data {
        ParseData::Value(raw) => coercer(raw),
        // a keyed view has no scalar shape to coerce from
        ParseData::Provider(_) => Err(CoerceError::new(ctx.kind.as_str(), "keyed input")),
        ParseData::Absent => return,
    };

    match coerced {
        Ok(value) => *ctx.dest = value,
        Err(err) => match &rules.catch {
            // the catch absorbs the failure; the pipeline still runs
            Some(fallback) => *ctx.dest = fallback.clone(),
            None => {
                let message = rules
                    .coerce_message
                    .clone()
                    .unwrap_or_else(|| err.to_string());
                ctx.exec
                    .record(Issue::new(IssueCode::Coerce, message).with_cause(Arc::new(err)));
                return;
            }
        },
    }

    run_pipeline(ctx.dest, &rules.pipeline, ctx.exec);
}

/// The validate algorithm for primitive kinds: the parse algorithm minus
/// coercion. Presence means the destination equals its zero value.
pub(crate) fn validate_primitive<T: Clone + Default + PartialEq>(
    dest: &mut T,
    rules: &Rules<T>,
    exec: &mut ExecCtx,
) {
    if *dest == T::default() {
        resolve_blank(dest, rules, exec);
        return;
    }
    run_pipeline(dest, &rules.pipeline, exec);
}

/// Runs the pipeline in declared order. Every processor runs: a failing
/// test records an issue and continues, a failing transform records an
/// issue and continues, so one field may accumulate several issues.
pub(crate) fn run_pipeline<T>(dest: &mut T, pipeline: &[Processor<T>], exec: &mut ExecCtx) {
    for processor in pipeline {
        match processor {
            Processor::Test(test) => {
                if !(test.check)(&*dest, &*exec) {
                    exec.record(Issue::new(
                        IssueCode::Test(test.name.clone()),
                        test.message.clone(),
                    ));
                }
            }
            Processor::Transform(transform) => {
                if let Err(err) = transform(dest, &*exec) {
                    let message = err.to_string();
                    exec.record(Issue::new(IssueCode::Transform, message).with_cause(Arc::from(err)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce;
    use crate::schema::SchemaKind;
    use std::borrow::Cow;

    fn rules() -> Rules<i64> {
        Rules::default()
    }

    fn parse(data: ParseData<'_>, rules: &Rules<i64>) -> (i64, crate::IssueMap) {
        let mut exec = ExecCtx::default();
        let mut dest = 0i64;
        let mut ctx = SchemaCtx {
            data,
            dest: &mut dest,
            exec: &mut exec,
            kind: SchemaKind::Integer,
        };
        parse_primitive(&mut ctx, rules, &coerce::integer);
        (dest, exec.take_issues())
    }

    #[test]
    fn test_optional_empty_leaves_destination() {
        let (dest, issues) = parse(ParseData::Absent, &rules());
        assert_eq!(dest, 0);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_default_bypasses_pipeline() {
        let mut rules = rules();
        rules.default = Some(7);
        rules.pipeline.push(Processor::Test(Test::new(
            "never",
            "always fails",
            |_: &i64, _| false,
        )));

        let (dest, issues) = parse(ParseData::Absent, &rules);
        assert_eq!(dest, 7);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_required_blank_records_single_issue() {
        let mut rules = rules();
        rules.required = Some(Test::required());

        let (dest, issues) = parse(ParseData::Value(Cow::Owned(Value::Null)), &rules);
        assert_eq!(dest, 0);
        assert_eq!(issues.issue_count(), 1);
        assert_eq!(issues.get("$root").unwrap()[0].code, IssueCode::Required);
    }

    #[test]
    fn test_coercion_failure_without_catch_stops() {
        let mut rules = rules();
        rules.pipeline.push(Processor::Test(Test::new(
            "never",
            "always fails",
            |_: &i64, _| false,
        )));

        let (dest, issues) = parse(ParseData::Value(Cow::Owned(Value::from("abc"))), &rules);
        assert_eq!(dest, 0);
        // only the coercion issue; the pipeline never ran
        assert_eq!(issues.issue_count(), 1);
        assert_eq!(issues.get("$root").unwrap()[0].code, IssueCode::Coerce);
    }

    #[test]
    fn test_catch_suppresses_coercion_and_runs_pipeline() {
        let mut rules = rules();
        rules.catch = Some(99);
        rules.pipeline.push(Processor::Test(Test::new(
            "max",
            "too large",
            |v: &i64, _| *v <= 10,
        )));

        let (dest, issues) = parse(ParseData::Value(Cow::Owned(Value::from("abc"))), &rules);
        assert_eq!(dest, 99);
        // no coercion issue, but the pipeline ran against the catch value
        assert_eq!(issues.issue_count(), 1);
        assert_eq!(
            issues.get("$root").unwrap()[0].code,
            IssueCode::test("max")
        );
    }

    #[test]
    fn test_pipeline_runs_in_full() {
        let mut rules = rules();
        rules.pipeline.push(Processor::Test(Test::new(
            "first",
            "first failed",
            |_: &i64, _| false,
        )));
        rules.pipeline.push(Processor::Transform(Box::new(
            |v: &mut i64, _: &ExecCtx| {
                *v += 1;
                Ok(())
            },
        )));
        rules.pipeline.push(Processor::Test(Test::new(
            "second",
            "second failed",
            |_: &i64, _| false,
        )));

        let (dest, issues) = parse(ParseData::Value(Cow::Owned(Value::from(5))), &rules);
        // the transform between two failing tests still ran
        assert_eq!(dest, 6);
        assert_eq!(issues.issue_count(), 2);
    }

    #[test]
    fn test_validate_skips_coercion() {
        let mut rules = rules();
        rules.pipeline.push(Processor::Test(Test::new(
            "positive",
            "must be positive",
            |v: &i64, _| *v > 0,
        )));

        let mut exec = ExecCtx::default();
        let mut dest = -3i64;
        validate_primitive(&mut dest, &rules, &mut exec);
        let issues = exec.take_issues();
        assert_eq!(issues.issue_count(), 1);
    }

    #[test]
    fn test_validate_zero_value_is_blank() {
        let mut rules = rules();
        rules.required = Some(Test::required());

        let mut exec = ExecCtx::default();
        let mut dest = 0i64;
        validate_primitive(&mut dest, &rules, &mut exec);
        let issues = exec.take_issues();
        assert_eq!(issues.get("$root").unwrap()[0].code, IssueCode::Required);
    }

    #[test]
    fn test_last_message_targets_recent_constraint() {
        let mut rules = rules();
        rules.required = Some(Test::required());
        rules.set_last_message("please supply a value".to_string());
        assert_eq!(
            rules.required.as_ref().unwrap().message,
            "please supply a value"
        );

        rules.pipeline.push(Processor::Test(Test::new(
            "min",
            "too small",
            |_: &i64, _| true,
        )));
        rules.set_last_message("way too small".to_string());
        match rules.pipeline.last().unwrap() {
            Processor::Test(test) => assert_eq!(test.message, "way too small"),
            _ => panic!("expected test"),
        }
    }
}
