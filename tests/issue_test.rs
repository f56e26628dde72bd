//! Integration tests for issue reporting, formatting, and call options.

use intake::{ExecOptions, IssueCode, Schema, SchemaLike};
use serde_json::json;

#[test]
fn test_issue_map_display_numbers_every_issue() {
    #[derive(Default, Clone)]
    struct User {
        name: String,
        age: i64,
    }

    let schema = Schema::object()
        .field("name", Schema::string().required(), |u: &mut User| {
            &mut u.name
        })
        .field("age", Schema::integer().min(0), |u: &mut User| &mut u.age);

    let mut user = User::default();
    let issues = schema.parse(json!({"age": -1}), &mut user);

    let rendered = issues.to_string();
    assert!(rendered.contains("2 issue(s)"));
    assert!(rendered.contains("1. name: is required"));
    assert!(rendered.contains("2. age: must be at least 0"));
}

#[test]
fn test_first_returns_earliest_discovered() {
    let schema = Schema::string().required();
    let mut dest = String::new();

    let issues = schema.parse(json!(null), &mut dest);
    let (path, issue) = issues.first().unwrap();
    assert_eq!(path, "$root");
    assert_eq!(issue.code, IssueCode::Required);
}

#[test]
fn test_with_code_filters_across_paths() {
    #[derive(Default, Clone)]
    struct Pair {
        a: String,
        b: String,
    }

    let schema = Schema::object()
        .field("a", Schema::string().required(), |p: &mut Pair| &mut p.a)
        .field("b", Schema::string().required(), |p: &mut Pair| &mut p.b);

    let mut pair = Pair::default();
    let issues = schema.parse(json!({}), &mut pair);

    let required = issues.with_code(&IssueCode::Required);
    assert_eq!(required.len(), 2);
    assert_eq!(required[0].0, "a");
    assert_eq!(required[1].0, "b");
}

#[test]
fn test_into_result() {
    let schema = Schema::string().required();
    let mut dest = String::new();

    assert!(schema.parse(json!("ok"), &mut dest).into_result().is_ok());
    assert!(schema.parse(json!(null), &mut dest).into_result().is_err());
}

#[test]
fn test_formatter_rewrites_messages() {
    let schema = Schema::string().required();
    let mut dest = String::new();

    let options =
        ExecOptions::new().formatter(|issue, path| format!("[{}] {} {}", issue.code, path, issue.message));
    let issues = schema.parse_with(json!(null), &mut dest, options);

    assert_eq!(
        issues.get("$root").unwrap()[0].message,
        "[required] $root is required"
    );
}

#[test]
fn test_formatter_does_not_leak_into_later_calls() {
    let schema = Schema::string().required();
    let mut dest = String::new();

    let options = ExecOptions::new().formatter(|_, _| "rewritten".to_string());
    let issues = schema.parse_with(json!(null), &mut dest, options);
    assert_eq!(issues.get("$root").unwrap()[0].message, "rewritten");

    // a plain call afterwards sees the stock message
    let issues = schema.parse(json!(null), &mut dest);
    assert_eq!(issues.get("$root").unwrap()[0].message, "is required");
}

#[test]
fn test_repeated_parses_are_idempotent() {
    let schema = Schema::string().required().min_len(5);
    let mut dest = String::new();

    let first = schema.parse(json!("ab"), &mut dest);
    let second = schema.parse(json!("ab"), &mut dest);
    assert_eq!(first, second);
}

#[test]
fn test_issues_do_not_leak_across_calls() {
    let schema = Schema::string().required();
    let mut dest = String::new();

    let issues = schema.parse(json!(null), &mut dest);
    assert_eq!(issues.issue_count(), 1);

    // the next call starts clean even though the last one failed
    let issues = schema.parse(json!("fine"), &mut dest);
    assert!(issues.is_empty());
}

#[test]
fn test_transform_error_becomes_issue() {
    let schema = Schema::string().transform(|s, _| {
        if s.contains('@') {
            Err("no at-signs allowed".into())
        } else {
            Ok(())
        }
    });
    let mut dest = String::new();

    let issues = schema.parse(json!("a@b"), &mut dest);
    let issue = &issues.get("$root").unwrap()[0];
    assert_eq!(issue.code, IssueCode::Transform);
    assert_eq!(issue.message, "no at-signs allowed");
    assert!(std::error::Error::source(issue).is_some());
}

#[test]
fn test_path_aware_test_closure() {
    let schema = Schema::array(Schema::string().test("not_first", |_, exec| {
        // the execution context exposes the path being processed
        exec.current_path() != "[0]"
    }));
    let mut dest: Vec<String> = Vec::new();

    let issues = schema.parse(json!(["a", "b"]), &mut dest);
    assert!(issues.get("[0]").is_some());
    assert!(issues.get("[1]").is_none());
}
