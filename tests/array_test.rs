//! Integration tests for array schema parsing.

use intake::{IssueCode, Schema, SchemaLike};
use serde_json::json;

#[test]
fn test_array_of_strings() {
    let schema = Schema::array(Schema::string());
    let mut dest: Vec<String> = Vec::new();

    let issues = schema.parse(json!(["a", "b", "c"]), &mut dest);
    assert!(issues.is_empty());
    assert_eq!(dest, vec!["a", "b", "c"]);
}

#[test]
fn test_arrays_are_optional_by_default() {
    let schema = Schema::array(Schema::string());
    let mut dest: Vec<String> = Vec::new();

    let issues = schema.parse(json!(null), &mut dest);
    assert!(issues.is_empty());
    assert!(dest.is_empty());
}

#[test]
fn test_required_array_blank_input() {
    let schema = Schema::array(Schema::string()).required();
    let mut dest: Vec<String> = Vec::new();

    let issues = schema.parse(json!(null), &mut dest);
    let (path, issue) = issues.first().unwrap();
    assert_eq!(path, "$root");
    assert_eq!(issue.code, IssueCode::Required);
    assert_eq!(issue.message, "is required");
}

#[test]
fn test_scalar_coerces_to_one_element() {
    let schema = Schema::array(Schema::string());
    let mut dest: Vec<String> = Vec::new();

    // single form values still satisfy array schemas
    let issues = schema.parse(json!("solo"), &mut dest);
    assert!(issues.is_empty());
    assert_eq!(dest, vec!["solo"]);
}

#[test]
fn test_element_issues_use_indexed_paths() {
    let schema = Schema::array(Schema::string().min_len(2));
    let mut dest: Vec<String> = Vec::new();

    let issues = schema.parse(json!(["ok", "x", "also ok", "y"]), &mut dest);
    assert_eq!(issues.len(), 2);
    assert!(issues.get("[1]").is_some());
    assert!(issues.get("[3]").is_some());
    assert!(issues.get("[0]").is_none());

    // valid elements still land in the destination
    assert_eq!(dest[0], "ok");
    assert_eq!(dest[2], "also ok");
}

#[test]
fn test_element_coercion_failures_are_per_element() {
    let schema = Schema::array(Schema::integer());
    let mut dest: Vec<i64> = Vec::new();

    let issues = schema.parse(json!([1, "two", 3]), &mut dest);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.get("[1]").unwrap()[0].code, IssueCode::Coerce);
    assert_eq!(dest[0], 1);
    assert_eq!(dest[2], 3);
}

#[test]
fn test_item_count_constraints() {
    let mut dest: Vec<String> = Vec::new();

    let issues = Schema::array(Schema::string())
        .min_items(2)
        .parse(json!(["only"]), &mut dest);
    assert_eq!(
        issues.get("$root").unwrap()[0].code,
        IssueCode::test("min_items")
    );

    let issues = Schema::array(Schema::string())
        .max_items(1)
        .parse(json!(["a", "b"]), &mut dest);
    assert_eq!(
        issues.get("$root").unwrap()[0].code,
        IssueCode::test("max_items")
    );
}

#[test]
fn test_non_empty_and_contains() {
    let mut dest: Vec<String> = Vec::new();

    let issues = Schema::array(Schema::string())
        .non_empty()
        .parse(json!([]), &mut dest);
    assert_eq!(
        issues.get("$root").unwrap()[0].code,
        IssueCode::test("non_empty")
    );

    let schema = Schema::array(Schema::string()).contains("admin".to_string());
    assert!(schema.parse(json!(["admin", "dev"]), &mut dest).is_empty());
    let issues = schema.parse(json!(["dev"]), &mut dest);
    assert_eq!(
        issues.get("$root").unwrap()[0].code,
        IssueCode::test("contains")
    );
}

#[test]
fn test_custom_element_coercer() {
    use intake::Value;

    // split comma-separated form values into elements
    let schema = Schema::array(Schema::string()).with_coercer(|raw| match raw {
        Value::String(s) => Ok(s.split(',').map(Value::from).collect()),
        other => intake::coerce::element_list(other),
    });

    let mut dest: Vec<String> = Vec::new();
    let issues = schema.parse(json!("a,b,c"), &mut dest);
    assert!(issues.is_empty());
    assert_eq!(dest, vec!["a", "b", "c"]);
}

#[test]
fn test_count_constraints_run_even_with_element_issues() {
    let schema = Schema::array(Schema::string().min_len(5)).min_items(3);
    let mut dest: Vec<String> = Vec::new();

    let issues = schema.parse(json!(["ab", "cd"]), &mut dest);
    // two element issues plus the count issue
    assert_eq!(issues.issue_count(), 3);
    assert!(issues.get("$root").is_some());
}

#[test]
fn test_map_does_not_coerce_to_array() {
    let schema = Schema::array(Schema::string());
    let mut dest: Vec<String> = Vec::new();

    let issues = schema.parse(json!({"0": "a"}), &mut dest);
    assert_eq!(issues.get("$root").unwrap()[0].code, IssueCode::Coerce);
}

#[test]
fn test_array_default() {
    let schema =
        Schema::array(Schema::string()).default(vec!["x".to_string(), "y".to_string()]);
    let mut dest: Vec<String> = Vec::new();

    let issues = schema.parse(json!(null), &mut dest);
    assert!(issues.is_empty());
    assert_eq!(dest, vec!["x", "y"]);
}

#[test]
fn test_nested_arrays() {
    let schema = Schema::array(Schema::array(Schema::integer().positive()));
    let mut dest: Vec<Vec<i64>> = Vec::new();

    let issues = schema.parse(json!([[1, 2], [3, -4]]), &mut dest);
    assert_eq!(issues.len(), 1);
    assert!(issues.get("[1][1]").is_some());
    assert_eq!(dest[0], vec![1, 2]);
}

#[test]
fn test_sequence_transform_runs_after_elements() {
    // element transforms run during recursion, sequence transforms after
    let schema = Schema::array(Schema::string().transform(|s, _| {
        s.make_ascii_lowercase();
        Ok(())
    }))
    .transform(|v, _| {
        for s in v.iter_mut() {
            *s = s.to_uppercase();
        }
        Ok(())
    })
    .test("all_upper", |v: &Vec<String>, _| {
        v.iter().all(|s| !s.chars().any(|c| c.is_lowercase()))
    });

    let mut dest: Vec<String> = Vec::new();
    let issues = schema.parse(json!(["Hello", "World"]), &mut dest);

    // the sequence transform saw the lowercased elements and won
    assert!(issues.is_empty());
    assert_eq!(dest, vec!["HELLO", "WORLD"]);
}

#[test]
fn test_sequence_transform_failure_records_issue() {
    let schema = Schema::array(Schema::string()).transform(|v, _| {
        if v.len() > 2 {
            Err("too many to normalize".into())
        } else {
            Ok(())
        }
    });

    let mut dest: Vec<String> = Vec::new();
    let issues = schema.parse(json!(["a", "b", "c"]), &mut dest);
    let issue = &issues.get("$root").unwrap()[0];
    assert_eq!(issue.code, IssueCode::Transform);
    assert_eq!(issue.message, "too many to normalize");
}

#[test]
fn test_reparse_replaces_previous_elements() {
    let schema = Schema::array(Schema::string());
    let mut dest: Vec<String> = Vec::new();

    schema.parse(json!(["a", "b", "c"]), &mut dest);
    schema.parse(json!(["z"]), &mut dest);
    assert_eq!(dest, vec!["z"]);
}

#[test]
fn test_validate_array_elements() {
    let schema = Schema::array(Schema::string().min_len(2)).min_items(1);
    let mut dest = vec!["ok".to_string(), "x".to_string()];

    let issues = schema.validate(&mut dest);
    assert_eq!(issues.len(), 1);
    assert!(issues.get("[1]").is_some());
}
