//! Concurrent use of shared schemas.

use std::sync::Arc;
use std::thread;

use intake::{IssueCode, Schema, SchemaLike};
use serde_json::json;

#[derive(Debug, Default, Clone)]
struct Signup {
    email: String,
    age: i64,
}

fn signup_schema() -> intake::ObjectSchema<Signup> {
    Schema::object()
        .field(
            "email",
            Schema::string().required().email(),
            |s: &mut Signup| &mut s.email,
        )
        .field("age", Schema::integer().min(13), |s: &mut Signup| &mut s.age)
}

#[test]
fn test_schema_shared_across_threads() {
    let schema = Arc::new(signup_schema());

    let handles: Vec<_> = (0..8i64)
        .map(|i| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let mut signup = Signup::default();
                let body = json!({"email": format!("user{}@example.com", i), "age": 20 + i});
                let issues = schema.parse(body, &mut signup);
                assert!(issues.is_empty());
                assert_eq!(signup.age, 20 + i);
                signup.email
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let email = handle.join().unwrap();
        assert_eq!(email, format!("user{}@example.com", i));
    }
}

#[test]
fn test_concurrent_failures_stay_isolated() {
    let schema = Arc::new(signup_schema());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let mut signup = Signup::default();
                // odd threads send an invalid body
                let body = if i % 2 == 0 {
                    json!({"email": "ok@example.com", "age": 30})
                } else {
                    json!({"age": 5})
                };
                schema.parse(body, &mut signup)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let issues = handle.join().unwrap();
        if i % 2 == 0 {
            assert!(issues.is_empty());
        } else {
            // each failing call sees exactly its own two issues
            assert_eq!(issues.issue_count(), 2);
            assert_eq!(issues.get("email").unwrap()[0].code, IssueCode::Required);
            assert_eq!(issues.get("age").unwrap()[0].code, IssueCode::test("min"));
        }
    }
}

#[test]
fn test_many_sequential_calls_recycle_contexts() {
    let schema = Schema::string().required().min_len(3);
    let mut dest = String::new();

    // far more calls than the context pool holds
    for i in 0..200 {
        let issues = schema.parse(json!(format!("value-{}", i)), &mut dest);
        assert!(issues.is_empty());
    }
    for _ in 0..200 {
        let issues = schema.parse(json!(null), &mut dest);
        assert_eq!(issues.issue_count(), 1);
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<intake::StringSchema>();
    assert_sync::<intake::StringSchema>();
    assert_send::<intake::ObjectSchema<Signup>>();
    assert_sync::<intake::ObjectSchema<Signup>>();
    assert_send::<intake::IssueMap>();
    assert_sync::<intake::IssueMap>();
};
