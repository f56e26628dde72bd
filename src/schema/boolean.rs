//! Boolean schema constraints.

use crate::coerce;
use crate::schema::{ScalarSchema, SchemaKind};

/// A schema coercing and validating `bool` values.
///
/// Accepts booleans and the strings `"true"`, `"false"`, `"1"`, `"0"`.
///
/// # Example
///
/// ```rust
/// use intake::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::boolean();
/// let mut agreed = false;
///
/// let issues = schema.parse(json!("true"), &mut agreed);
/// assert!(issues.is_empty());
/// assert!(agreed);
/// ```
pub type BooleanSchema = ScalarSchema<bool>;

impl ScalarSchema<bool> {
    /// Creates a boolean schema with the default coercer.
    pub fn new() -> Self {
        Self::with_kind(SchemaKind::Boolean, Box::new(coerce::boolean))
    }

    /// Requires the value to be `true` (e.g. a terms-of-service checkbox).
    pub fn must_be_true(self) -> Self {
        self.push_test("is_true", "must be true".to_string(), |v: &bool, _| *v)
    }

    /// Requires the value to be `false`.
    pub fn must_be_false(self) -> Self {
        self.push_test("is_false", "must be false".to_string(), |v: &bool, _| !*v)
    }
}

impl Default for ScalarSchema<bool> {
    fn default() -> Self {
        Self::new()
    }
}
