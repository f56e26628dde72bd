//! Integer and float schema constraints.

use crate::coerce;
use crate::schema::{ScalarSchema, SchemaKind};

/// A schema coercing and validating `i64` values.
///
/// # Example
///
/// ```rust
/// use intake::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::integer().min(1).max(10);
/// let mut count = 0i64;
///
/// let issues = schema.parse(json!(42), &mut count);
/// assert_eq!(issues.len(), 1);
/// ```
pub type IntegerSchema = ScalarSchema<i64>;

/// A schema coercing and validating `f64` values.
pub type FloatSchema = ScalarSchema<f64>;

impl ScalarSchema<i64> {
    /// Creates an integer schema with the default coercer (integral floats
    /// narrow, numeric strings parse).
    pub fn new() -> Self {
        Self::with_kind(SchemaKind::Integer, Box::new(coerce::integer))
    }

    /// Requires the value to be at least `min`.
    pub fn min(self, min: i64) -> Self {
        self.push_test(
            "min",
            format!("must be at least {}", min),
            move |v: &i64, _| *v >= min,
        )
    }

    /// Requires the value to be at most `max`.
    pub fn max(self, max: i64) -> Self {
        self.push_test(
            "max",
            format!("must be at most {}", max),
            move |v: &i64, _| *v <= max,
        )
    }

    /// Requires `min <= value <= max`.
    pub fn range(self, min: i64, max: i64) -> Self {
        self.push_test(
            "range",
            format!("must be between {} and {}", min, max),
            move |v: &i64, _| (min..=max).contains(v),
        )
    }

    /// Requires the value to be strictly greater than zero.
    pub fn positive(self) -> Self {
        self.push_test("positive", "must be positive".to_string(), |v: &i64, _| {
            *v > 0
        })
    }

    /// Requires the value to be zero or greater.
    pub fn non_negative(self) -> Self {
        self.push_test(
            "non_negative",
            "must not be negative".to_string(),
            |v: &i64, _| *v >= 0,
        )
    }

    /// Requires the value to be strictly less than zero.
    pub fn negative(self) -> Self {
        self.push_test("negative", "must be negative".to_string(), |v: &i64, _| {
            *v < 0
        })
    }

    /// Requires the value to equal one of the allowed values.
    pub fn one_of(self, allowed: Vec<i64>) -> Self {
        let message = format!("must be one of {:?}", allowed);
        self.push_test("one_of", message, move |v: &i64, _| allowed.contains(v))
    }
}

impl ScalarSchema<f64> {
    /// Creates a float schema with the default coercer (integers widen,
    /// numeric strings parse).
    pub fn new() -> Self {
        Self::with_kind(SchemaKind::Float, Box::new(coerce::float))
    }

    /// Requires the value to be at least `min`.
    pub fn min(self, min: f64) -> Self {
        self.push_test(
            "min",
            format!("must be at least {}", min),
            move |v: &f64, _| *v >= min,
        )
    }

    /// Requires the value to be at most `max`.
    pub fn max(self, max: f64) -> Self {
        self.push_test(
            "max",
            format!("must be at most {}", max),
            move |v: &f64, _| *v <= max,
        )
    }

    /// Requires `min <= value <= max`.
    pub fn range(self, min: f64, max: f64) -> Self {
        self.push_test(
            "range",
            format!("must be between {} and {}", min, max),
            move |v: &f64, _| *v >= min && *v <= max,
        )
    }

    /// Requires the value to be strictly greater than zero.
    pub fn positive(self) -> Self {
        self.push_test("positive", "must be positive".to_string(), |v: &f64, _| {
            *v > 0.0
        })
    }

    /// Requires the value to be strictly less than zero.
    pub fn negative(self) -> Self {
        self.push_test("negative", "must be negative".to_string(), |v: &f64, _| {
            *v < 0.0
        })
    }

    /// Requires the value to be finite (not NaN or infinite).
    pub fn finite(self) -> Self {
        self.push_test("finite", "must be finite".to_string(), |v: &f64, _| {
            v.is_finite()
        })
    }
}

impl Default for ScalarSchema<i64> {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for ScalarSchema<f64> {
    fn default() -> Self {
        Self::new()
    }
}
