//! String schema constraints.
//!
//! This module provides the constraint builders of [`StringSchema`]:
//! length bounds, regex patterns, and common format checks. Lengths count
//! Unicode scalar values, not bytes.

use std::sync::OnceLock;

use regex::Regex;

use crate::coerce;
use crate::schema::{ScalarSchema, SchemaKind};

/// A schema coercing and validating string values.
///
/// # Example
///
/// ```rust
/// use intake::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::string().min_len(3).max_len(20);
/// let mut username = String::new();
///
/// let issues = schema.parse(json!("ab"), &mut username);
/// assert_eq!(issues.len(), 1);
/// ```
pub type StringSchema = ScalarSchema<String>;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
    })
}

fn url_pattern() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| Regex::new(r"^https?://[^\s/$.?#]\S*$").expect("url pattern compiles"))
}

impl ScalarSchema<String> {
    /// Creates a string schema with the default coercer (strings pass
    /// through, numbers and booleans format).
    pub fn new() -> Self {
        Self::with_kind(SchemaKind::String, Box::new(coerce::string))
    }

    /// Requires at least `min` characters.
    pub fn min_len(self, min: usize) -> Self {
        self.push_test(
            "min_length",
            format!("must be at least {} characters", min),
            move |s: &String, _| s.chars().count() >= min,
        )
    }

    /// Requires at most `max` characters.
    pub fn max_len(self, max: usize) -> Self {
        self.push_test(
            "max_length",
            format!("must be at most {} characters", max),
            move |s: &String, _| s.chars().count() <= max,
        )
    }

    /// Requires exactly `len` characters.
    pub fn len(self, len: usize) -> Self {
        self.push_test(
            "length",
            format!("must be exactly {} characters", len),
            move |s: &String, _| s.chars().count() == len,
        )
    }

    /// Requires the string to match a regex pattern.
    ///
    /// Returns an error if the pattern itself is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use intake::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string().pattern(r"^\d+$").unwrap();
    /// let mut digits = String::new();
    ///
    /// let issues = schema.parse(json!("abc"), &mut digits);
    /// assert_eq!(issues.len(), 1);
    /// ```
    pub fn pattern(self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        let message = format!("must match pattern '{}'", pattern);
        Ok(self.push_test("pattern", message, move |s: &String, _| regex.is_match(s)))
    }

    /// Requires the string to look like an email address.
    pub fn email(self) -> Self {
        let regex = email_pattern().clone();
        self.push_test(
            "email",
            "must be a valid email address".to_string(),
            move |s: &String, _| regex.is_match(s),
        )
    }

    /// Requires the string to look like an http(s) URL.
    pub fn url(self) -> Self {
        let regex = url_pattern().clone();
        self.push_test(
            "url",
            "must be a valid URL".to_string(),
            move |s: &String, _| regex.is_match(s),
        )
    }

    /// Requires the string to contain `needle`.
    pub fn contains(self, needle: impl Into<String>) -> Self {
        let needle = needle.into();
        let message = format!("must contain '{}'", needle);
        self.push_test("contains", message, move |s: &String, _| {
            s.contains(&needle)
        })
    }

    /// Requires the string to start with `prefix`.
    pub fn starts_with(self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let message = format!("must start with '{}'", prefix);
        self.push_test("starts_with", message, move |s: &String, _| {
            s.starts_with(&prefix)
        })
    }

    /// Requires the string to end with `suffix`.
    pub fn ends_with(self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        let message = format!("must end with '{}'", suffix);
        self.push_test("ends_with", message, move |s: &String, _| {
            s.ends_with(&suffix)
        })
    }

    /// Requires the string to equal one of the allowed values.
    pub fn one_of(self, allowed: Vec<&str>) -> Self {
        let allowed: Vec<String> = allowed.into_iter().map(String::from).collect();
        let message = format!("must be one of {:?}", allowed);
        self.push_test("one_of", message, move |s: &String, _| {
            allowed.iter().any(|a| a == s)
        })
    }
}

impl Default for ScalarSchema<String> {
    fn default() -> Self {
        Self::new()
    }
}
