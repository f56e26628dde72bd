//! Validation issue types.
//!
//! This module provides [`Issue`] for single validation failures,
//! [`IssueMap`] for the path-addressed result of one call, and
//! [`CoerceError`] for coercion failures.

use std::error::Error;
use std::fmt::{self, Display};
use std::sync::Arc;

use indexmap::IndexMap;

use thiserror::Error;

/// A machine-readable classification of a validation issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// A required field was absent or blank.
    Required,
    /// The raw value could not be converted to the destination type.
    Coerce,
    /// A named validation predicate failed.
    Test(String),
    /// A transform step failed.
    Transform,
    /// The source adapter could not produce a usable input at all.
    SourceDecode,
}

impl IssueCode {
    /// Creates a test code from a predicate name.
    pub fn test(name: impl Into<String>) -> Self {
        IssueCode::Test(name.into())
    }
}

impl Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueCode::Required => write!(f, "required"),
            IssueCode::Coerce => write!(f, "coerce"),
            IssueCode::Test(name) => write!(f, "{}", name),
            IssueCode::Transform => write!(f, "transform"),
            IssueCode::SourceDecode => write!(f, "source_decode"),
        }
    }
}

/// A coercion failure: the raw value cannot become the destination type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot coerce {actual} into {expected}")]
pub struct CoerceError {
    /// The destination type that was expected.
    pub expected: &'static str,
    /// A description of the value that was actually supplied.
    pub actual: String,
}

impl CoerceError {
    /// Creates a coercion error from the expected type and the actual value
    /// description.
    pub fn new(expected: &'static str, actual: impl Into<String>) -> Self {
        Self {
            expected,
            actual: actual.into(),
        }
    }
}

/// A single validation issue.
///
/// An issue carries a machine-readable [`IssueCode`], a human-readable
/// message, and optionally the underlying error that caused it. Issues are
/// immutable once created; equality compares the code and message, the
/// cause is advisory.
///
/// # Example
///
/// ```rust
/// use intake::{Issue, IssueCode};
///
/// let issue = Issue::new(IssueCode::Required, "is required");
/// assert_eq!(issue.code, IssueCode::Required);
/// assert_eq!(issue.to_string(), "is required");
/// ```
#[derive(Debug, Clone)]
pub struct Issue {
    /// The machine-readable issue classification.
    pub code: IssueCode,
    /// The human-readable message.
    pub message: String,
    /// The underlying error, when one exists.
    pub cause: Option<Arc<dyn Error + Send + Sync>>,
}

impl Issue {
    /// Creates a new issue with the given code and message.
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// Attaches the underlying error and returns self for chaining.
    pub fn with_cause(mut self, cause: Arc<dyn Error + Send + Sync>) -> Self {
        self.cause = Some(cause);
        self
    }
}

impl PartialEq for Issue {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.message == other.message
    }
}

impl Eq for Issue {}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for Issue {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|c| c.as_ref() as &(dyn Error + 'static))
    }
}

// Issue must stay shareable across threads; the cause is held behind an
// Arc with Send + Sync bounds. These assertions keep that true if the
// fields change.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issue>();
    assert_sync::<Issue>();
};

/// The append-only issue accumulator for one Parse/Validate call.
///
/// Entries are `(rendered path, issue)` pairs in discovery order. One list
/// exists per call and is never shared across calls.
#[derive(Debug, Default)]
pub(crate) struct IssueList {
    entries: Vec<(String, Issue)>,
}

impl IssueList {
    pub(crate) fn push(&mut self, path: String, issue: Issue) {
        self.entries.push((path, issue));
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drains all entries into a path-grouped map, preserving discovery
    /// order per path and across paths.
    pub(crate) fn drain_into_map(&mut self) -> IssueMap {
        let mut map = IssueMap::new();
        for (path, issue) in self.entries.drain(..) {
            map.push(path, issue);
        }
        map
    }
}

/// The result of one Parse/Validate call: issues grouped by field path.
///
/// An empty map signals success. Absence of an entry for a path means that
/// field passed, not that it was skipped. Insertion order is preserved both
/// per path and across paths, so repeated calls with identical input yield
/// identical maps.
///
/// # Example
///
/// ```rust
/// use intake::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::string().required().min_len(3);
/// let mut name = String::new();
///
/// let issues = schema.parse(json!("ab"), &mut name);
/// assert_eq!(issues.len(), 1);
/// assert!(issues.get("$root").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IssueMap {
    entries: IndexMap<String, Vec<Issue>>,
}

impl IssueMap {
    /// Creates an empty issue map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an issue under the given path.
    pub fn push(&mut self, path: impl Into<String>, issue: Issue) {
        self.entries.entry(path.into()).or_default().push(issue);
    }

    /// Returns true if no issues were recorded (the call succeeded).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of paths that received at least one issue.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the total number of issues across all paths.
    pub fn issue_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Returns the issues recorded under a path, if any.
    pub fn get(&self, path: &str) -> Option<&[Issue]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    /// Returns the first issue recorded, with its path.
    pub fn first(&self) -> Option<(&str, &Issue)> {
        self.entries
            .iter()
            .find_map(|(path, issues)| issues.first().map(|i| (path.as_str(), i)))
    }

    /// Returns all issues with the given code, with their paths.
    pub fn with_code(&self, code: &IssueCode) -> Vec<(&str, &Issue)> {
        self.entries
            .iter()
            .flat_map(|(path, issues)| {
                issues
                    .iter()
                    .filter(|i| &i.code == code)
                    .map(move |i| (path.as_str(), i))
            })
            .collect()
    }

    /// Returns an iterator over `(path, issues)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Issue])> {
        self.entries
            .iter()
            .map(|(path, issues)| (path.as_str(), issues.as_slice()))
    }

    /// Converts the map into a `Result`: `Ok(())` when empty, `Err(self)`
    /// otherwise.
    pub fn into_result(self) -> Result<(), IssueMap> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for IssueMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "validation failed with {} issue(s):", self.issue_count())?;
        let mut n = 0;
        for (path, issues) in &self.entries {
            for issue in issues {
                n += 1;
                writeln!(f, "  {}. {}: {}", n, path, issue)?;
            }
        }
        Ok(())
    }
}

impl Error for IssueMap {}

impl IntoIterator for IssueMap {
    type Item = (String, Vec<Issue>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<Issue>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a IssueMap {
    type Item = (&'a String, &'a Vec<Issue>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<Issue>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<IssueMap>();
    assert_sync::<IssueMap>();
};
