//! Issue types and the path-addressed issue map.

mod issue;

pub use issue::{CoerceError, Issue, IssueCode, IssueMap};

pub(crate) use issue::IssueList;
