//! Field-path tracking for locating values in nested structures.
//!
//! This module provides [`PathBuilder`] and [`PathSegment`] for building
//! the dotted/bracketed address of the field currently being processed
//! (e.g. `users[0].name`). One builder is shared down the whole recursion
//! of a call, so descent pushes a segment and ascent pops it.

use std::fmt::{self, Display};

/// The rendered path of the root value.
pub const ROOT_PATH: &str = "$root";

/// A segment of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field/property access (e.g., `user`, `email`)
    Field(String),
    /// An index access (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// A mutable stack of path segments addressing the field being processed.
///
/// The engine pushes exactly one segment when it descends into a child
/// field and pops it when that field completes, whether or not the child
/// recorded issues. The root path renders as the `$root` sentinel.
///
/// # Example
///
/// ```rust
/// use intake::PathBuilder;
///
/// let mut path = PathBuilder::new();
/// assert_eq!(path.render(), "$root");
///
/// path.push_field("users");
/// path.push_index(0);
/// path.push_field("email");
/// assert_eq!(path.render(), "users[0].email");
///
/// path.pop();
/// assert_eq!(path.render(), "users[0]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathBuilder {
    segments: Vec<PathSegment>,
}

impl PathBuilder {
    /// Creates an empty builder positioned at the root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a field segment.
    pub fn push_field(&mut self, name: impl Into<String>) {
        self.segments.push(PathSegment::Field(name.into()));
    }

    /// Pushes an index segment.
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    /// Pops the most recent segment, returning it if the path was not at root.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Returns true if the path is at the root (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in the current path.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Returns an iterator over the current segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Renders the current path as a string.
    ///
    /// Fields are joined with `.`, indices use `[i]`, and the root renders
    /// as [`ROOT_PATH`].
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Drops all segments, returning the builder to the root.
    pub(crate) fn clear(&mut self) {
        self.segments.clear();
    }
}

impl Display for PathBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "{}", ROOT_PATH);
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
