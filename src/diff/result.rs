//! Diff output types: the located-difference record and its sink.

use serde::Serialize;

/// Placeholder text for a member present on one side only.
pub const MISSING_MEMBER: &str = "<missing>";

/// A single reported mismatch, tagged with the path at which it occurred.
///
/// Both sides are stored as rendered text so that every consumer (the HTML,
/// JSON and summary reporters) can handle them uniformly, with `null` as a
/// stable placeholder rather than an absent field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Difference {
    /// Root-relative location, e.g. `c1234.Bones[3].Translation`.
    pub path: String,
    /// Rendered left-side value (or type name, for type mismatches).
    pub left: String,
    /// Rendered right-side value.
    pub right: String,
}

impl Difference {
    pub fn new(path: impl Into<String>, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            left: left.into(),
            right: right.into(),
        }
    }
}

/// Ordered result of one comparison: every difference discovered, in
/// traversal order, plus the members the walk skipped by policy.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiffResult {
    pub differences: Vec<Difference>,
    /// Paths of write-only/indexer members that could not be read
    /// generically and were skipped.
    pub skipped_members: Vec<String>,
}

impl DiffResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_differences(&self) -> bool {
        !self.differences.is_empty()
    }

    pub fn len(&self) -> usize {
        self.differences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Difference> {
        self.differences.iter()
    }

    /// Fold another comparison's output into this one, preserving order.
    /// Used when an archive yields several per-entry comparisons that are
    /// reported as one document.
    pub fn merge(&mut self, other: DiffResult) {
        self.differences.extend(other.differences);
        self.skipped_members.extend(other.skipped_members);
    }
}

impl<'a> IntoIterator for &'a DiffResult {
    type Item = &'a Difference;
    type IntoIter = std::slice::Iter<'a, Difference>;

    fn into_iter(self) -> Self::IntoIter {
        self.differences.iter()
    }
}
