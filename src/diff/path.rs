//! Textual paths locating a comparison within the root graph.

use std::fmt;

/// A dot/bracket-separated location, e.g. `c1234.Bones[3].Translation`.
///
/// Paths are plain strings with no escaping; member names produced by the
/// parsers are valid identifiers by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiffPath(String);

impl DiffPath {
    /// Start a path at a caller-supplied root label, typically the artifact
    /// or archive-entry name.
    pub fn root(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Append a named member: `path.Member`.
    pub fn child(&self, member: &str) -> Self {
        Self(format!("{}.{member}", self.0))
    }

    /// Append a sequence index: `path[i]`.
    pub fn index(&self, i: usize) -> Self {
        Self(format!("{}[{i}]", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiffPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DiffPath> for String {
    fn from(path: DiffPath) -> String {
        path.0
    }
}
