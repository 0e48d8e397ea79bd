//! Per-comparison traversal state: cycle guard and difference sink.

use std::collections::HashSet;

use crate::model::{ObjectId, Value};

use super::path::DiffPath;
use super::result::{DiffResult, Difference};

/// Identity-based cycle guard.
///
/// Membership is by instance identity, never by structural equality: two
/// distinct, value-equal objects are each visited once, and structural
/// equality could itself recurse forever on a cyclic graph.
#[derive(Debug, Default)]
pub struct VisitedSet {
    ids: HashSet<ObjectId>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self, id: ObjectId) -> bool {
        self.ids.contains(&id)
    }

    pub fn mark(&mut self, id: ObjectId) {
        self.ids.insert(id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// State owned by one top-level comparison call.
///
/// Created per [`DiffEngine::diff`](super::DiffEngine::diff) invocation and
/// threaded by mutable reference through the recursion; never shared between
/// independent comparisons.
#[derive(Debug, Default)]
pub(crate) struct ComparisonContext {
    visited: VisitedSet,
    differences: Vec<Difference>,
    skipped_members: Vec<String>,
}

impl ComparisonContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn already_visited(&self, id: ObjectId) -> bool {
        self.visited.visited(id)
    }

    pub(crate) fn mark_visited(&mut self, id: ObjectId) {
        self.visited.mark(id);
    }

    /// Append a difference with both sides rendered.
    pub(crate) fn emit(&mut self, path: &DiffPath, left: &Value, right: &Value) {
        self.emit_raw(path, left.to_string(), right.to_string());
    }

    /// Append a difference from pre-rendered text (type names, placeholders).
    pub(crate) fn emit_raw(
        &mut self,
        path: &DiffPath,
        left: impl Into<String>,
        right: impl Into<String>,
    ) {
        self.differences
            .push(Difference::new(path.as_str(), left, right));
    }

    pub(crate) fn record_skip(&mut self, path: &DiffPath) {
        tracing::debug!("skipping unreadable member at {path}");
        self.skipped_members.push(path.as_str().to_owned());
    }

    pub(crate) fn into_result(self) -> DiffResult {
        DiffResult {
            differences: self.differences,
            skipped_members: self.skipped_members,
        }
    }
}
