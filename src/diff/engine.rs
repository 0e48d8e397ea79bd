//! The recursive lockstep graph walk.

use crate::error::{DiffErrorKind, FlverDiffError, Result};
use crate::model::{MemberAccess, ObjectRef, Value};

use super::classify::{classify, TypeCategory};
use super::path::DiffPath;
use super::result::{DiffResult, MISSING_MEMBER};
use super::visit::ComparisonContext;

/// Default recursion depth limit. Parsed model graphs are shallow by
/// construction; anything deeper than this is malformed or hostile input.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Structural diff engine for model graphs.
///
/// Walks two graphs of mutually-matching shape in lockstep and reports every
/// differing leaf as a located [`Difference`](super::Difference). Structural
/// mismatches are data, never errors: the walk always completes and returns
/// the full difference list. The only failure modes are a member whose
/// access is refused by the producer ([`DiffErrorKind::AccessDenied`]) and
/// exceeding the recursion depth limit.
///
/// Shared substructure is compared once: an object already visited through
/// one path is treated as equal when reached again through another, so
/// differences reachable only through the second path go unreported. This
/// matches the cycle guard's identity semantics and is a known limitation,
/// not a guarantee worth relying on.
///
/// # Example
///
/// ```
/// use flver_diff::{DiffEngine, Object, Value};
///
/// let old = Object::builder("Mesh").property("MaterialIndex", 0i64).build();
/// let new = Object::builder("Mesh").property("MaterialIndex", 2i64).build();
///
/// let result = DiffEngine::new()
///     .diff(&Value::from(old), &Value::from(new), "m1000")
///     .expect("no denied members");
/// assert_eq!(result.differences[0].path, "m1000.MaterialIndex");
/// ```
#[derive(Debug, Clone)]
pub struct DiffEngine {
    max_depth: usize,
}

impl DiffEngine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the recursion depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Compare two root values under the given root path label.
    pub fn diff(&self, left: &Value, right: &Value, root_label: &str) -> Result<DiffResult> {
        let mut ctx = ComparisonContext::new();
        let root = DiffPath::root(root_label);
        self.compare(left, right, &root, &mut ctx, 0)?;
        Ok(ctx.into_result())
    }

    fn compare(
        &self,
        left: &Value,
        right: &Value,
        path: &DiffPath,
        ctx: &mut ComparisonContext,
        depth: usize,
    ) -> Result<()> {
        if depth > self.max_depth {
            return Err(FlverDiffError::diff(
                "graph deeper than the configured limit",
                DiffErrorKind::DepthLimitExceeded {
                    limit: self.max_depth,
                    path: path.as_str().to_owned(),
                },
            ));
        }

        // Absence first: null pairs with anything, including another null.
        match (left.is_null(), right.is_null()) {
            (true, true) => return Ok(()),
            (true, false) | (false, true) => {
                ctx.emit(path, left, right);
                return Ok(());
            }
            (false, false) => {}
        }

        // A type mismatch is terminal for the subtree: report the two type
        // names and do not descend into members that cannot correspond.
        if left.type_name() != right.type_name() {
            ctx.emit_raw(path, left.type_name(), right.type_name());
            return Ok(());
        }

        let Some(category) = classify(left) else {
            return Ok(()); // unreachable: nulls were handled above
        };

        match category {
            TypeCategory::Terminal | TypeCategory::ValueAggregate => {
                if left != right {
                    ctx.emit(path, left, right);
                }
                Ok(())
            }
            TypeCategory::Sequence => self.compare_sequences(left, right, path, ctx, depth),
            TypeCategory::ReferenceAggregate => {
                let (Value::Object(lo), Value::Object(ro)) = (left, right) else {
                    return Ok(());
                };
                self.compare_objects(lo, ro, path, ctx, depth)
            }
        }
    }

    /// Positional comparison: element `i` pairs with element `i`, and a
    /// count mismatch is one extra entry at `path.Length` that does not stop
    /// the element-wise walk.
    fn compare_sequences(
        &self,
        left: &Value,
        right: &Value,
        path: &DiffPath,
        ctx: &mut ComparisonContext,
        depth: usize,
    ) -> Result<()> {
        let (Value::Sequence(ls), Value::Sequence(rs)) = (left, right) else {
            return Ok(());
        };

        if ls.len() != rs.len() {
            ctx.emit(&path.child("Length"), left, right);
        }

        // zip stops at the shorter side: trailing elements of the longer
        // sequence are covered by the Length entry, not reported per index.
        for (i, (l, r)) in ls.iter().zip(rs.iter()).enumerate() {
            self.compare(l, r, &path.index(i), ctx, depth + 1)?;
        }
        Ok(())
    }

    fn compare_objects(
        &self,
        left: &ObjectRef,
        right: &ObjectRef,
        path: &DiffPath,
        ctx: &mut ComparisonContext,
        depth: usize,
    ) -> Result<()> {
        // Cycle guard: only the left identity is tracked; the right side is
        // assumed structurally parallel.
        if ctx.already_visited(left.id()) {
            return Ok(());
        }
        ctx.mark_visited(left.id());

        for (name, left_access) in left.members() {
            let member_path = path.child(name);

            let left_cell = match left_access {
                MemberAccess::Readable(cell) => cell,
                MemberAccess::WriteOnly | MemberAccess::Indexed => {
                    ctx.record_skip(&member_path);
                    continue;
                }
                MemberAccess::Denied => return Err(denied(&member_path)),
            };

            let Some(right_access) = right.member(name) else {
                // Parallel-shape violation: still content, not a failure.
                let left_value = left_cell.borrow();
                ctx.emit_raw(&member_path, left_value.to_string(), MISSING_MEMBER);
                continue;
            };

            let right_cell = match right_access {
                MemberAccess::Readable(cell) => cell,
                MemberAccess::WriteOnly | MemberAccess::Indexed => {
                    ctx.record_skip(&member_path);
                    continue;
                }
                MemberAccess::Denied => return Err(denied(&member_path)),
            };

            let left_value = left_cell.borrow();
            let right_value = right_cell.borrow();

            // Members holding nested structure recurse through the full
            // state machine (null handling and type mismatches included);
            // terminal and inline members compare by equality right here.
            if recurses(&left_value) || recurses(&right_value) {
                self.compare(&left_value, &right_value, &member_path, ctx, depth + 1)?;
            } else if *left_value != *right_value {
                ctx.emit(&member_path, &left_value, &right_value);
            }
        }
        Ok(())
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a member value routes through the recursive walk instead of
/// direct equality. Text is terminal despite being iterable.
fn recurses(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Sequence(_))
}

fn denied(path: &DiffPath) -> FlverDiffError {
    FlverDiffError::diff(
        "member access refused by the producing collaborator",
        DiffErrorKind::AccessDenied {
            path: path.as_str().to_owned(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InlineStruct, Object};

    fn diff(left: &Value, right: &Value) -> DiffResult {
        DiffEngine::new()
            .diff(left, right, "root")
            .expect("diff should succeed")
    }

    #[test]
    fn test_identical_graphs_yield_no_differences() {
        let make = || {
            Value::from(
                Object::builder("Mesh")
                    .property("Dynamic", true)
                    .property("Bounds", InlineStruct::vector3(1.0, 2.0, 3.0))
                    .property("Indices", Value::Sequence(vec![1i64.into(), 2i64.into()]))
                    .build(),
            )
        };
        assert!(diff(&make(), &make()).is_empty());
    }

    #[test]
    fn test_scalar_mismatch_is_one_root_difference() {
        let result = diff(&Value::from(1i64), &Value::from(2i64));
        assert_eq!(result.len(), 1);
        assert_eq!(result.differences[0].path, "root");
        assert_eq!(result.differences[0].left, "1");
        assert_eq!(result.differences[0].right, "2");
    }

    #[test]
    fn test_null_vs_value_reports_without_recursion() {
        let obj = Value::from(Object::builder("Node").property("x", 1i64).build());
        let result = diff(&Value::Null, &obj);
        assert_eq!(result.len(), 1);
        assert_eq!(result.differences[0].path, "root");
        assert_eq!(result.differences[0].left, "null");
        assert_eq!(result.differences[0].right, "Node");

        assert!(diff(&Value::Null, &Value::Null).is_empty());
    }

    #[test]
    fn test_type_mismatch_short_circuits() {
        let left = Value::from(Object::builder("Bone").property("x", 1i64).build());
        let right = Value::from(Object::builder("Mesh").property("x", 2i64).build());
        let result = diff(&left, &right);
        // Exactly one difference, no member recursion into x.
        assert_eq!(result.len(), 1);
        assert_eq!(result.differences[0].path, "root");
        assert_eq!(result.differences[0].left, "Bone");
        assert_eq!(result.differences[0].right, "Mesh");
    }

    #[test]
    fn test_sequence_length_mismatch_plus_pairwise() {
        let left = Value::Sequence(vec![1i64.into(), 2i64.into(), 3i64.into()]);
        let right = Value::Sequence(vec![1i64.into(), 9i64.into()]);
        let result = diff(&left, &right);

        assert_eq!(result.len(), 2);
        assert_eq!(result.differences[0].path, "root.Length");
        assert_eq!(result.differences[0].left, "[1, 2, 3]");
        assert_eq!(result.differences[0].right, "[1, 9]");
        // Index 1 differs; index 2 has no per-index entry.
        assert_eq!(result.differences[1].path, "root[1]");
        assert_eq!(result.differences[1].left, "2");
        assert_eq!(result.differences[1].right, "9");
    }

    #[test]
    fn test_inline_struct_compares_whole_value() {
        let left = Value::from(InlineStruct::vector3(1.0, 2.0, 3.0));
        let right = Value::from(InlineStruct::vector3(1.0, 2.0, 4.0));
        let result = diff(&left, &right);
        assert_eq!(result.len(), 1);
        assert_eq!(result.differences[0].path, "root");
        assert_eq!(result.differences[0].left, "Vector3(1, 2, 3)");
        assert_eq!(result.differences[0].right, "Vector3(1, 2, 4)");
    }

    #[test]
    fn test_nested_member_path_three_levels_deep() {
        let make = |z: f32| {
            let c = Object::builder("C")
                .property("Position", InlineStruct::vector3(0.0, 0.0, z))
                .build();
            let b = Object::builder("B").property("c", c).build();
            Value::from(Object::builder("A").property("b", b).build())
        };
        let result = diff(&make(0.0), &make(1.0));
        assert_eq!(result.len(), 1);
        assert_eq!(result.differences[0].path, "root.b.c.Position");
    }

    #[test]
    fn test_cyclic_self_reference_terminates() {
        let make = |flag: bool| {
            let node = Object::builder("Node")
                .property("Flag", flag)
                .property("Next", Value::Null)
                .build();
            node.set("Next", Value::Object(node.clone()));
            Value::from(node)
        };
        let result = diff(&make(true), &make(false));
        // One difference for Flag; the cyclic Next edge is visited once and
        // produces nothing further.
        assert_eq!(result.len(), 1);
        assert_eq!(result.differences[0].path, "root.Flag");
    }

    #[test]
    fn test_shared_substructure_compared_once() {
        // The same child is reachable through two members; the second path
        // is suppressed by the identity guard even though comparing it again
        // would re-report the difference. Pins the documented limitation.
        let make = |x: i64| {
            let shared = Object::builder("Child").property("x", x).build();
            Value::from(
                Object::builder("Parent")
                    .property("First", shared.clone())
                    .property("Second", shared)
                    .build(),
            )
        };
        let result = diff(&make(1), &make(2));
        assert_eq!(result.len(), 1);
        assert_eq!(result.differences[0].path, "root.First.x");
    }

    #[test]
    fn test_unreadable_members_skipped_and_recorded() {
        let make = |x: i64| {
            Value::from(
                Object::builder("Node")
                    .property("x", x)
                    .write_only("Cache")
                    .indexed("Item")
                    .build(),
            )
        };
        let result = diff(&make(1), &make(2));
        assert_eq!(result.len(), 1);
        assert_eq!(result.differences[0].path, "root.x");
        assert_eq!(result.skipped_members, vec!["root.Cache", "root.Item"]);
    }

    #[test]
    fn test_denied_member_is_an_error_not_a_difference() {
        let make = || Value::from(Object::builder("Node").denied("Secret").build());
        let err = DiffEngine::new()
            .diff(&make(), &make(), "root")
            .expect_err("denied access must surface");
        match err {
            FlverDiffError::Diff {
                source: DiffErrorKind::AccessDenied { path },
                ..
            } => assert_eq!(path, "root.Secret"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_member_null_vs_object_reports_at_member_path() {
        let make = |present: bool| {
            let child = if present {
                Value::from(Object::builder("Child").property("x", 1i64).build())
            } else {
                Value::Null
            };
            Value::from(Object::builder("Node").property("Child", child).build())
        };
        let result = diff(&make(false), &make(true));
        assert_eq!(result.len(), 1);
        assert_eq!(result.differences[0].path, "root.Child");
        assert_eq!(result.differences[0].left, "null");
    }

    #[test]
    fn test_missing_member_on_right_side() {
        let left = Value::from(
            Object::builder("Node")
                .property("x", 1i64)
                .property("Extra", 5i64)
                .build(),
        );
        let right = Value::from(Object::builder("Node").property("x", 1i64).build());
        let result = diff(&left, &right);
        assert_eq!(result.len(), 1);
        assert_eq!(result.differences[0].path, "root.Extra");
        assert_eq!(result.differences[0].right, MISSING_MEMBER);
    }

    #[test]
    fn test_depth_limit_surfaces_as_error() {
        let deep = |n: usize| {
            let mut v = Value::from(0i64);
            for _ in 0..n {
                v = Value::Sequence(vec![v]);
            }
            v
        };
        let engine = DiffEngine::new().with_max_depth(4);
        let err = engine
            .diff(&deep(10), &deep(10), "root")
            .expect_err("depth limit must trip");
        assert!(matches!(
            err,
            FlverDiffError::Diff {
                source: DiffErrorKind::DepthLimitExceeded { limit: 4, .. },
                ..
            }
        ));

        // Within the limit the same graph compares cleanly.
        let ok = engine.diff(&deep(3), &deep(3), "root").expect("shallow");
        assert!(ok.is_empty());
    }
}
