//! Comparison-strategy classification.

use crate::model::Value;

/// The comparison strategy that applies to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    /// Atomic value compared by equality: primitives, text, timestamps.
    Terminal,
    /// Plain-data composite compared by whole-value equality, no recursion.
    ValueAggregate,
    /// Ordered collection compared positionally, element by element.
    Sequence,
    /// Composite object with named members, compared by recursive walk.
    ReferenceAggregate,
}

/// Classify a value into its comparison strategy.
///
/// Returns `None` for null: absence is handled by the comparer before
/// classification ever happens, so null has no strategy of its own.
pub fn classify(value: &Value) -> Option<TypeCategory> {
    match value {
        Value::Null => None,
        Value::Terminal(_) => Some(TypeCategory::Terminal),
        Value::Inline(_) => Some(TypeCategory::ValueAggregate),
        Value::Sequence(_) => Some(TypeCategory::Sequence),
        Value::Object(_) => Some(TypeCategory::ReferenceAggregate),
    }
}
