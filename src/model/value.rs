//! Dynamic value model for parsed model-file graphs.
//!
//! Parsers lower binary artifacts into [`Value`] graphs; the diff engine
//! walks those graphs without compile-time knowledge of their shape. Every
//! value carries a stable type name (used for type-mismatch detection) and a
//! safe textual rendering (used for report output).

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};

use super::object::ObjectRef;

/// Upper bound on sequence elements included in a rendering.
///
/// Length-mismatch entries render both sequences; a vertex table with tens of
/// thousands of entries must not turn one report row into megabytes.
pub(crate) const MAX_RENDERED_ITEMS: usize = 8;

/// An atomic, non-decomposable value.
#[derive(Debug, Clone)]
pub enum Terminal {
    Bool(bool),
    Int(i64),
    UInt(u64),
    /// Single-precision float, the native width of model-file fields.
    Float(f32),
    Double(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl Terminal {
    /// Stable name used for type-mismatch detection.
    pub fn type_name(&self) -> &'static str {
        match self {
            Terminal::Bool(_) => "Bool",
            Terminal::Int(_) => "Int",
            Terminal::UInt(_) => "UInt",
            Terminal::Float(_) => "Float",
            Terminal::Double(_) => "Double",
            Terminal::Text(_) => "Text",
            Terminal::Timestamp(_) => "Timestamp",
        }
    }
}

impl PartialEq for Terminal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Terminal::Bool(a), Terminal::Bool(b)) => a == b,
            (Terminal::Int(a), Terminal::Int(b)) => a == b,
            (Terminal::UInt(a), Terminal::UInt(b)) => a == b,
            // NaN compares equal to itself: unset float fields round-trip as
            // NaN on both sides and must not flag every record.
            (Terminal::Float(a), Terminal::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Terminal::Double(a), Terminal::Double(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Terminal::Text(a), Terminal::Text(b)) => a == b,
            (Terminal::Timestamp(a), Terminal::Timestamp(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Bool(v) => write!(f, "{v}"),
            Terminal::Int(v) => write!(f, "{v}"),
            Terminal::UInt(v) => write!(f, "{v}"),
            Terminal::Float(v) => write!(f, "{v}"),
            Terminal::Double(v) => write!(f, "{v}"),
            Terminal::Text(v) => write!(f, "{v}"),
            Terminal::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

/// A named plain-data composite compared by whole-value equality.
///
/// Vectors, colors and similar coordinate-like structs: they have components
/// but no identity, and the engine never recurses into them.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineStruct {
    type_name: Cow<'static, str>,
    components: Vec<Terminal>,
}

impl InlineStruct {
    pub fn new(type_name: impl Into<Cow<'static, str>>, components: Vec<Terminal>) -> Self {
        Self {
            type_name: type_name.into(),
            components,
        }
    }

    pub fn vector2(x: f32, y: f32) -> Self {
        Self::new("Vector2", vec![Terminal::Float(x), Terminal::Float(y)])
    }

    pub fn vector3(x: f32, y: f32, z: f32) -> Self {
        Self::new(
            "Vector3",
            vec![Terminal::Float(x), Terminal::Float(y), Terminal::Float(z)],
        )
    }

    pub fn vector4(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self::new(
            "Vector4",
            vec![
                Terminal::Float(x),
                Terminal::Float(y),
                Terminal::Float(z),
                Terminal::Float(w),
            ],
        )
    }

    /// Color with 8-bit channels, stored in RGBA order.
    pub fn color_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            "Color",
            vec![
                Terminal::UInt(u64::from(r)),
                Terminal::UInt(u64::from(g)),
                Terminal::UInt(u64::from(b)),
                Terminal::UInt(u64::from(a)),
            ],
        )
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn components(&self) -> &[Terminal] {
        &self.components
    }
}

impl fmt::Display for InlineStruct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name)?;
        for (i, c) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

/// One node of a model graph.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absent value; renders as the stable placeholder `null`.
    Null,
    Terminal(Terminal),
    Inline(InlineStruct),
    /// Ordered collection; compared positionally, never as a set.
    Sequence(Vec<Value>),
    /// Reference aggregate with identity; see [`ObjectRef`].
    Object(ObjectRef),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Stable name used for type-mismatch detection. Two values with
    /// different type names are never compared member-by-member.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "Null",
            Value::Terminal(t) => t.type_name(),
            Value::Inline(s) => s.type_name(),
            Value::Sequence(_) => "Sequence",
            Value::Object(o) => o.type_name(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Terminal(a), Value::Terminal(b)) => a == b,
            (Value::Inline(a), Value::Inline(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            // Reference aggregates compare by identity, not structure; the
            // engine recurses into them instead of relying on this.
            (Value::Object(a), Value::Object(b)) => ObjectRef::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Terminal(t) => write!(f, "{t}"),
            Value::Inline(s) => write!(f, "{s}"),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().take(MAX_RENDERED_ITEMS).enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if items.len() > MAX_RENDERED_ITEMS {
                    write!(f, ", … (+{} more)", items.len() - MAX_RENDERED_ITEMS)?;
                }
                write!(f, "]")
            }
            Value::Object(o) => write!(f, "{}", o.type_name()),
        }
    }
}

impl From<Terminal> for Value {
    fn from(t: Terminal) -> Self {
        Value::Terminal(t)
    }
}

impl From<InlineStruct> for Value {
    fn from(s: InlineStruct) -> Self {
        Value::Inline(s)
    }
}

impl From<ObjectRef> for Value {
    fn from(o: ObjectRef) -> Self {
        Value::Object(o)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Terminal(Terminal::Bool(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Terminal(Terminal::Int(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Terminal(Terminal::Int(i64::from(v)))
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Terminal(Terminal::Int(i64::from(v)))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Terminal(Terminal::UInt(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Terminal(Terminal::UInt(u64::from(v)))
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Terminal(Terminal::UInt(u64::from(v)))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Terminal(Terminal::Float(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Terminal(Terminal::Double(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Terminal(Terminal::Text(v.to_owned()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Terminal(Terminal::Text(v))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Terminal(Terminal::Timestamp(v))
    }
}
