//! Reference-aggregate nodes: named, ordered members behind a shared handle.
//!
//! An [`Object`] is the graph's composite node type. Members live in two
//! declaration-ordered groups, accessor-backed properties first and plain
//! data fields second; the diff engine enumerates them in exactly that order
//! on both sides of a comparison, so parsers must build both graphs with the
//! same member layout for a given type name.

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::value::Value;

/// Identity token for a reference aggregate: "this exact instance",
/// independent of its field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

/// How a member can be accessed.
///
/// Skipping unreadable members is a named policy, not an incidental side
/// effect: the engine records every skipped path so tests can assert exactly
/// which members were left out of a comparison.
#[derive(Debug)]
pub enum MemberAccess {
    /// Plain readable slot. Interior mutability allows cyclic graphs to be
    /// wired up after construction; the engine only ever borrows shared.
    Readable(RefCell<Value>),
    /// Write-only member; its value cannot be read generically.
    WriteOnly,
    /// Indexer-style accessor that requires arguments to read.
    Indexed,
    /// The producing collaborator refused access. Surfaced to the caller as
    /// a setup error, never reported as a content difference.
    Denied,
}

/// A composite node with named members and identity.
#[derive(Debug)]
pub struct Object {
    type_name: Cow<'static, str>,
    properties: IndexMap<String, MemberAccess>,
    fields: IndexMap<String, MemberAccess>,
}

impl Object {
    pub fn builder(type_name: impl Into<Cow<'static, str>>) -> ObjectBuilder {
        ObjectBuilder {
            type_name: type_name.into(),
            properties: IndexMap::new(),
            fields: IndexMap::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Members in canonical enumeration order: properties in declaration
    /// order, then fields in declaration order.
    pub fn members(&self) -> impl Iterator<Item = (&str, &MemberAccess)> {
        self.properties
            .iter()
            .chain(self.fields.iter())
            .map(|(name, access)| (name.as_str(), access))
    }

    /// Look up a member by name, properties before fields.
    pub fn member(&self, name: &str) -> Option<&MemberAccess> {
        self.properties.get(name).or_else(|| self.fields.get(name))
    }

    pub fn member_count(&self) -> usize {
        self.properties.len() + self.fields.len()
    }

    /// Replace the value of a readable member. Returns `false` when the
    /// member does not exist or is not readable. Used to wire up cyclic or
    /// shared references after construction.
    pub fn set(&self, name: &str, value: Value) -> bool {
        match self.member(name) {
            Some(MemberAccess::Readable(cell)) => {
                *cell.borrow_mut() = value;
                true
            }
            _ => false,
        }
    }
}

/// Shared handle to an [`Object`]. Cloning shares identity; two handles are
/// the same instance iff they point at the same allocation.
#[derive(Debug, Clone)]
pub struct ObjectRef(Rc<Object>);

impl ObjectRef {
    /// Identity token for cycle tracking, scoped to this process.
    pub fn id(&self) -> ObjectId {
        ObjectId(Rc::as_ptr(&self.0) as usize)
    }

    pub fn ptr_eq(a: &ObjectRef, b: &ObjectRef) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl std::ops::Deref for ObjectRef {
    type Target = Object;

    fn deref(&self) -> &Object {
        &self.0
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Incremental construction of an [`Object`].
#[derive(Debug)]
pub struct ObjectBuilder {
    type_name: Cow<'static, str>,
    properties: IndexMap<String, MemberAccess>,
    fields: IndexMap<String, MemberAccess>,
}

impl ObjectBuilder {
    /// Add a readable property. Insertion order is declaration order.
    pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .insert(name.into(), MemberAccess::Readable(RefCell::new(value.into())));
        self
    }

    /// Add a readable plain data field. Fields enumerate after all properties.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields
            .insert(name.into(), MemberAccess::Readable(RefCell::new(value.into())));
        self
    }

    /// Add a write-only property; the engine skips it.
    pub fn write_only(mut self, name: impl Into<String>) -> Self {
        self.properties.insert(name.into(), MemberAccess::WriteOnly);
        self
    }

    /// Add an indexer-style property; the engine skips it.
    pub fn indexed(mut self, name: impl Into<String>) -> Self {
        self.properties.insert(name.into(), MemberAccess::Indexed);
        self
    }

    /// Add a property whose value the producer refuses to expose; reading it
    /// during a comparison is a setup error.
    pub fn denied(mut self, name: impl Into<String>) -> Self {
        self.properties.insert(name.into(), MemberAccess::Denied);
        self
    }

    pub fn build(self) -> ObjectRef {
        ObjectRef(Rc::new(Object {
            type_name: self.type_name,
            properties: self.properties,
            fields: self.fields,
        }))
    }
}
