//! In-memory representation of parsed model artifacts.
//!
//! Both supported input shapes (standalone FLVER files and models nested in
//! BND4 archives) are lowered to the same dynamic [`Value`] graph before
//! comparison, so the diff engine works against one representation
//! regardless of where the model came from.

mod object;
mod value;

pub use object::{MemberAccess, Object, ObjectBuilder, ObjectId, ObjectRef};
pub use value::{InlineStruct, Terminal, Value};
