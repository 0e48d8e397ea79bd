//! Structural diff engine for model graphs.
//!
//! The engine walks two [`Value`](crate::model::Value) graphs of
//! mutually-matching shape in lockstep, depth first, and reports every
//! differing leaf as a [`Difference`] located by a dot/bracket path from the
//! root. It has no knowledge of FLVER semantics: classification happens per
//! node at runtime, which is what lets one walk cover headers, bone tables
//! and arbitrarily nested collections alike.
//!
//! # Example
//!
//! ```
//! use flver_diff::{DiffEngine, Object, Value};
//!
//! let old = Object::builder("Bone").property("ParentIndex", -1i64).build();
//! let new = Object::builder("Bone").property("ParentIndex", 4i64).build();
//!
//! let result = DiffEngine::new()
//!     .diff(&Value::from(old), &Value::from(new), "c1234")
//!     .unwrap();
//! assert_eq!(result.len(), 1);
//! assert_eq!(result.differences[0].path, "c1234.ParentIndex");
//! ```

mod classify;
mod engine;
mod path;
mod result;
mod visit;

pub use classify::{classify, TypeCategory};
pub use engine::{DiffEngine, DEFAULT_MAX_DEPTH};
pub use path::DiffPath;
pub use result::{DiffResult, Difference, MISSING_MEMBER};
pub use visit::VisitedSet;
