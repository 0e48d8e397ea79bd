//! **Structural diff for FLVER model files.**
//!
//! `flver-diff` compares the final output of different FLVER import and
//! export tools. It parses two model files (or BND4 archives of models) into
//! in-memory object graphs, walks both graphs in lockstep, and reports every
//! differing value with a human-readable path from the model root, so that
//! "these two exporters disagree" becomes `c1234.Bones[3].Translation:
//! Vector3(0.1, 0, 0) -> Vector3(0.2, 0, 0)` instead of a binary blob diff.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the dynamic [`Value`] graph every parser produces.
//!   Values classify at runtime into terminals, value aggregates
//!   (vectors/colors), sequences and reference aggregates with named
//!   members, which is what lets one engine compare arbitrary model shapes.
//! - **[`diff`]**: the [`DiffEngine`]. Lockstep depth-first walk, identity
//!   based cycle guard, deterministic member ordering, ordered
//!   [`Difference`] output.
//! - **[`parsers`]**: FLVER2 and BND4 readers producing [`Value`] graphs.
//! - **[`reports`]**: summary, JSON and HTML renderers over one difference
//!   list.
//! - **[`pipeline`]**: read → checksum short-circuit → parse → diff
//!   orchestration shared by the CLI handlers.
//!
//! ## Diffing two models
//!
//! ```no_run
//! use std::path::Path;
//! use flver_diff::{compare_files, DiffEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = DiffEngine::new();
//!     let result = compare_files(
//!         Path::new("old/c1234.flver"),
//!         Path::new("new/c1234.flver"),
//!         &engine,
//!         None,
//!     )?;
//!
//!     for difference in &result {
//!         println!("{}: {} -> {}", difference.path, difference.left, difference.right);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Diffing graphs you build yourself
//!
//! The engine has no FLVER knowledge; any producer of [`Value`] graphs can
//! use it directly.
//!
//! ```
//! use flver_diff::{DiffEngine, Object, Value};
//!
//! let old = Object::builder("Material").property("Mtd", "p_metal.mtd").build();
//! let new = Object::builder("Material").property("Mtd", "p_cloth.mtd").build();
//!
//! let result = DiffEngine::new()
//!     .diff(&Value::from(old), &Value::from(new), "weapon")
//!     .expect("no denied members in these graphs");
//! assert_eq!(result.differences[0].path, "weapon.Mtd");
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Casts between integer widths are pervasive in binary parsing; every
    // offset is bounds-checked before use
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    // # Errors / # Panics doc sections are aspirational here
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // `old`/`new` and `min`/`max` pairs are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;
pub mod utils;

// Re-export main types for convenience
pub use config::{BehaviorConfig, DiffConfig, DiffPaths, EngineConfig, InspectConfig, OutputConfig};
pub use diff::{classify, DiffEngine, DiffPath, DiffResult, Difference, TypeCategory, VisitedSet};
pub use error::{DiffErrorKind, FlverDiffError, ParseErrorKind, Result};
pub use model::{InlineStruct, MemberAccess, Object, ObjectBuilder, ObjectId, ObjectRef, Terminal, Value};
pub use parsers::{detect_format, parse_bnd4, parse_flver, parse_model, ArchiveEntry, ModelFormat};
pub use pipeline::{compare_files, load_artifact, Artifact};
pub use reports::{reporter_for, ReportFormat, ReportGenerator, ReportMeta};
