//! Parsers turning binary artifacts into in-memory graphs.
//!
//! Format detection is magic-byte based; file extensions are only a
//! pre-flight hint for CLI messages. DCX-compressed archives are recognized
//! and rejected explicitly, since silently mis-parsing compressed bytes would be
//! worse than a clear error.

mod bnd4;
mod flver;
mod reader;

pub use bnd4::{parse_bnd4, ArchiveEntry};
pub use flver::parse_flver;

use std::path::Path;

use crate::error::{FlverDiffError, ParseErrorKind, Result};
use crate::model::Value;

const DCX_MAGIC: &[u8] = b"DCX\0";

/// Artifact kind identified from magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// Standalone FLVER model
    Flver,
    /// BND4 archive, possibly containing several models
    Bnd4,
}

impl ModelFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ModelFormat::Flver => "FLVER",
            ModelFormat::Bnd4 => "BND4",
        }
    }
}

/// Detect the artifact format from its leading magic bytes.
pub fn detect_format(bytes: &[u8]) -> Result<ModelFormat> {
    if bytes.starts_with(flver::FLVER_MAGIC) {
        Ok(ModelFormat::Flver)
    } else if bytes.starts_with(bnd4::BND4_MAGIC) {
        Ok(ModelFormat::Bnd4)
    } else if bytes.starts_with(DCX_MAGIC) {
        Err(FlverDiffError::parse(
            "format detection",
            ParseErrorKind::CompressedArchive,
        ))
    } else {
        Err(FlverDiffError::parse(
            "format detection",
            ParseErrorKind::UnknownFormat,
        ))
    }
}

/// Parse a standalone model file.
///
/// Callers holding an archive should iterate its entries via [`parse_bnd4`]
/// and feed FLVER-named payloads through here.
pub fn parse_model(bytes: &[u8]) -> Result<Value> {
    match detect_format(bytes)? {
        ModelFormat::Flver => parse_flver(bytes),
        ModelFormat::Bnd4 => Err(FlverDiffError::config(
            "expected a standalone model but found a BND4 archive",
        )),
    }
}

/// Whether a path or archive-entry name looks like a FLVER model.
pub fn is_flver_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".flver") || lower.ends_with(".flv") || lower.ends_with(".flv.bak")
}

/// Whether a path looks like an archive container.
pub fn is_archive_path(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let lower = name.to_ascii_lowercase();
    // Binder names carry purpose-specific extensions: .chrbnd, .partsbnd, …
    lower.ends_with("bnd") || lower.ends_with(".dcx") || lower.ends_with(".dcx.bak")
}
