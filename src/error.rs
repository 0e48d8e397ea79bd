//! Unified error types for flver-diff.
//!
//! Structural mismatches between two models are never errors: they are the
//! product. Errors cover everything that prevents producing that product:
//! unreadable input, refused member access, resource guards, report output.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for flver-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FlverDiffError {
    /// Errors while parsing a model file or archive
    #[error("Failed to parse model data: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors during diff computation
    #[error("Diff computation failed: {context}")]
    Diff {
        context: String,
        #[source]
        source: DiffErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: crate::reports::ReportError,
    },

    /// IO errors with path context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("unrecognized format - expected FLVER or BND4 magic bytes")]
    UnknownFormat,

    #[error("bad magic: expected {expected:?}, found {found:?}")]
    BadMagic { expected: String, found: String },

    #[error("unexpected end of data: needed {needed} bytes at offset {offset:#x}")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("unsupported format version {version:#x}")]
    UnsupportedVersion { version: u32 },

    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("DCX-compressed archive - decompress it before diffing")]
    CompressedArchive,
}

/// Specific diff error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DiffErrorKind {
    /// Member access refused by the producing collaborator. A setup
    /// problem, deliberately distinct from a content difference: swallowing
    /// it would silently under-report.
    #[error("access denied reading member at {path}")]
    AccessDenied { path: String },

    #[error("recursion depth limit {limit} exceeded at {path}")]
    DepthLimitExceeded { limit: usize, path: String },
}

/// Convenient Result type for flver-diff operations
pub type Result<T> = std::result::Result<T, FlverDiffError>;

impl FlverDiffError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a diff error with context
    pub fn diff(context: impl Into<String>, source: DiffErrorKind) -> Self {
        Self::Diff {
            context: context.into(),
            source,
        }
    }

    /// Create a report error with context
    pub fn report(context: impl Into<String>, source: crate::reports::ReportError) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<std::io::Error> for FlverDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}
