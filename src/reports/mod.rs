//! Report generation for diff results.
//!
//! Three output formats over the same difference list:
//! - Summary: compact shell-friendly text
//! - JSON: structured data for programmatic integration
//! - HTML: standalone report for sharing with other modders
//!
//! Renderers never need type-specific logic: every difference arrives as
//! rendered text with `null` as a stable placeholder, so a reporter's only
//! jobs are layout and escaping.

pub mod escape;
mod html;
mod json;
mod summary;

pub use html::HtmlReporter;
pub use json::JsonReporter;
pub use summary::SummaryReporter;

use std::io::Write;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;

use crate::diff::DiffResult;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    /// Brief shell-friendly output
    #[default]
    Summary,
    /// Structured JSON output
    Json,
    /// Standalone HTML report
    Html,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Summary => write!(f, "summary"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Html => write!(f, "html"),
        }
    }
}

/// Metadata rendered alongside the difference list.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    /// Display name of the old artifact
    pub left: String,
    /// Display name of the new artifact
    pub right: String,
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
}

impl ReportMeta {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report from a diff result
    fn generate(&self, result: &DiffResult, meta: &ReportMeta) -> Result<String, ReportError>;

    /// Write a report to a writer
    fn write_report(
        &self,
        result: &DiffResult,
        meta: &ReportMeta,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate(result, meta)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Construct the reporter for a format.
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => Box::new(SummaryReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
    }
}
