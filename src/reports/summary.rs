//! Compact shell-friendly summary output.

use std::fmt::Write;

use super::{ReportError, ReportFormat, ReportGenerator, ReportMeta};
use crate::diff::DiffResult;

/// Longest rendered value included per side before truncation.
const MAX_VALUE_WIDTH: usize = 60;

/// Summary report generator
pub struct SummaryReporter;

impl SummaryReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, result: &DiffResult, meta: &ReportMeta) -> Result<String, ReportError> {
        let mut out = String::new();

        if result.is_empty() {
            writeln!(out, "{} vs {}: no differences", meta.left, meta.right)?;
        } else {
            writeln!(
                out,
                "{} vs {}: {} difference(s)",
                meta.left,
                meta.right,
                result.len()
            )?;
            for difference in result {
                writeln!(
                    out,
                    "  {}: {} -> {}",
                    difference.path,
                    truncate(&difference.left),
                    truncate(&difference.right)
                )?;
            }
        }

        if !result.skipped_members.is_empty() {
            writeln!(
                out,
                "  ({} unreadable member(s) skipped)",
                result.skipped_members.len()
            )?;
        }
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_VALUE_WIDTH {
        return value.to_owned();
    }
    let kept: String = value.chars().take(MAX_VALUE_WIDTH - 1).collect();
    format!("{kept}…")
}
