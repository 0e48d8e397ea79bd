//! JSON report generator.

use serde::Serialize;

use super::{ReportError, ReportFormat, ReportGenerator, ReportMeta};
use crate::diff::{DiffResult, Difference};

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    meta: &'a ReportMeta,
    summary: JsonSummary,
    differences: &'a [Difference],
    skipped_members: &'a [String],
}

#[derive(Serialize)]
struct JsonSummary {
    identical: bool,
    difference_count: usize,
    skipped_member_count: usize,
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, result: &DiffResult, meta: &ReportMeta) -> Result<String, ReportError> {
        let document = JsonReport {
            meta,
            summary: JsonSummary {
                identical: result.is_empty(),
                difference_count: result.len(),
                skipped_member_count: result.skipped_members.len(),
            },
            differences: &result.differences,
            skipped_members: &result.skipped_members,
        };
        serde_json::to_string_pretty(&document)
            .map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
