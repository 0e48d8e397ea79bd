//! Configuration types assembled by the CLI and consumed by handlers.
//!
//! Grouped by concern so handlers can take one argument instead of a dozen;
//! all of these are plain data with no file-format behind them.

use std::path::PathBuf;

use crate::diff::DEFAULT_MAX_DEPTH;
use crate::reports::ReportFormat;

/// The two artifacts being compared.
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Old/baseline model or archive
    pub old: PathBuf,
    /// New model or archive
    pub new: PathBuf,
}

/// Where and how to emit the report.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub format: ReportFormat,
    /// Output file path; stdout when unset
    pub file: Option<PathBuf>,
}

/// Flags affecting process behavior.
#[derive(Debug, Clone, Default)]
pub struct BehaviorConfig {
    pub quiet: bool,
    /// Exit with a non-zero code when differences exist
    pub fail_on_diff: bool,
}

/// Engine tuning.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub max_depth: usize,
    /// Root path label override; defaults to the old file's stem
    pub root_label: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            root_label: None,
        }
    }
}

/// Full configuration for the `diff` command.
#[derive(Debug, Clone)]
pub struct DiffConfig {
    pub paths: DiffPaths,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
    pub engine: EngineConfig,
}

/// Configuration for the `inspect` command.
#[derive(Debug, Clone)]
pub struct InspectConfig {
    pub path: PathBuf,
    /// How many levels of the graph to print
    pub depth: usize,
}
