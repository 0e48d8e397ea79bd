//! Pipeline orchestration: read → checksum gate → parse → diff.
//!
//! Shared by the CLI handlers so the read/detect/pair logic lives in one
//! place and stays testable without a terminal.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::diff::{DiffEngine, DiffResult};
use crate::error::{FlverDiffError, Result};
use crate::model::Value;
use crate::parsers::{
    detect_format, is_flver_name, parse_bnd4, parse_flver, ArchiveEntry, ModelFormat,
};
use crate::utils::hash::sha256;

/// Exit codes for CI integration
pub mod exit_codes {
    /// Success; with `--fail-on-diff`, additionally means no differences
    pub const SUCCESS: i32 = 0;
    /// Differences were found and `--fail-on-diff` was set
    pub const DIFFERENCES_FOUND: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 2;
}

/// A parsed input artifact.
#[derive(Debug)]
pub enum Artifact {
    /// Standalone model graph
    Model(Value),
    /// Archive entry table; payloads are parsed on demand
    Archive(Vec<ArchiveEntry>),
}

/// Read and parse one artifact, for inspection.
pub fn load_artifact(path: &Path) -> Result<Artifact> {
    let bytes = read_file(path)?;
    match detect_format(&bytes)? {
        ModelFormat::Flver => Ok(Artifact::Model(parse_flver(&bytes)?)),
        ModelFormat::Bnd4 => Ok(Artifact::Archive(parse_bnd4(&bytes)?)),
    }
}

/// Compare two artifacts on disk and return the combined result.
///
/// Byte-identical files short-circuit to an empty result before any parsing.
/// Archives are compared entry-by-entry: FLVER-named entries are paired by
/// name and each pair is diffed under its entry stem as the root label.
pub fn compare_files(
    old: &Path,
    new: &Path,
    engine: &DiffEngine,
    root_label: Option<&str>,
) -> Result<DiffResult> {
    let old_bytes = read_file(old)?;
    let new_bytes = read_file(new)?;

    if sha256(&old_bytes) == sha256(&new_bytes) {
        tracing::info!("files are byte-identical; skipping structural comparison");
        return Ok(DiffResult::new());
    }

    let old_format = detect_format(&old_bytes)?;
    let new_format = detect_format(&new_bytes)?;
    if old_format != new_format {
        return Err(FlverDiffError::config(format!(
            "cannot compare a {} file against a {} file",
            old_format.name(),
            new_format.name()
        )));
    }

    match old_format {
        ModelFormat::Flver => {
            let label = root_label
                .map(ToOwned::to_owned)
                .unwrap_or_else(|| file_stem(old));
            let left = parse_flver(&old_bytes)?;
            let right = parse_flver(&new_bytes)?;
            engine.diff(&left, &right, &label)
        }
        ModelFormat::Bnd4 => {
            let old_entries = parse_bnd4(&old_bytes)?;
            let new_entries = parse_bnd4(&new_bytes)?;
            compare_archives(&old_entries, &new_entries, engine)
        }
    }
}

/// Diff every FLVER-named entry present in both archives, merged into one
/// result in old-archive order.
pub fn compare_archives(
    old_entries: &[ArchiveEntry],
    new_entries: &[ArchiveEntry],
    engine: &DiffEngine,
) -> Result<DiffResult> {
    let mut result = DiffResult::new();

    for entry in old_entries {
        if !is_flver_name(&entry.name) {
            continue;
        }
        let Some(other) = new_entries.iter().find(|e| e.name == entry.name) else {
            tracing::warn!("entry {} missing from the new archive", entry.name);
            continue;
        };
        let left = parse_flver(&entry.bytes)?;
        let right = parse_flver(&other.bytes)?;
        result.merge(engine.diff(&left, &right, entry.stem())?);
    }

    for entry in new_entries {
        if is_flver_name(&entry.name) && !old_entries.iter().any(|e| e.name == entry.name) {
            tracing::warn!("entry {} missing from the old archive", entry.name);
        }
    }

    Ok(result)
}

/// Where to send rendered output.
#[derive(Debug, Clone)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => OutputTarget::File(path),
            None => OutputTarget::Stdout,
        }
    }
}

/// Write a rendered report to its target.
pub fn write_output(target: &OutputTarget, content: &str) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(content.as_bytes())?;
            Ok(())
        }
        OutputTarget::File(path) => {
            fs::write(path, content).map_err(|e| FlverDiffError::io(path.clone(), e))?;
            tracing::info!("report written to {}", path.display());
            Ok(())
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| FlverDiffError::io(path, e))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("model")
        .to_owned()
}
