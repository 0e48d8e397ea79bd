//! Diff command handler.

use anyhow::{bail, Context, Result};

use crate::config::DiffConfig;
use crate::diff::DiffEngine;
use crate::pipeline::{compare_files, exit_codes, write_output, OutputTarget};
use crate::reports::{reporter_for, ReportMeta};

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for `std::process::exit()` with the returned
/// code; nothing here terminates the process.
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    // Explicit existence checks give a friendlier message than a raw read
    // error when someone mistypes one of the two paths.
    if !config.paths.old.exists() {
        bail!("old file {} does not exist", config.paths.old.display());
    }
    if !config.paths.new.exists() {
        bail!("new file {} does not exist", config.paths.new.display());
    }

    let engine = DiffEngine::new().with_max_depth(config.engine.max_depth);
    let result = compare_files(
        &config.paths.old,
        &config.paths.new,
        &engine,
        config.engine.root_label.as_deref(),
    )
    .context("comparing model files")?;

    if !config.behavior.quiet {
        tracing::info!("found {} difference(s)", result.len());
    }

    let meta = ReportMeta::new(
        config.paths.old.display().to_string(),
        config.paths.new.display().to_string(),
    );
    let report = reporter_for(config.output.format)
        .generate(&result, &meta)
        .context("rendering report")?;

    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&target, &report).context("writing report")?;

    Ok(determine_exit_code(&config, result.has_differences()))
}

/// Exit code from behavior flags and the comparison outcome.
const fn determine_exit_code(config: &DiffConfig, has_differences: bool) -> i32 {
    if config.behavior.fail_on_diff && has_differences {
        return exit_codes::DIFFERENCES_FOUND;
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BehaviorConfig, DiffPaths, EngineConfig, OutputConfig};
    use std::path::PathBuf;

    fn config(fail_on_diff: bool) -> DiffConfig {
        DiffConfig {
            paths: DiffPaths {
                old: PathBuf::from("old.flver"),
                new: PathBuf::from("new.flver"),
            },
            output: OutputConfig::default(),
            behavior: BehaviorConfig {
                quiet: false,
                fail_on_diff,
            },
            engine: EngineConfig::default(),
        }
    }

    #[test]
    fn test_exit_code_policy() {
        assert_eq!(determine_exit_code(&config(false), true), exit_codes::SUCCESS);
        assert_eq!(determine_exit_code(&config(false), false), exit_codes::SUCCESS);
        assert_eq!(
            determine_exit_code(&config(true), true),
            exit_codes::DIFFERENCES_FOUND
        );
        assert_eq!(determine_exit_code(&config(true), false), exit_codes::SUCCESS);
    }

    #[test]
    fn test_missing_file_is_a_friendly_error() {
        let err = run_diff(config(false)).expect_err("missing files must fail");
        assert!(err.to_string().contains("does not exist"));
    }
}
