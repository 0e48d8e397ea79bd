//! flver-diff: structural diff tool for FLVER model files
//!
//! Compares the final result of different FLVER import/export tools by
//! crawling both model graphs and reporting a table of differences.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use flver_diff::{
    cli,
    config::{BehaviorConfig, DiffConfig, DiffPaths, EngineConfig, InspectConfig, OutputConfig},
    diff::DEFAULT_MAX_DEPTH,
    pipeline::exit_codes,
    reports::ReportFormat,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flver-diff")]
#[command(version)]
#[command(about = "Structural diff tool for FLVER model files", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success (or no differences with --fail-on-diff)
    1  Differences found (--fail-on-diff)
    2  Error occurred

EXAMPLES:
    # Quick diff with terminal output
    flver-diff diff old/c1234.flver new/c1234.flver

    # HTML report for sharing
    flver-diff diff old/c1234.flver new/c1234.flver -o html -O report.html

    # Compare every model inside two binder archives
    flver-diff diff old/c1234.chrbnd new/c1234.chrbnd

    # CI gate: non-zero exit when the exporters disagree
    flver-diff diff expected.flver actual.flver --fail-on-diff -o json

    # Look at what a file parses into
    flver-diff inspect c1234.flver --depth 2")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the old/baseline model or archive
    old: PathBuf,

    /// Path to the new model or archive
    new: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "summary")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Root path label for reported differences (defaults to the old file's
    /// name; archives always use each entry's name)
    #[arg(long)]
    root_label: Option<String>,

    /// Recursion depth limit for the graph walk
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Exit with code 1 when any difference is found
    #[arg(long)]
    fail_on_diff: bool,
}

/// Arguments for the `inspect` subcommand
#[derive(Parser)]
struct InspectArgs {
    /// Path to the model or archive
    file: PathBuf,

    /// How many levels of the graph to print
    #[arg(long, default_value = "3")]
    depth: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two model files or archives
    Diff(DiffArgs),

    /// Print the structural outline of one model file or archive
    Inspect(InspectArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Cli) -> Result<i32> {
    let quiet = args.quiet;
    match args.command {
        Commands::Diff(diff_args) => cli::run_diff(DiffConfig {
            paths: DiffPaths {
                old: diff_args.old,
                new: diff_args.new,
            },
            output: OutputConfig {
                format: diff_args.output,
                file: diff_args.output_file,
            },
            behavior: BehaviorConfig {
                quiet,
                fail_on_diff: diff_args.fail_on_diff,
            },
            engine: EngineConfig {
                max_depth: diff_args.max_depth,
                root_label: diff_args.root_label,
            },
        }),
        Commands::Inspect(inspect_args) => cli::run_inspect(InspectConfig {
            path: inspect_args.file,
            depth: inspect_args.depth,
        }),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "flver-diff", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn main() {
    let args = Cli::parse();
    init_logging(args.verbose, args.quiet);

    let code = match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}
