//! NUMDIFF command-line interface.
//!
//! Parses arguments with clap, builds the comparison options and hands the
//! two paths to the library.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use numdiff_rs::{
    format_comparison, parse_columns, ComparisonOptions, DiffConfig, Differ, ExcludeFilter,
    OutputFormat, OutputOptions, DEFAULT_AEPS, DEFAULT_CONTEXT, DEFAULT_MAX_CHUNK, DEFAULT_REPS,
};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// NUMDIFF - Compare two text files taking into account numerical errors
///
/// Numbers that differ by no more than AEPS + REPS * |value in FILE2| are
/// considered equal. All other text must match.
#[derive(Parser)]
#[command(name = "numdiff")]
#[command(version)]
#[command(about = "Compare text files taking into account numerical errors", long_about = None)]
struct Cli {
    /// First file (or directory with --recursive)
    #[arg(value_name = "FILE1")]
    file1: PathBuf,

    /// Second file; if a directory, FILE1's name inside it is used
    #[arg(value_name = "FILE2")]
    file2: PathBuf,

    /// Ignore lines starting with this marker
    #[arg(short = 'c', long, value_name = "STR")]
    comment_char: Option<String>,

    /// Absolute error to be accepted in numerical values
    #[arg(short = 'a', long, default_value_t = DEFAULT_AEPS, value_name = "AEPS")]
    aeps: f64,

    /// Relative error to be accepted in numerical values
    #[arg(short = 'e', long, default_value_t = DEFAULT_REPS, value_name = "REPS")]
    reps: f64,

    /// Output NUM lines of copied context
    #[arg(short = 'C', long, default_value_t = DEFAULT_CONTEXT, value_name = "NUM")]
    context: usize,

    /// Ignore changes in the amount of white space
    #[arg(short = 'b', long)]
    ignore_space_change: bool,

    /// Regular expression separating the tokens of a line
    #[arg(short = 's', long, value_name = "RE")]
    splitre: Option<String>,

    /// Fixed column end offsets, e.g. 8,24,40,56,72,80
    #[arg(long, value_name = "LIST")]
    columns: Option<String>,

    /// Recursively compare subdirectories
    #[arg(short = 'r', long)]
    recursive: bool,

    /// Skip entries whose name matches this glob (repeatable)
    #[arg(short = 'x', long, value_name = "PAT")]
    exclude: Vec<String>,

    /// Ignore lines matching this regular expression (repeatable)
    #[arg(short = 'I', long, value_name = "RE")]
    ignore_matching_lines: Vec<String>,

    /// Treat two lines as equal when both match this regular expression
    #[arg(long, value_name = "RE")]
    ignore_paired: Option<String>,

    /// Largest replace block re-compared at once (0 disables chunking)
    #[arg(long, default_value_t = DEFAULT_MAX_CHUNK, value_name = "N")]
    max_chunk: usize,

    /// Output only whether files differ
    #[arg(short = 'q', long)]
    brief: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "plain")]
    format: OutputFormatArg,

    /// Trace why lines are considered different (to stderr)
    #[arg(short, long)]
    verbose: bool,
}

/// Output format argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Colored terminal output with a summary
    Terminal,
    /// JSON representation
    Json,
    /// Plain context diff (no colors)
    Plain,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Plain => OutputFormat::Plain,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

/// Logs go to stderr so they never mix with the diff. `RUST_LOG` overrides
/// the level picked from `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn build_options(cli: &Cli) -> Result<ComparisonOptions> {
    let mut options = ComparisonOptions::default()
        .with_epsilons(cli.aeps, cli.reps)?
        .with_ignore_space_change(cli.ignore_space_change)
        .with_ignore_matching_lines(&cli.ignore_matching_lines)?
        .with_verbose(cli.verbose);

    if let Some(marker) = &cli.comment_char {
        options = options.with_comment(marker.as_str());
    }
    if let Some(list) = &cli.columns {
        options = options.with_columns(parse_columns(list)?);
    }
    if let Some(pattern) = &cli.splitre {
        options = options.with_split_pattern(pattern)?;
    }
    if let Some(pattern) = &cli.ignore_paired {
        options = options.with_ignore(pattern)?;
    }

    Ok(options)
}

fn run(cli: Cli) -> Result<i32> {
    let options = build_options(&cli).context("Invalid comparison options")?;
    let config = DiffConfig {
        max_chunk: NonZeroUsize::new(cli.max_chunk),
        exclude: ExcludeFilter::from_patterns(&cli.exclude)
            .context("Invalid exclude pattern")?,
    };

    debug!(
        file1 = %cli.file1.display(),
        file2 = %cli.file2.display(),
        recursive = cli.recursive,
        "Starting comparison"
    );

    let differ = Differ::new(options, config)?;
    let comparison = differ
        .compare_paths(&cli.file1, &cli.file2, cli.recursive)
        .with_context(|| {
            format!(
                "Failed to compare {} and {}",
                cli.file1.display(),
                cli.file2.display()
            )
        })?;

    let output_options = OutputOptions {
        context_lines: cli.context,
        brief: cli.brief,
    };

    let output_format: OutputFormat = cli.format.into();
    let output = format_comparison(&comparison, &output_format, &output_options)
        .context("Failed to format diff output")?;

    if output_format == OutputFormat::Json {
        println!("{}", output);
    } else {
        print!("{}", output);
    }

    if comparison.has_differences() {
        Ok(1)
    } else {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_conversion() {
        assert_eq!(
            OutputFormat::from(OutputFormatArg::Terminal),
            OutputFormat::Terminal
        );
        assert_eq!(
            OutputFormat::from(OutputFormatArg::Json),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::from(OutputFormatArg::Plain),
            OutputFormat::Plain
        );
    }

    #[test]
    fn test_build_options_from_flags() {
        let cli = Cli::parse_from([
            "numdiff", "-c", "#", "-a", "0.001", "--columns", "4,8", "-I", "^date", "a", "b",
        ]);
        let options = build_options(&cli).unwrap();
        assert_eq!(options.aeps, 0.001);
        assert_eq!(options.comment.as_deref(), Some("#"));
        assert!(options.is_skipped("date: now"));
        assert!(matches!(options.split, numdiff_rs::SplitRule::Columns(_)));
    }

    #[test]
    fn test_build_options_rejects_bad_regex() {
        let cli = Cli::parse_from(["numdiff", "--splitre", "(", "a", "b"]);
        assert!(build_options(&cli).is_err());
    }
}
