//! NUMDIFF - numerically tolerant diff for text files and directory trees.
//!
//! Lines are split into tokens, and tokens that read as numbers are equal
//! when they differ by no more than an absolute plus a relative epsilon.
//! Everything else must match literally. Differences are reported as
//! context diffs.
//!
//! # Example
//!
//! ```no_run
//! use numdiff_rs::{format_comparison, ComparisonOptions, DiffConfig, Differ, OutputFormat, OutputOptions};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ComparisonOptions::default().with_comment("#").with_epsilons(1e-6, 1e-4)?;
//! let differ = Differ::new(options, DiffConfig::default())?;
//!
//! let comparison = differ.compare_paths(Path::new("run1.out"), Path::new("run2.out"), false)?;
//!
//! let output = format_comparison(&comparison, &OutputFormat::Plain, &OutputOptions::default())?;
//! print!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod align;
pub mod diff;
pub mod edit;
pub mod error;
pub mod filter;
pub mod line;
pub mod merge;
pub mod options;
pub mod output;
pub mod reader;
pub mod token;
pub mod tree;

// Re-export commonly used types for convenience
pub use diff::{compute_diff, Comparison, DiffConfig, DiffEvent, DiffStats, Differ, FileDiff};
pub use edit::{EditKind, EditList, EditOp, DEFAULT_MAX_CHUNK};
pub use error::{ConfigError, DiffError, NumdiffError, OutputError, ReadError};
pub use filter::ExcludeFilter;
pub use line::{Line, LineComparator};
pub use merge::{merge_sorted, PairEntry};
pub use options::{parse_columns, ComparisonOptions, SplitRule, DEFAULT_AEPS, DEFAULT_REPS};
pub use output::{format_comparison, OutputFormat, OutputOptions, DEFAULT_CONTEXT};
pub use reader::read_lines;
pub use token::tokens_equal;
pub use tree::{Entry, FileKind};
