//! Comparison options.
//!
//! [`ComparisonOptions`] is built once per run and shared read-only by the
//! reader, the line comparator and the aligner. Patterns are compiled when
//! the options are built, so a bad regular expression is reported before any
//! file is read.
//!
//! # Examples
//!
//! ```
//! use numdiff_rs::options::{ComparisonOptions, SplitRule};
//!
//! let options = ComparisonOptions::default()
//!     .with_epsilons(1e-6, 1e-4)
//!     .unwrap()
//!     .with_columns(vec![8, 24, 40]);
//!
//! assert!(matches!(options.split, SplitRule::Columns(_)));
//! ```

use crate::error::ConfigError;
use regex::Regex;

/// Default absolute epsilon.
pub const DEFAULT_AEPS: f64 = 1e-8;
/// Default relative epsilon.
pub const DEFAULT_REPS: f64 = 1e-5;
/// Default token separator: a comma with optional spaces, or a run of spaces.
pub const DEFAULT_SPLIT_PATTERN: &str = r" *, *| +";

/// How a line is cut into tokens.
#[derive(Debug, Clone, Default)]
pub enum SplitRule {
    /// Split on [`DEFAULT_SPLIT_PATTERN`]
    #[default]
    Default,
    /// Split on a user supplied regular expression
    Pattern(Regex),
    /// Slice the raw line at ascending end offsets (in characters)
    Columns(Vec<usize>),
}

/// Options shared by every stage of a comparison.
#[derive(Debug, Clone)]
pub struct ComparisonOptions {
    /// Lines whose stripped text starts with this marker are dropped
    pub comment: Option<String>,
    /// Absolute tolerance for numeric tokens
    pub aeps: f64,
    /// Relative tolerance for numeric tokens, scaled by the second operand
    pub reps: f64,
    /// Token split rule
    pub split: SplitRule,
    /// Collapse whitespace runs in lines and trim tokens before comparing
    pub ignore_space_change: bool,
    /// Two lines that both match this pattern are equal
    pub ignore: Option<Regex>,
    /// Lines matching this pattern are dropped by the reader
    pub ignore_matching_lines: Option<Regex>,
    /// Trace why lines were judged different
    pub verbose: bool,
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            comment: None,
            aeps: DEFAULT_AEPS,
            reps: DEFAULT_REPS,
            split: SplitRule::Default,
            ignore_space_change: false,
            ignore: None,
            ignore_matching_lines: None,
            verbose: false,
        }
    }
}

impl ComparisonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comment(mut self, marker: impl Into<String>) -> Self {
        let marker = marker.into();
        self.comment = if marker.is_empty() { None } else { Some(marker) };
        self
    }

    /// Sets both tolerances.
    ///
    /// # Errors
    ///
    /// Fails when either value is negative, NaN or infinite.
    pub fn with_epsilons(mut self, aeps: f64, reps: f64) -> Result<Self, ConfigError> {
        check_epsilon("aeps", aeps)?;
        check_epsilon("reps", reps)?;
        self.aeps = aeps;
        self.reps = reps;
        Ok(self)
    }

    /// Uses a custom token separator. Fixed columns, when already set, keep
    /// precedence.
    pub fn with_split_pattern(mut self, pattern: &str) -> Result<Self, ConfigError> {
        let regex = compile(pattern)?;
        if !matches!(self.split, SplitRule::Columns(_)) {
            self.split = SplitRule::Pattern(regex);
        }
        Ok(self)
    }

    pub fn with_columns(mut self, columns: Vec<usize>) -> Self {
        self.split = SplitRule::Columns(columns);
        self
    }

    pub fn with_ignore_space_change(mut self, enabled: bool) -> Self {
        self.ignore_space_change = enabled;
        self
    }

    pub fn with_ignore(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.ignore = Some(compile(pattern)?);
        Ok(self)
    }

    /// Drops lines matching any of `patterns`. An empty list clears the
    /// setting.
    pub fn with_ignore_matching_lines<S: AsRef<str>>(
        mut self,
        patterns: &[S],
    ) -> Result<Self, ConfigError> {
        self.ignore_matching_lines = match patterns {
            [] => None,
            [single] => Some(compile(single.as_ref())?),
            many => {
                for pattern in many {
                    compile(pattern.as_ref())?;
                }
                let joined = many
                    .iter()
                    .map(|p| format!("(?:{})", p.as_ref()))
                    .collect::<Vec<_>>()
                    .join("|");
                Some(compile(&joined)?)
            }
        };
        Ok(self)
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns true if `line` should be dropped before comparison.
    pub fn is_skipped(&self, line: &str) -> bool {
        let is_comment = self
            .comment
            .as_deref()
            .is_some_and(|marker| line.trim_start().starts_with(marker));
        is_comment
            || self
                .ignore_matching_lines
                .as_ref()
                .is_some_and(|re| re.is_match(line))
    }
}

/// Parses a comma separated list of column end offsets such as
/// `8,24,40,56,72,80`.
///
/// # Errors
///
/// Fails on empty lists, non-numeric entries, zero, or offsets that are not
/// strictly ascending.
///
/// ```
/// use numdiff_rs::options::parse_columns;
///
/// assert_eq!(parse_columns("8,24,40,56,72,80").unwrap(), vec![8, 24, 40, 56, 72, 80]);
/// assert!(parse_columns("8,4").is_err());
/// ```
pub fn parse_columns(list: &str) -> Result<Vec<usize>, ConfigError> {
    let mut columns = Vec::new();
    for part in list.split(',') {
        let part = part.trim();
        let column: usize = part.parse().map_err(|_| {
            ConfigError::invalid_columns(list, format!("'{}' is not a column number", part))
        })?;
        if column == 0 {
            return Err(ConfigError::invalid_columns(list, "columns must be positive"));
        }
        if columns.last().is_some_and(|&last| column <= last) {
            return Err(ConfigError::invalid_columns(
                list,
                "columns must be strictly ascending",
            ));
        }
        columns.push(column);
    }
    Ok(columns)
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::invalid_pattern(pattern, e))
}

fn check_epsilon(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidEpsilon { name, value })
    }
}
