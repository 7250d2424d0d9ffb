//! Lines and tolerant line comparison.
//!
//! A [`Line`] keeps the text as read plus the value used for comparison.
//! [`LineComparator`] decides whether two lines are equal:
//!
//! 1. if the ignore pattern matches both values, they are equal;
//! 2. if the values are identical, they are equal;
//! 3. otherwise both lines are split into tokens, and lines with different
//!    token counts are unequal;
//! 4. tokens are compared pairwise with [`TokenComparator`]; the first
//!    unequal pair makes the lines unequal.
//!
//! This is an equality test, not an ordering. Tolerant equality is not
//! transitive, so it must never be used to sort or hash lines.
//!
//! # Examples
//!
//! ```
//! use numdiff_rs::line::{Line, LineComparator};
//! use numdiff_rs::options::ComparisonOptions;
//!
//! let options = ComparisonOptions::default();
//! let comparator = LineComparator::new(&options).unwrap();
//!
//! let a = Line::new(1, "AA 1.00000000001", &options);
//! let b = Line::new(1, "AA 1", &options);
//! let c = Line::new(1, "BB", &options);
//!
//! assert!(comparator.lines_equal(&a, &b));
//! assert!(!comparator.lines_equal(&a, &c));
//! ```

use crate::error::ConfigError;
use crate::options::{ComparisonOptions, SplitRule, DEFAULT_SPLIT_PATTERN};
use crate::token::{TokenComparator, TokenVerdict};
use regex::Regex;
use std::iter;
use tracing::debug;

/// One physical input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    number: usize,
    text: String,
    value: String,
}

impl Line {
    /// Builds a line. `text` must not contain the line terminator.
    pub fn new(number: usize, text: impl Into<String>, options: &ComparisonOptions) -> Self {
        let text = text.into();
        let value = if options.ignore_space_change {
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        } else {
            text.clone()
        };
        Self {
            number,
            text,
            value,
        }
    }

    /// 1-based line number in the source file.
    pub fn number(&self) -> usize {
        self.number
    }

    /// The text as read.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The normalized text used for comparison.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The decision path of one line comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineVerdict {
    /// Both lines match the ignore pattern
    Ignored,
    /// The comparison values are identical
    Identical,
    /// All tokens equal, at least one only within tolerance
    Tolerated,
    /// The lines split into different numbers of tokens
    TokenCountMismatch { left: usize, right: usize },
    /// The tokens at `index` differ
    TokenMismatch { index: usize },
}

impl LineVerdict {
    pub fn is_equal(&self) -> bool {
        matches!(
            self,
            LineVerdict::Ignored | LineVerdict::Identical | LineVerdict::Tolerated
        )
    }
}

/// Line equality under one set of [`ComparisonOptions`].
#[derive(Debug, Clone)]
pub struct LineComparator {
    tokens: TokenComparator,
    splitter: Splitter,
    ignore: Option<Regex>,
    verbose: bool,
}

#[derive(Debug, Clone)]
enum Splitter {
    Pattern(Regex),
    Columns(Vec<usize>),
}

impl LineComparator {
    /// # Errors
    ///
    /// Fails only if the default split pattern cannot be compiled.
    pub fn new(options: &ComparisonOptions) -> Result<Self, ConfigError> {
        let splitter = match &options.split {
            SplitRule::Default => Splitter::Pattern(
                Regex::new(DEFAULT_SPLIT_PATTERN)
                    .map_err(|e| ConfigError::invalid_pattern(DEFAULT_SPLIT_PATTERN, e))?,
            ),
            SplitRule::Pattern(regex) => Splitter::Pattern(regex.clone()),
            SplitRule::Columns(columns) => Splitter::Columns(columns.clone()),
        };

        Ok(Self {
            tokens: TokenComparator::new(options),
            splitter,
            ignore: options.ignore.clone(),
            verbose: options.verbose,
        })
    }

    /// Returns true if the lines are equal. `second` is the reference side
    /// for relative tolerances.
    pub fn lines_equal(&self, first: &Line, second: &Line) -> bool {
        self.compare(first, second).is_equal()
    }

    /// Compares two lines and reports how the decision was reached.
    pub fn compare(&self, first: &Line, second: &Line) -> LineVerdict {
        if let Some(ignore) = &self.ignore {
            if ignore.is_match(first.value()) && ignore.is_match(second.value()) {
                return LineVerdict::Ignored;
            }
        }

        if first.value() == second.value() {
            return LineVerdict::Identical;
        }

        let left = self.split(first);
        let right = self.split(second);
        if left.len() != right.len() {
            if self.verbose {
                debug!(
                    left_line = first.number(),
                    right_line = second.number(),
                    left_tokens = left.len(),
                    right_tokens = right.len(),
                    "token count differs: {:?} vs {:?}",
                    first.text(),
                    second.text()
                );
            }
            return LineVerdict::TokenCountMismatch {
                left: left.len(),
                right: right.len(),
            };
        }

        let mut tolerated = false;
        for (index, (a, b)) in left.iter().zip(&right).enumerate() {
            match self.tokens.compare(a, b) {
                TokenVerdict::Literal => {}
                TokenVerdict::Tolerated => tolerated = true,
                TokenVerdict::Differ => {
                    if self.verbose {
                        debug!(
                            left_line = first.number(),
                            right_line = second.number(),
                            token = index,
                            "token differs: {:?} vs {:?}",
                            a,
                            b
                        );
                    }
                    return LineVerdict::TokenMismatch { index };
                }
            }
        }

        if tolerated {
            LineVerdict::Tolerated
        } else {
            // Different text but every token literally equal, e.g. other
            // separators around the same tokens.
            LineVerdict::Identical
        }
    }

    /// Splits a line into tokens. Fixed columns cut the text as read;
    /// patterns split the comparison value.
    pub fn split<'a>(&self, line: &'a Line) -> Vec<&'a str> {
        match &self.splitter {
            Splitter::Pattern(regex) => regex.split(line.value()).collect(),
            Splitter::Columns(columns) => slice_columns(line.text(), columns),
        }
    }
}

/// Cuts `text` at the given ascending end offsets, counted in characters.
/// Always yields one token per offset; offsets past the end give short or
/// empty tokens.
fn slice_columns<'a>(text: &'a str, columns: &[usize]) -> Vec<&'a str> {
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(iter::once(text.len()))
        .collect();
    let byte_at = |column: usize| bounds[column.min(bounds.len() - 1)];

    let mut start = 0;
    columns
        .iter()
        .map(|&end| {
            let token = &text[byte_at(start)..byte_at(end.max(start))];
            start = end;
            token
        })
        .collect()
}
