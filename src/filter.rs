//! Exclusion patterns for directory comparison.
//!
//! Patterns are shell globs matched against the file name of each entry
//! (not the whole relative path). An excluded directory is pruned together
//! with everything below it.
//!
//! # Pattern Syntax
//!
//! - `*.log` - any name ending in `.log`
//! - `.svn` - exactly `.svn`
//! - `tmp?` - `tmp` followed by one character
//! - `[ab]*` - names starting with `a` or `b`
//!
//! # Examples
//!
//! ```
//! use numdiff_rs::filter::ExcludeFilter;
//!
//! let filter = ExcludeFilter::new().exclude(".svn").unwrap().exclude("*.bak").unwrap();
//! assert!(filter.is_excluded(".svn"));
//! assert!(filter.is_excluded("results.bak"));
//! assert!(!filter.is_excluded("results.txt"));
//! ```

use crate::error::ConfigError;
use glob::Pattern;

/// A set of glob patterns; a name is excluded if any pattern matches it.
#[derive(Debug, Clone, Default)]
pub struct ExcludeFilter {
    patterns: Vec<Pattern>,
}

impl ExcludeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a filter from a list of glob patterns.
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        patterns
            .iter()
            .try_fold(Self::new(), |filter, pattern| filter.exclude(pattern.as_ref()))
    }

    pub fn exclude(mut self, pattern: &str) -> Result<Self, ConfigError> {
        let compiled = Pattern::new(pattern).map_err(|e| ConfigError::invalid_glob(pattern, e))?;
        self.patterns.push(compiled);
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(name))
    }
}
