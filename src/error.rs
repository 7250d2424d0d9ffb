//! Custom error types for numdiff.

use crate::edit::EditOp;

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read file {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid regular expression '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Invalid column list '{list}': {reason}")]
    InvalidColumns { list: String, reason: String },

    #[error("Invalid {name}: {value} (must be finite and not negative)")]
    InvalidEpsilon { name: &'static str, value: f64 },

    #[error("'{path}' is not a directory")]
    NotADirectory { path: String },

    #[error("'{path}' is a directory (use --recursive to compare trees)")]
    IsADirectory { path: String },
}

#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// Two opcodes of the same kind that do not touch. The caller fed
    /// opcodes out of order or from mismatched ranges.
    #[error("Inconsistent Sequence: {next} does not continue {previous}")]
    InconsistentSequence { previous: EditOp, next: EditOp },
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to serialize to JSON: {source}")]
    JsonSerializationError {
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum NumdiffError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Diff(#[from] DiffError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("Failed to walk directory {path}: {source}")]
    Walk {
        path: String,
        #[source]
        source: walkdir::Error,
    },
}

impl ReadError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadFailed {
            path: path.into(),
            source,
        }
    }
}

impl ConfigError {
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn invalid_glob(pattern: impl Into<String>, source: glob::PatternError) -> Self {
        Self::InvalidGlob {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn invalid_columns(list: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColumns {
            list: list.into(),
            reason: reason.into(),
        }
    }

    pub fn not_a_directory(path: impl Into<String>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    pub fn is_a_directory(path: impl Into<String>) -> Self {
        Self::IsADirectory { path: path.into() }
    }
}

impl NumdiffError {
    pub fn walk(path: impl Into<String>, source: walkdir::Error) -> Self {
        Self::Walk {
            path: path.into(),
            source,
        }
    }
}
