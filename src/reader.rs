//! Reading input files into [`Line`]s.
//!
//! Comment lines and lines matching the ignore-matching-lines pattern are
//! dropped here, before they reach the comparator. Kept lines remember
//! their physical line number.
//!
//! # Examples
//!
//! ```
//! use numdiff_rs::options::ComparisonOptions;
//! use numdiff_rs::reader::parse_lines;
//!
//! let options = ComparisonOptions::default().with_comment("#");
//! let lines = parse_lines("test\n# hallo\ngot it?\n", &options);
//!
//! assert_eq!(lines.len(), 2);
//! assert_eq!(lines[1].text(), "got it?");
//! assert_eq!(lines[1].number(), 3);
//! ```

use crate::error::ReadError;
use crate::line::Line;
use crate::options::ComparisonOptions;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads a file and returns its comparable lines.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
///
/// # Errors
///
/// - `ReadError::FileNotFound` if `path` does not exist
/// - `ReadError::ReadFailed` if it cannot be read
pub fn read_lines(path: &Path, options: &ComparisonOptions) -> Result<Vec<Line>, ReadError> {
    if !path.exists() {
        return Err(ReadError::file_not_found(path.to_string_lossy()));
    }

    debug!(path = %path.display(), "Reading lines");
    let bytes = fs::read(path).map_err(|e| ReadError::read_failed(path.to_string_lossy(), e))?;
    let content = String::from_utf8_lossy(&bytes);

    let lines = parse_lines(&content, options);
    debug!(path = %path.display(), lines = lines.len(), "Read complete");
    Ok(lines)
}

/// Splits `content` into lines, dropping the ones the options skip.
/// Both `\n` and `\r\n` terminators are accepted.
pub fn parse_lines(content: &str, options: &ComparisonOptions) -> Vec<Line> {
    content
        .lines()
        .enumerate()
        .filter(|(_, text)| !options.is_skipped(text))
        .map(|(index, text)| Line::new(index + 1, text, options))
        .collect()
}
