//! Normalized edit lists.
//!
//! A sequence matcher reports its result as elementary opcodes: spans of
//! `equal`, `insert`, `delete` or `replace` over half-open index ranges of
//! the two inputs. [`EditList`] collects such opcodes one at a time and keeps
//! them normalized:
//!
//! - contiguous opcodes of the same kind are merged into one span;
//! - a `replace` span wider than the chunk bound is split into consecutive
//!   `replace` chunks, so that a later pass can re-align each chunk in a
//!   bounded window.
//!
//! # Examples
//!
//! ```
//! use numdiff_rs::edit::{EditKind, EditList, EditOp};
//! use std::num::NonZeroUsize;
//!
//! let mut list = EditList::with_max_chunk(NonZeroUsize::new(5));
//! list.push(EditOp::new(EditKind::Replace, 0, 3, 0, 3)).unwrap();
//! list.push(EditOp::new(EditKind::Replace, 3, 5, 3, 5)).unwrap();
//! list.push(EditOp::new(EditKind::Replace, 5, 9, 5, 9)).unwrap();
//!
//! assert_eq!(
//!     list.ops(),
//!     &[
//!         EditOp::new(EditKind::Replace, 0, 5, 0, 5),
//!         EditOp::new(EditKind::Replace, 5, 9, 5, 9),
//!     ]
//! );
//! ```

use crate::error::DiffError;
use serde::Serialize;
use std::fmt;
use std::num::NonZeroUsize;
use std::ops::{Index, Range};

/// Default bound for the first-axis width of a `replace` span.
pub const DEFAULT_MAX_CHUNK: usize = 20;

/// The kind of an edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditKind {
    /// Both ranges hold equal lines
    Equal,
    /// Lines only present in the second input
    Insert,
    /// Lines only present in the first input
    Delete,
    /// Lines of the first input replaced by lines of the second
    Replace,
}

impl EditKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditKind::Equal => "equal",
            EditKind::Insert => "insert",
            EditKind::Delete => "delete",
            EditKind::Replace => "replace",
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single opcode: `a_start..a_end` of the first input against
/// `b_start..b_end` of the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EditOp {
    pub kind: EditKind,
    pub a_start: usize,
    pub a_end: usize,
    pub b_start: usize,
    pub b_end: usize,
}

impl EditOp {
    pub fn new(kind: EditKind, a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> Self {
        debug_assert!(a_end >= a_start && b_end >= b_start);
        debug_assert!(kind != EditKind::Equal || a_end - a_start == b_end - b_start);
        Self {
            kind,
            a_start,
            a_end,
            b_start,
            b_end,
        }
    }

    pub fn a_range(&self) -> Range<usize> {
        self.a_start..self.a_end
    }

    pub fn b_range(&self) -> Range<usize> {
        self.b_start..self.b_end
    }

    pub fn a_len(&self) -> usize {
        self.a_end - self.a_start
    }

    pub fn b_len(&self) -> usize {
        self.b_end - self.b_start
    }

    /// True when `next` starts exactly where this opcode ends on both axes.
    pub fn is_continued_by(&self, next: &EditOp) -> bool {
        self.a_end == next.a_start && self.b_end == next.b_start
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}..{} {}..{}",
            self.kind, self.a_start, self.a_end, self.b_start, self.b_end
        )
    }
}

/// A running, normalized list of opcodes.
///
/// Built with [`EditList::push`] or [`EditList::extend`]. The entries always
/// partition both index spaces in order, provided the caller feeds
/// contiguous opcodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EditList {
    ops: Vec<EditOp>,
    #[serde(skip)]
    max_chunk: Option<NonZeroUsize>,
}

impl EditList {
    /// Creates an empty list using [`DEFAULT_MAX_CHUNK`].
    pub fn new() -> Self {
        Self::with_max_chunk(NonZeroUsize::new(DEFAULT_MAX_CHUNK))
    }

    /// Creates an empty list. `None` disables chunking of `replace` spans.
    pub fn with_max_chunk(max_chunk: Option<NonZeroUsize>) -> Self {
        Self {
            ops: Vec::new(),
            max_chunk,
        }
    }

    pub fn max_chunk(&self) -> Option<NonZeroUsize> {
        self.max_chunk
    }

    /// Appends an opcode, merging it into the tail when it continues a span
    /// of the same kind.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::InconsistentSequence`] when `op` has the kind of
    /// the last entry but does not start where that entry ends.
    pub fn push(&mut self, op: EditOp) -> Result<(), DiffError> {
        let op = match self.ops.last() {
            Some(last) if last.kind == op.kind => {
                if !last.is_continued_by(&op) {
                    return Err(DiffError::InconsistentSequence {
                        previous: *last,
                        next: op,
                    });
                }
                let merged = EditOp::new(last.kind, last.a_start, op.a_end, last.b_start, op.b_end);
                self.ops.pop();
                merged
            }
            _ => op,
        };

        self.ops.extend(Self::chunk(op, self.max_chunk));
        Ok(())
    }

    /// Appends every opcode in order, stopping at the first error.
    pub fn extend<I>(&mut self, ops: I) -> Result<(), DiffError>
    where
        I: IntoIterator<Item = EditOp>,
    {
        for op in ops {
            self.push(op)?;
        }
        Ok(())
    }

    /// Splits a `replace` opcode wider than `max_chunk` into consecutive
    /// chunks of `max_chunk` lines on the first axis; the last chunk takes
    /// the remainder. Offsets on the second axis advance in step and are
    /// clamped to its end. Other kinds are returned unchanged.
    ///
    /// ```
    /// use numdiff_rs::edit::{EditKind, EditList, EditOp};
    /// use std::num::NonZeroUsize;
    ///
    /// let chunks = EditList::chunk(
    ///     EditOp::new(EditKind::Replace, 0, 5, 2, 7),
    ///     NonZeroUsize::new(2),
    /// );
    /// assert_eq!(
    ///     chunks,
    ///     vec![
    ///         EditOp::new(EditKind::Replace, 0, 2, 2, 4),
    ///         EditOp::new(EditKind::Replace, 2, 4, 4, 6),
    ///         EditOp::new(EditKind::Replace, 4, 5, 6, 7),
    ///     ]
    /// );
    /// ```
    pub fn chunk(op: EditOp, max_chunk: Option<NonZeroUsize>) -> Vec<EditOp> {
        let max_chunk = match max_chunk {
            Some(max) if op.kind == EditKind::Replace => max.get(),
            _ => return vec![op],
        };

        let mut chunks = Vec::with_capacity(op.a_len() / max_chunk + 1);
        let (mut a, mut b) = (op.a_start, op.b_start);
        while op.a_end - a > max_chunk {
            chunks.push(EditOp::new(
                op.kind,
                a,
                a + max_chunk,
                b.min(op.b_end),
                (b + max_chunk).min(op.b_end),
            ));
            a += max_chunk;
            b += max_chunk;
        }
        chunks.push(EditOp::new(op.kind, a, op.a_end, b.min(op.b_end), op.b_end));
        chunks
    }

    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditOp> {
        self.ops.iter()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns true if any entry is not `equal`.
    pub fn has_changes(&self) -> bool {
        self.ops.iter().any(|op| op.kind != EditKind::Equal)
    }

    pub fn into_ops(self) -> Vec<EditOp> {
        self.ops
    }
}

impl Default for EditList {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for EditList {
    type Output = EditOp;

    fn index(&self, index: usize) -> &EditOp {
        &self.ops[index]
    }
}

impl<'a> IntoIterator for &'a EditList {
    type Item = &'a EditOp;
    type IntoIter = std::slice::Iter<'a, EditOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
