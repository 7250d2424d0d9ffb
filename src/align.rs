//! Alignment of two line sequences into a normalized [`EditList`].
//!
//! Alignment runs in two passes, both using the Myers algorithm from
//! `similar`:
//!
//! 1. a coarse pass compares comparison values exactly, which is cheap and
//!    hashes lines;
//! 2. every coarse `replace` block is re-aligned with the tolerant
//!    [`LineComparator`] as element equality, in windows of at most
//!    `max_chunk` lines per side. A window ends at its last match, so the
//!    next window picks up the unmatched tail. The refined opcodes are
//!    collected into the final list, which chunks `replace` spans.
//!
//! Lines that differ only by numeric noise fall into `replace` chunks in the
//! first pass and come out as `equal` in the second.
//!
//! # Examples
//!
//! ```
//! use numdiff_rs::align::align;
//! use numdiff_rs::edit::{EditKind, EditOp, DEFAULT_MAX_CHUNK};
//! use numdiff_rs::line::LineComparator;
//! use numdiff_rs::options::ComparisonOptions;
//! use numdiff_rs::reader::parse_lines;
//! use std::num::NonZeroUsize;
//!
//! let options = ComparisonOptions::default();
//! let comparator = LineComparator::new(&options).unwrap();
//! let old = parse_lines("x 1.0\ny 2.0\n", &options);
//! let new = parse_lines("x 1.0000000001\ny 2.0\n", &options);
//!
//! let edits = align(&old, &new, &comparator, NonZeroUsize::new(DEFAULT_MAX_CHUNK)).unwrap();
//! assert_eq!(edits.ops(), &[EditOp::new(EditKind::Equal, 0, 2, 0, 2)]);
//! ```

use crate::edit::{EditKind, EditList, EditOp};
use crate::error::DiffError;
use crate::line::{Line, LineComparator};
use similar::algorithms::{myers, Capture, Replace};
use similar::{capture_diff_slices, Algorithm, DiffOp, DiffTag};
use std::num::NonZeroUsize;
use std::ops::Range;
use tracing::debug;

impl From<DiffOp> for EditOp {
    fn from(op: DiffOp) -> Self {
        let (tag, old, new) = op.as_tag_tuple();
        let kind = match tag {
            DiffTag::Equal => EditKind::Equal,
            DiffTag::Delete => EditKind::Delete,
            DiffTag::Insert => EditKind::Insert,
            DiffTag::Replace => EditKind::Replace,
        };
        EditOp::new(kind, old.start, old.end, new.start, new.end)
    }
}

/// A line of the first input, as seen by the tolerant Myers pass.
struct OldItem<'a> {
    line: &'a Line,
}

/// A line of the second input. Comparing it against an [`OldItem`] runs
/// the tolerant comparator with the second input as the reference side.
struct NewItem<'a> {
    line: &'a Line,
    comparator: &'a LineComparator,
}

impl<'a, 'b> PartialEq<OldItem<'b>> for NewItem<'a> {
    fn eq(&self, old: &OldItem<'b>) -> bool {
        self.comparator.lines_equal(old.line, self.line)
    }
}

/// Aligns `old` against `new`.
///
/// # Errors
///
/// Returns [`DiffError::InconsistentSequence`] if the opcodes produced by
/// either pass are not contiguous, which indicates a bug rather than a
/// property of the input.
pub fn align(
    old: &[Line],
    new: &[Line],
    comparator: &LineComparator,
    max_chunk: Option<NonZeroUsize>,
) -> Result<EditList, DiffError> {
    debug!(old = old.len(), new = new.len(), "Aligning");

    let coarse = coarse_pass(old, new)?;

    let old_items: Vec<OldItem<'_>> = old.iter().map(|line| OldItem { line }).collect();
    let new_items: Vec<NewItem<'_>> = new
        .iter()
        .map(|line| NewItem { line, comparator })
        .collect();

    let mut refined = EditList::with_max_chunk(max_chunk);
    for op in coarse.iter() {
        match op.kind {
            EditKind::Replace => {
                refine_block(&old_items, &new_items, op, max_chunk, &mut refined)?;
            }
            _ => refined.push(*op)?,
        }
    }

    debug!(
        coarse = coarse.len(),
        refined = refined.len(),
        "Alignment complete"
    );
    Ok(refined)
}

/// Exact alignment on comparison values.
fn coarse_pass(old: &[Line], new: &[Line]) -> Result<EditList, DiffError> {
    let old_values: Vec<&str> = old.iter().map(Line::value).collect();
    let new_values: Vec<&str> = new.iter().map(Line::value).collect();

    let mut coarse = EditList::with_max_chunk(None);
    coarse.extend(
        capture_diff_slices(Algorithm::Myers, &old_values, &new_values)
            .into_iter()
            .map(EditOp::from),
    )?;
    Ok(coarse)
}

/// Re-aligns one coarse `replace` block in windows of at most `max_chunk`
/// lines per side.
///
/// A window is committed only up to its last `equal` opcode. Whatever
/// follows it is aligned again as the head of the next window, so a line
/// whose tolerant match lies just past a window edge still finds it. A
/// window without any match is committed whole.
fn refine_block(
    old: &[OldItem<'_>],
    new: &[NewItem<'_>],
    block: &EditOp,
    max_chunk: Option<NonZeroUsize>,
    out: &mut EditList,
) -> Result<(), DiffError> {
    let Some(chunk) = max_chunk.map(NonZeroUsize::get) else {
        return out.extend(refine(old, new, block.a_range(), block.b_range()));
    };

    let (mut a, mut b) = (block.a_start, block.b_start);
    while a < block.a_end || b < block.b_end {
        let a_stop = block.a_end.min(a + chunk);
        let b_stop = block.b_end.min(b + chunk);
        let ops = refine(old, new, a..a_stop, b..b_stop);

        let last_equal = ops.iter().rposition(|op| op.kind == EditKind::Equal);
        let is_final = a_stop == block.a_end && b_stop == block.b_end;
        match last_equal {
            Some(index) if !is_final => {
                let commit = &ops[..=index];
                out.extend(commit.iter().copied())?;
                a = ops[index].a_end;
                b = ops[index].b_end;
            }
            _ => {
                out.extend(ops)?;
                a = a_stop;
                b = b_stop;
            }
        }
    }
    Ok(())
}

/// Tolerant alignment of `old[a]` against `new[b]`.
fn refine(
    old: &[OldItem<'_>],
    new: &[NewItem<'_>],
    a: Range<usize>,
    b: Range<usize>,
) -> Vec<EditOp> {
    let mut hook = Replace::new(Capture::new());
    myers::diff(&mut hook, old, a, new, b).unwrap_or_else(|never| match never {});
    hook.into_inner()
        .into_ops()
        .into_iter()
        .map(EditOp::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ComparisonOptions;
    use crate::reader::parse_lines;

    fn lines(text: &str) -> Vec<Line> {
        parse_lines(text, &ComparisonOptions::default())
    }

    #[test]
    fn test_edit_op_from_diff_op() {
        let op = DiffOp::Replace {
            old_index: 2,
            old_len: 3,
            new_index: 4,
            new_len: 1,
        };
        assert_eq!(EditOp::from(op), EditOp::new(EditKind::Replace, 2, 5, 4, 5));

        let op = DiffOp::Insert {
            old_index: 1,
            new_index: 1,
            new_len: 2,
        };
        assert_eq!(EditOp::from(op), EditOp::new(EditKind::Insert, 1, 1, 1, 3));
    }

    #[test]
    fn test_coarse_pass_sees_numeric_noise_as_replace() {
        let old = lines("a\n1.0\nb\n");
        let new = lines("a\n1.00000000001\nb\n");
        let coarse = coarse_pass(&old, &new).unwrap();
        assert!(coarse.iter().any(|op| op.kind == EditKind::Replace));
    }

    #[test]
    fn test_refine_window_uses_tolerance() {
        let options = ComparisonOptions::default();
        let comparator = LineComparator::new(&options).unwrap();
        let old = lines("1.0\n2.0\n");
        let new = lines("1.000000000001\n2.5\n");
        let old_items: Vec<OldItem<'_>> = old.iter().map(|line| OldItem { line }).collect();
        let new_items: Vec<NewItem<'_>> = new
            .iter()
            .map(|line| NewItem {
                line,
                comparator: &comparator,
            })
            .collect();

        let ops = refine(&old_items, &new_items, 0..2, 0..2);
        assert_eq!(
            ops,
            vec![
                EditOp::new(EditKind::Equal, 0, 1, 0, 1),
                EditOp::new(EditKind::Replace, 1, 2, 1, 2),
            ]
        );
    }
}
