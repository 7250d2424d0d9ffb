//! Alignment of two sorted key collections.
//!
//! [`merge_sorted`] walks two sorted sequences with independent cursors and
//! pairs every key with its counterpart, or with nothing when the other side
//! has no such key. Directory comparison uses it to pair relative paths of
//! two trees.
//!
//! # Examples
//!
//! ```
//! use numdiff_rs::merge::{merge_sorted, PairEntry};
//!
//! let pairs = merge_sorted(&[1, 2, 3, 5, 6], &[1, 3, 4, 5]);
//! assert_eq!(
//!     pairs,
//!     vec![
//!         PairEntry::Both(1, 1),
//!         PairEntry::LeftOnly(2),
//!         PairEntry::Both(3, 3),
//!         PairEntry::RightOnly(4),
//!         PairEntry::Both(5, 5),
//!         PairEntry::LeftOnly(6),
//!     ]
//! );
//! ```

use std::cmp::Ordering;

/// One row of an aligned pair of collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairEntry<K> {
    /// The key exists on both sides
    Both(K, K),
    /// The key only exists in the left collection
    LeftOnly(K),
    /// The key only exists in the right collection
    RightOnly(K),
}

impl<K> PairEntry<K> {
    pub fn left(&self) -> Option<&K> {
        match self {
            PairEntry::Both(left, _) | PairEntry::LeftOnly(left) => Some(left),
            PairEntry::RightOnly(_) => None,
        }
    }

    pub fn right(&self) -> Option<&K> {
        match self {
            PairEntry::Both(_, right) | PairEntry::RightOnly(right) => Some(right),
            PairEntry::LeftOnly(_) => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, PairEntry::Both(..))
    }
}

/// Aligns two sorted slices.
///
/// Both inputs must be sorted ascending; duplicates are allowed. The result
/// is in merged sorted order, and projecting out the present left (or right)
/// keys gives back the left (or right) input.
pub fn merge_sorted<K: Ord + Clone>(left: &[K], right: &[K]) -> Vec<PairEntry<K>> {
    debug_assert!(left.windows(2).all(|w| w[0] <= w[1]));
    debug_assert!(right.windows(2).all(|w| w[0] <= w[1]));

    let mut result = Vec::with_capacity(left.len().max(right.len()));
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        let (l, r) = (&left[i], &right[j]);

        if l == r {
            result.push(PairEntry::Both(l.clone(), r.clone()));
            i += 1;
            j += 1;
        } else if contains_sorted(&right[j + 1..], l) {
            // Flush right-only keys until the counterpart of `l` shows up.
            while right[j] != *l {
                result.push(PairEntry::RightOnly(right[j].clone()));
                j += 1;
            }
            result.push(PairEntry::Both(l.clone(), right[j].clone()));
            i += 1;
            j += 1;
        } else if contains_sorted(&left[i + 1..], r) {
            while left[i] != *r {
                result.push(PairEntry::LeftOnly(left[i].clone()));
                i += 1;
            }
            result.push(PairEntry::Both(left[i].clone(), r.clone()));
            i += 1;
            j += 1;
        } else {
            match l.cmp(r) {
                Ordering::Less => {
                    result.push(PairEntry::LeftOnly(l.clone()));
                    i += 1;
                }
                _ => {
                    result.push(PairEntry::RightOnly(r.clone()));
                    j += 1;
                }
            }
        }
    }

    result.extend(left[i..].iter().cloned().map(PairEntry::LeftOnly));
    result.extend(right[j..].iter().cloned().map(PairEntry::RightOnly));
    result
}

fn contains_sorted<K: Ord>(haystack: &[K], key: &K) -> bool {
    haystack.binary_search(key).is_ok()
}
