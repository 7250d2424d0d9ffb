//! File and directory comparison.
//!
//! [`Differ`] ties the pieces together: it reads files, aligns their lines
//! with the tolerant comparator and, for directory trees, pairs up entries
//! with [`merge_sorted`]. The result is a [`Comparison`], a flat list of
//! [`DiffEvent`]s in the order they would be reported.
//!
//! # Examples
//!
//! ```
//! use numdiff_rs::{compute_diff, ComparisonOptions, DiffConfig, DiffStats};
//! use numdiff_rs::reader::parse_lines;
//!
//! let options = ComparisonOptions::default();
//! let old = parse_lines("step 1\nenergy 1.0\n", &options);
//! let new = parse_lines("step 1\nenergy 1.000000000001\nextra\n", &options);
//!
//! let edits = compute_diff(&old, &new, &options, &DiffConfig::default()).unwrap();
//! let stats = DiffStats::from_edits(&edits);
//!
//! assert_eq!(stats.unchanged, 2);
//! assert_eq!(stats.inserted, 1);
//! ```

use crate::align::align;
use crate::edit::{EditKind, EditList, DEFAULT_MAX_CHUNK};
use crate::error::{ConfigError, NumdiffError};
use crate::filter::ExcludeFilter;
use crate::line::{Line, LineComparator};
use crate::merge::{merge_sorted, PairEntry};
use crate::options::ComparisonOptions;
use crate::reader::read_lines;
use crate::tree::{list_tree, Entry, FileKind};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

/// Line counts of one file comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    /// Lines only in the first file
    pub deleted: usize,
    /// Lines only in the second file
    pub inserted: usize,
    /// Lines of the first file replaced by lines of the second
    pub replaced: usize,
    /// Lines equal on both sides, tolerances included
    pub unchanged: usize,
}

impl DiffStats {
    pub fn new() -> Self {
        Self {
            deleted: 0,
            inserted: 0,
            replaced: 0,
            unchanged: 0,
        }
    }

    /// Counts lines per kind. Replaced lines are counted on the first axis.
    pub fn from_edits(edits: &EditList) -> Self {
        edits.iter().fold(Self::new(), |mut stats, op| {
            match op.kind {
                EditKind::Equal => stats.unchanged += op.a_len(),
                EditKind::Delete => stats.deleted += op.a_len(),
                EditKind::Insert => stats.inserted += op.b_len(),
                EditKind::Replace => stats.replaced += op.a_len(),
            }
            stats
        })
    }

    /// Adds the counts of `other` to this one.
    pub fn absorb(&mut self, other: &DiffStats) {
        self.deleted += other.deleted;
        self.inserted += other.inserted;
        self.replaced += other.replaced;
        self.unchanged += other.unchanged;
    }

    /// Returns the total number of changed lines (excluding unchanged).
    pub fn total_changes(&self) -> usize {
        self.deleted + self.inserted + self.replaced
    }

    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

impl Default for DiffStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings of the comparison driver that are not part of line equality.
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Bound for `replace` chunks; `None` disables chunking
    pub max_chunk: Option<NonZeroUsize>,
    /// Entry names skipped in directory mode
    pub exclude: ExcludeFilter,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_chunk: NonZeroUsize::new(DEFAULT_MAX_CHUNK),
            exclude: ExcludeFilter::default(),
        }
    }
}

/// The result of comparing two files.
#[derive(Debug, Clone, Serialize)]
pub struct FileDiff {
    pub left: PathBuf,
    pub right: PathBuf,
    pub edits: EditList,
    pub stats: DiffStats,
    #[serde(skip)]
    pub old_lines: Vec<Line>,
    #[serde(skip)]
    pub new_lines: Vec<Line>,
    #[serde(skip)]
    pub left_modified: Option<SystemTime>,
    #[serde(skip)]
    pub right_modified: Option<SystemTime>,
}

impl FileDiff {
    pub fn has_differences(&self) -> bool {
        self.edits.has_changes()
    }
}

/// One reportable outcome of a comparison.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiffEvent {
    /// `name` exists below `base` only
    OnlyIn { base: PathBuf, name: PathBuf },
    /// The same relative path is a directory on one side and a file on the
    /// other
    KindMismatch { left: Entry, right: Entry },
    /// Two files were compared
    Compared(FileDiff),
}

impl DiffEvent {
    pub fn is_difference(&self) -> bool {
        match self {
            DiffEvent::OnlyIn { .. } | DiffEvent::KindMismatch { .. } => true,
            DiffEvent::Compared(file) => file.has_differences(),
        }
    }
}

impl fmt::Display for DiffEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffEvent::OnlyIn { base, name } => {
                write!(f, "Only in {}: {}.", base.display(), name.display())
            }
            DiffEvent::KindMismatch { left, right } => write!(f, "File {left} while file {right}"),
            DiffEvent::Compared(file) => {
                write!(f, "Files {} and {}", file.left.display(), file.right.display())?;
                if file.has_differences() {
                    f.write_str(" differ")
                } else {
                    f.write_str(" are equal")
                }
            }
        }
    }
}

/// Everything found by one run, in report order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Comparison {
    pub events: Vec<DiffEvent>,
}

impl Comparison {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_differences(&self) -> bool {
        self.events.iter().any(DiffEvent::is_difference)
    }

    /// Line counts summed over every compared file.
    pub fn stats(&self) -> DiffStats {
        let mut total = DiffStats::new();
        for event in &self.events {
            if let DiffEvent::Compared(file) = event {
                total.absorb(&file.stats);
            }
        }
        total
    }

    /// Counts `(differing files, only-in entries, kind mismatches)`.
    pub fn counts(&self) -> (usize, usize, usize) {
        self.events
            .iter()
            .fold((0, 0, 0), |(files, only, kinds), event| match event {
                DiffEvent::OnlyIn { .. } => (files, only + 1, kinds),
                DiffEvent::KindMismatch { .. } => (files, only, kinds + 1),
                DiffEvent::Compared(file) if file.has_differences() => (files + 1, only, kinds),
                DiffEvent::Compared(_) => (files, only, kinds),
            })
    }
}

/// Compares files and directory trees under one set of options.
#[derive(Debug, Clone)]
pub struct Differ {
    options: ComparisonOptions,
    comparator: LineComparator,
    config: DiffConfig,
}

impl Differ {
    pub fn new(options: ComparisonOptions, config: DiffConfig) -> Result<Self, ConfigError> {
        let comparator = LineComparator::new(&options)?;
        Ok(Self {
            options,
            comparator,
            config,
        })
    }

    pub fn options(&self) -> &ComparisonOptions {
        &self.options
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Aligns two line sequences.
    pub fn compare_lines(&self, old: &[Line], new: &[Line]) -> Result<EditList, NumdiffError> {
        Ok(align(old, new, &self.comparator, self.config.max_chunk)?)
    }

    /// Reads and compares two files.
    pub fn compare_files(&self, left: &Path, right: &Path) -> Result<FileDiff, NumdiffError> {
        let old_lines = read_lines(left, &self.options)?;
        let new_lines = read_lines(right, &self.options)?;
        let edits = self.compare_lines(&old_lines, &new_lines)?;
        let stats = DiffStats::from_edits(&edits);

        debug!(
            left = %left.display(),
            right = %right.display(),
            changes = stats.total_changes(),
            "Compared files"
        );

        Ok(FileDiff {
            left: left.to_path_buf(),
            right: right.to_path_buf(),
            edits,
            stats,
            old_lines,
            new_lines,
            left_modified: modified_time(left),
            right_modified: modified_time(right),
        })
    }

    /// Compares two directory trees entry by entry.
    ///
    /// Entries present on one side only are reported once; their
    /// descendants are not reported again. The same holds for a path that
    /// is a directory on one side and a file on the other. Directories
    /// present on both sides are not events themselves, their contents are.
    pub fn compare_trees(&self, left: &Path, right: &Path) -> Result<Comparison, NumdiffError> {
        for root in [left, right] {
            if !root.is_dir() {
                return Err(ConfigError::not_a_directory(root.to_string_lossy()).into());
            }
        }

        info!(left = %left.display(), right = %right.display(), "Comparing trees");
        let left_paths = list_tree(left, &self.config.exclude)?;
        let right_paths = list_tree(right, &self.config.exclude)?;

        let mut comparison = Comparison::new();
        let mut left_reported: Vec<PathBuf> = Vec::new();
        let mut right_reported: Vec<PathBuf> = Vec::new();

        for pair in merge_sorted(&left_paths, &right_paths) {
            match pair {
                PairEntry::LeftOnly(name) => {
                    if is_below(&left_reported, &name) {
                        continue;
                    }
                    left_reported.push(name.clone());
                    comparison.events.push(DiffEvent::OnlyIn {
                        base: left.to_path_buf(),
                        name,
                    });
                }
                PairEntry::RightOnly(name) => {
                    if is_below(&right_reported, &name) {
                        continue;
                    }
                    right_reported.push(name.clone());
                    comparison.events.push(DiffEvent::OnlyIn {
                        base: right.to_path_buf(),
                        name,
                    });
                }
                PairEntry::Both(left_name, right_name) => {
                    if is_below(&left_reported, &left_name) || is_below(&right_reported, &right_name)
                    {
                        continue;
                    }

                    let left_entry = Entry::classify(left, &left_name)?;
                    let right_entry = Entry::classify(right, &right_name)?;

                    if !left_entry.kind.is_compatible_with(right_entry.kind) {
                        left_reported.push(left_name);
                        right_reported.push(right_name);
                        comparison.events.push(DiffEvent::KindMismatch {
                            left: left_entry,
                            right: right_entry,
                        });
                    } else if left_entry.kind != FileKind::Directory {
                        let file =
                            self.compare_files(&left_entry.full_path(), &right_entry.full_path())?;
                        comparison.events.push(DiffEvent::Compared(file));
                    }
                }
            }
        }

        Ok(comparison)
    }

    /// Compares the two command-line paths.
    ///
    /// Without `recursive`, `left` must be a file. If `right` is a directory
    /// the file of the same name inside it is used.
    pub fn compare_paths(
        &self,
        left: &Path,
        right: &Path,
        recursive: bool,
    ) -> Result<Comparison, NumdiffError> {
        if recursive {
            return self.compare_trees(left, right);
        }

        if left.is_dir() {
            return Err(ConfigError::is_a_directory(left.to_string_lossy()).into());
        }
        let right = resolve_counterpart(left, right);
        if right.is_dir() {
            return Err(ConfigError::is_a_directory(right.to_string_lossy()).into());
        }

        let file = self.compare_files(left, &right)?;
        Ok(Comparison {
            events: vec![DiffEvent::Compared(file)],
        })
    }
}

/// Aligns two line sequences under `options` and `config`.
pub fn compute_diff(
    old: &[Line],
    new: &[Line],
    options: &ComparisonOptions,
    config: &DiffConfig,
) -> Result<EditList, NumdiffError> {
    let comparator = LineComparator::new(options)?;
    Ok(align(old, new, &comparator, config.max_chunk)?)
}

fn resolve_counterpart(left: &Path, right: &Path) -> PathBuf {
    match left.file_name() {
        Some(name) if right.is_dir() => right.join(name),
        _ => right.to_path_buf(),
    }
}

fn is_below(reported: &[PathBuf], path: &Path) -> bool {
    reported.iter().any(|root| path.starts_with(root))
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
