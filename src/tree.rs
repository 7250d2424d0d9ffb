//! Directory trees: entry classification and listing.

use crate::error::{NumdiffError, ReadError};
use crate::filter::ExcludeFilter;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a path is on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Directory,
    EmptyFile,
    RegularFile,
}

impl FileKind {
    /// Classifies `path`, following symlinks.
    pub fn of(path: &Path) -> Result<Self, ReadError> {
        let metadata =
            fs::metadata(path).map_err(|e| ReadError::read_failed(path.to_string_lossy(), e))?;
        Ok(if metadata.is_dir() {
            FileKind::Directory
        } else if metadata.len() == 0 {
            FileKind::EmptyFile
        } else {
            FileKind::RegularFile
        })
    }

    /// Empty and non-empty files can be compared with each other; a
    /// directory only matches a directory.
    pub fn is_compatible_with(self, other: FileKind) -> bool {
        match (self, other) {
            (FileKind::Directory, FileKind::Directory) => true,
            (FileKind::Directory, _) | (_, FileKind::Directory) => false,
            _ => true,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FileKind::Directory => "a directory",
            FileKind::EmptyFile => "a regular empty file",
            FileKind::RegularFile => "a regular file",
        }
    }
}

/// A classified entry: `path` relative to the tree root `base`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub base: PathBuf,
    pub path: PathBuf,
    pub kind: FileKind,
}

impl Entry {
    pub fn classify(base: &Path, path: &Path) -> Result<Self, ReadError> {
        let kind = FileKind::of(&base.join(path))?;
        Ok(Self {
            base: base.to_path_buf(),
            path: path.to_path_buf(),
            kind,
        })
    }

    pub fn full_path(&self) -> PathBuf {
        self.base.join(&self.path)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is {}",
            self.full_path().display(),
            self.kind.description()
        )
    }
}

/// Lists every entry below `root` as a path relative to `root`, sorted.
///
/// Entries whose file name is excluded are skipped, and excluded
/// directories are not descended into. The root itself is not listed.
pub fn list_tree(root: &Path, exclude: &ExcludeFilter) -> Result<Vec<PathBuf>, NumdiffError> {
    let mut paths = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !exclude.is_excluded(&entry.file_name().to_string_lossy()));

    for entry in walker {
        let entry = entry.map_err(|e| NumdiffError::walk(root.to_string_lossy(), e))?;
        if let Ok(relative) = entry.path().strip_prefix(root) {
            paths.push(relative.to_path_buf());
        }
    }

    paths.sort();
    Ok(paths)
}
