//! Parallel, deterministic source file discovery with directory pruning.
//!
//! Performance notes:
//! - Excluded directories are pruned via `WalkDir::filter_entry`, so their
//!   subtrees are never visited
//! - Remaining entries are matched in parallel via Rayon's `par_bridge`
//!
//! Matching is on the entry's file name only, shell-glob style.

use anyhow::Result;
use glob::{MatchOptions, Pattern};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::error::{GlstubsError, GlstubsResult};

/// Source files the usage scan looks at by default.
pub const DEFAULT_INCLUDES: &[&str] = &["*.c", "*.cpp", "*.h", "*.m", "*.mm"];

/// Names skipped by default. `bgl.c` and `GPU_legacy_subs.h` wrap every
/// GL symbol and would mark all of them used.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "*.git",
    "*.svn",
    "bgl.c",
    "GPU_legacy_subs.h",
    "blenderplayer",
    "extern",
    "gameengine",
    "tests",
    "tools",
];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled include/exclude globs.
#[derive(Debug, Clone)]
pub struct FileFilter {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
}

fn compile(patterns: &[impl AsRef<str>]) -> GlstubsResult<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            let p = p.as_ref();
            Pattern::new(p).map_err(|e| GlstubsError::pattern(p, e.msg))
        })
        .collect()
}

impl FileFilter {
    /// Compiles both lists. At least one include pattern is required.
    pub fn new(includes: &[impl AsRef<str>], excludes: &[impl AsRef<str>]) -> GlstubsResult<Self> {
        if includes.is_empty() {
            return Err(GlstubsError::invalid_argument("no include patterns given"));
        }
        Ok(Self {
            includes: compile(includes)?,
            excludes: compile(excludes)?,
        })
    }

    fn matches_any(patterns: &[Pattern], name: &str) -> bool {
        patterns.iter().any(|p| p.matches_with(name, MATCH_OPTIONS))
    }

    /// True for a name matching any exclude pattern.
    pub fn is_excluded(&self, name: &str) -> bool {
        Self::matches_any(&self.excludes, name)
    }

    /// True for a file name that is included and not excluded.
    pub fn accepts_file(&self, name: &str) -> bool {
        Self::matches_any(&self.includes, name) && !self.is_excluded(name)
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self {
            includes: DEFAULT_INCLUDES.iter().filter_map(|p| Pattern::new(p).ok()).collect(),
            excludes: DEFAULT_EXCLUDES.iter().filter_map(|p| Pattern::new(p).ok()).collect(),
        }
    }
}

/// Checks if a directory entry should be pruned. The walk root itself is
/// never pruned.
#[inline]
fn is_excluded_dir(entry: &DirEntry, filter: &FileFilter) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| filter.is_excluded(name))
}

/// Gathers matching source files below `root`, sorted by path.
///
/// A missing root yields an empty list. Symlinked files are followed;
/// entries the walk cannot read are logged and skipped.
pub fn gather_source_files(root: &Path, filter: &FileFilter) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, filter))
        .par_bridge()
        .filter_map(|entry| match entry {
            Ok(e) => {
                // path().is_file() follows symlinks, file_type() does not
                if !e.path().is_file() {
                    return None;
                }
                let accepted = e
                    .file_name()
                    .to_str()
                    .is_some_and(|name| filter.accepts_file(name));
                accepted.then(|| e.into_path())
            }
            Err(e) => {
                let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                tracing::warn!(path = %path, error = %e, "unreadable entry in source tree, skipped");
                None
            }
        })
        .collect();

    files.sort();
    tracing::info!(root = %root.display(), files = files.len(), "gathered source files");
    Ok(files)
}
