// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The worktree placer: turns a caller-requested path into a conflict-free
//! absolute worktree path, in either dry-run (just compute a name) or
//! commit (must succeed, creates the directory) mode.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Attempts are bounded so a pathological filesystem full of `name-N`
/// directories cannot spin the placer forever.
const MAX_SUFFIX_ATTEMPTS: u32 = u32::MAX;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaceError {
    #[error("Invalid local directory")]
    InvalidDirectory,
    #[error("Already in sync")]
    AlreadyInSync,
    #[error("Invalid local directory name")]
    InvalidDirectoryName,
    #[error("could not find an available worktree name after {0} attempts")]
    TooManyAttempts(u32),
    #[error("io error: {0}")]
    Io(String),
}

/// Queried by the placer to learn whether a candidate path is already the
/// worktree of some known repository or non-terminal clone task.
pub trait WorktreeOracle {
    fn is_known_worktree(&self, path: &Path) -> bool;
}

fn strip_trailing_separators(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    let trimmed = s.trim_end_matches(std::path::MAIN_SEPARATOR);
    if trimmed.is_empty() {
        PathBuf::from(std::path::MAIN_SEPARATOR.to_string())
    } else {
        PathBuf::from(trimmed)
    }
}

/// Byte-prefix check: the worktree's basename must be a prefix of `repo_name`.
pub fn basename_matches_repo_name(worktree: &Path, repo_name: &str) -> bool {
    match worktree.file_name().and_then(|n| n.to_str()) {
        Some(basename) => repo_name.as_bytes().starts_with(basename.as_bytes()),
        None => false,
    }
}

/// Place a worktree at (a variant of) `requested`. In commit mode, creates
/// the directory and fails hard on conflicts; in dry-run mode, never touches
/// the filesystem beyond `exists()`/`is_dir()` checks and always returns a
/// usable candidate by appending `-N` suffixes.
pub fn place(
    requested: &Path,
    oracle: &dyn WorktreeOracle,
    dry_run: bool,
) -> Result<PathBuf, PlaceError> {
    let requested = strip_trailing_separators(requested);

    if !requested.exists() {
        if !dry_run {
            std::fs::create_dir_all(&requested).map_err(|e| PlaceError::Io(e.to_string()))?;
        }
        return Ok(requested);
    }

    if !requested.is_dir() {
        if dry_run {
            return find_free_suffix(&requested, oracle);
        }
        return Err(PlaceError::InvalidDirectory);
    }

    if oracle.is_known_worktree(&requested) {
        if dry_run {
            return find_free_suffix(&requested, oracle);
        }
        return Err(PlaceError::AlreadyInSync);
    }

    Ok(requested)
}

fn find_free_suffix(base: &Path, oracle: &dyn WorktreeOracle) -> Result<PathBuf, PlaceError> {
    let parent = base.parent().unwrap_or_else(|| Path::new(""));
    let stem = base
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("worktree")
        .to_string();

    for n in 1..=MAX_SUFFIX_ATTEMPTS {
        let candidate = parent.join(format!("{stem}-{n}"));
        if !candidate.exists() && !oracle.is_known_worktree(&candidate) {
            return Ok(candidate);
        }
    }
    Err(PlaceError::TooManyAttempts(MAX_SUFFIX_ATTEMPTS))
}

#[cfg(test)]
#[path = "worktree_tests.rs"]
mod tests;
