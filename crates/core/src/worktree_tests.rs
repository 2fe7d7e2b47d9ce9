// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

struct NoKnownWorktrees;
impl WorktreeOracle for NoKnownWorktrees {
    fn is_known_worktree(&self, _path: &Path) -> bool {
        false
    }
}

struct Known(PathBuf);
impl WorktreeOracle for Known {
    fn is_known_worktree(&self, path: &Path) -> bool {
        path == self.0
    }
}

#[test]
fn nonexistent_path_is_created_in_commit_mode() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("fresh-repo");
    let placed = place(&target, &NoKnownWorktrees, false).expect("place");
    assert_eq!(placed, target);
    assert!(target.is_dir());
}

#[test]
fn nonexistent_path_is_not_created_in_dry_run_mode() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("fresh-repo");
    let placed = place(&target, &NoKnownWorktrees, true).expect("place");
    assert_eq!(placed, target);
    assert!(!target.exists());
}

#[test]
fn existing_plain_directory_is_reused() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("existing");
    std::fs::create_dir(&target).unwrap();
    let placed = place(&target, &NoKnownWorktrees, false).expect("place");
    assert_eq!(placed, target);
}

#[test]
fn existing_file_fails_in_commit_mode() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("not-a-dir");
    std::fs::write(&target, b"x").unwrap();
    let err = place(&target, &NoKnownWorktrees, false).unwrap_err();
    assert_eq!(err, PlaceError::InvalidDirectory);
}

#[test]
fn existing_file_gets_a_suffix_in_dry_run_mode() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("not-a-dir");
    std::fs::write(&target, b"x").unwrap();
    let placed = place(&target, &NoKnownWorktrees, true).expect("place");
    assert_eq!(placed, dir.path().join("not-a-dir-1"));
}

#[test]
fn known_worktree_fails_already_in_sync_in_commit_mode() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("repo");
    std::fs::create_dir(&target).unwrap();
    let oracle = Known(target.clone());
    let err = place(&target, &oracle, false).unwrap_err();
    assert_eq!(err, PlaceError::AlreadyInSync);
}

#[test]
fn known_worktree_gets_a_suffix_in_dry_run_mode() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("repo");
    std::fs::create_dir(&target).unwrap();
    let oracle = Known(target.clone());
    let placed = place(&target, &oracle, true).expect("place");
    assert_eq!(placed, dir.path().join("repo-1"));
}

#[test]
fn repeated_dry_run_calls_yield_n_distinct_paths() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("repo");
    std::fs::create_dir(&target).unwrap();
    let oracle = Known(target.clone());

    let mut seen = std::collections::HashSet::new();
    for _ in 0..10 {
        let placed = place(&target, &oracle, true).expect("place");
        assert!(seen.insert(placed), "dry run must not repeat a path");
    }
}

#[test]
fn trailing_separators_are_stripped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target_str = format!("{}{}", dir.path().join("repo").display(), std::path::MAIN_SEPARATOR);
    let placed = place(Path::new(&target_str), &NoKnownWorktrees, false).expect("place");
    assert_eq!(placed, dir.path().join("repo"));
}

#[yare::parameterized(
    exact_match = { "foo", "foo", true },
    prefix_match = { "foo", "foo-backup", true },
    byte_prefix_match = { "foo", "foobar", true },
    mismatch = { "bar", "foo", false },
)]
fn basename_prefix_check(basename: &str, repo_name: &str, expected: bool) {
    let path = PathBuf::from("/parent").join(basename);
    assert_eq!(basename_matches_repo_name(&path, repo_name), expected);
}

#[test]
fn root_path_has_no_basename_and_never_matches() {
    assert!(!basename_matches_repo_name(Path::new("/"), "foo"));
}
