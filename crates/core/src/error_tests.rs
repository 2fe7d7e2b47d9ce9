// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    connect = { CloneErrorKind::Connect, "connect" },
    index = { CloneErrorKind::Index, "index" },
    fetch = { CloneErrorKind::Fetch, "fetch" },
    password = { CloneErrorKind::Password, "password" },
    checkout = { CloneErrorKind::Checkout, "checkout" },
    merge = { CloneErrorKind::Merge, "merge" },
    internal = { CloneErrorKind::Internal, "internal" },
)]
fn error_kind_display_matches_stable_string(kind: CloneErrorKind, expected: &str) {
    assert_eq!(kind.to_string(), expected);
}

#[test]
fn add_task_error_messages_are_stable() {
    assert_eq!(AddTaskError::RepoAlreadyExists.to_string(), "Repo already exists");
    assert_eq!(AddTaskError::TaskInProgress.to_string(), "Task is already in progress");
    assert_eq!(AddTaskError::InvalidLocalDirectory.to_string(), "Invalid local directory");
    assert_eq!(
        AddTaskError::InvalidLocalDirectoryName.to_string(),
        "Invalid local directory name"
    );
}
