// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The durable error taxonomy a task's `error` field can carry once it
//! has transitioned to `ERROR`, plus the synchronous admission-time
//! rejections `add_task` can return. These are deliberately separate
//! types: one annotates a task that ran and failed, the other rejects a
//! request before any task exists.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloneErrorKind {
    Connect,
    Index,
    Fetch,
    Password,
    Checkout,
    Merge,
    Internal,
}

crate::simple_display! {
    CloneErrorKind {
        Connect => "connect",
        Index => "index",
        Fetch => "fetch",
        Password => "password",
        Checkout => "checkout",
        Merge => "merge",
        Internal => "internal",
    }
}

/// Rejections returned synchronously from `add_task`, before any task is
/// admitted into the registry or durable store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddTaskError {
    #[error("Repo already exists")]
    RepoAlreadyExists,
    #[error("Task is already in progress")]
    TaskInProgress,
    #[error("Invalid local directory")]
    InvalidLocalDirectory,
    #[error("Already in sync")]
    AlreadyInSync,
    #[error("Invalid local directory name")]
    InvalidLocalDirectoryName,
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
