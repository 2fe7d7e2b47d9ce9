// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Failures from `cancel_task`/`remove_task`/recovery that aren't admission
/// rejections (those are `clonemgr_core::AddTaskError`).
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("no such task: {0}")]
    NotFound(String),
    #[error("Task is already in progress")]
    TaskInProgress,
    #[error(transparent)]
    Store(#[from] clonemgr_storage::StoreError),
    #[error(transparent)]
    Place(#[from] clonemgr_core::PlaceError),
}
