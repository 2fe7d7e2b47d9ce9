// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The raw shape of a `CloneTasks` row, as read back from storage. Kept
//! distinct from `clonemgr_core::CloneTask` because a row only carries the
//! durable admission-time fields (state/error/tx_id/root_id are runtime-only
//! and never persisted — see the data model notes on why they're absent here).

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneTaskRow {
    pub repo_id: String,
    pub repo_name: String,
    pub token: String,
    pub peer_id: String,
    pub worktree_parent: String,
    pub passphrase: Option<String>,
    pub peer_addr: String,
    pub peer_port: String,
    pub email: String,
}
