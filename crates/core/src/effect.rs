// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Side effects the state machine asks the orchestrator to carry out.
//! The machine itself never calls a collaborator; it only describes what
//! should happen, in order, and the orchestrator (outside this crate)
//! executes the list against real or fake collaborators.

use crate::ids::{PeerId, RepoId, TxId};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RegisterPeer {
        peer_id: PeerId,
        addr: String,
        port: String,
    },
    ScheduleIndexJob {
        repo_id: RepoId,
        worktree: PathBuf,
        passphrase: Option<String>,
    },
    StartDownload {
        repo_id: RepoId,
        peer_id: PeerId,
        token: String,
    },
    CancelDownload {
        tx_id: TxId,
    },
    VerifyPassword {
        repo_id: RepoId,
        passphrase: Option<String>,
    },
    ScheduleCheckout {
        repo_id: RepoId,
        worktree: PathBuf,
    },
    ScheduleMerge {
        repo_id: RepoId,
        worktree: PathBuf,
        root_id: String,
    },
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::RegisterPeer { .. } => "register_peer",
            Effect::ScheduleIndexJob { .. } => "schedule_index_job",
            Effect::StartDownload { .. } => "start_download",
            Effect::CancelDownload { .. } => "cancel_download",
            Effect::VerifyPassword { .. } => "verify_password",
            Effect::ScheduleCheckout { .. } => "schedule_checkout",
            Effect::ScheduleMerge { .. } => "schedule_merge",
        }
    }

    /// Key/value pairs suitable for a structured log line.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::RegisterPeer { peer_id, addr, port } => vec![
                ("peer_id", peer_id.to_string()),
                ("addr", addr.clone()),
                ("port", port.clone()),
            ],
            Effect::ScheduleIndexJob { repo_id, worktree, passphrase } => vec![
                ("repo_id", repo_id.to_string()),
                ("worktree", worktree.display().to_string()),
                ("encrypted", passphrase.is_some().to_string()),
            ],
            Effect::StartDownload { repo_id, peer_id, .. } => vec![
                ("repo_id", repo_id.to_string()),
                ("peer_id", peer_id.to_string()),
            ],
            Effect::CancelDownload { tx_id } => vec![("tx_id", tx_id.to_string())],
            Effect::VerifyPassword { repo_id, passphrase } => vec![
                ("repo_id", repo_id.to_string()),
                ("has_passphrase", passphrase.is_some().to_string()),
            ],
            Effect::ScheduleCheckout { repo_id, worktree } => vec![
                ("repo_id", repo_id.to_string()),
                ("worktree", worktree.display().to_string()),
            ],
            Effect::ScheduleMerge { repo_id, worktree, root_id } => vec![
                ("repo_id", repo_id.to_string()),
                ("worktree", worktree.display().to_string()),
                ("root_id", root_id.clone()),
            ],
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
