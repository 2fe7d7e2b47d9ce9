// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trait boundaries for the three external collaborators the orchestrator
//! drives: the peer/connection layer, the transfer engine, and the
//! repository store. None of these are implemented by this crate — the
//! real subsystems live outside its scope; only deterministic fakes for
//! this crate's own tests live here (see `fakes` under `test-support`).

use async_trait::async_trait;
use clonemgr_core::{PeerId, RepoId, TxId};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("peer refused the download request")]
    Refused,
    #[error("transfer engine error: {0}")]
    Other(String),
}

/// Peer connectivity and relay registration.
#[async_trait]
pub trait ConnectionService: Send + Sync {
    async fn is_connected(&self, peer_id: &PeerId) -> bool;
    async fn register(&self, peer_id: &PeerId, addr: &str, port: &str);
}

/// The bulk object transfer engine.
#[async_trait]
pub trait TransferService: Send + Sync {
    async fn add_download(
        &self,
        repo_id: &RepoId,
        peer_id: &PeerId,
        token: &str,
    ) -> Result<TxId, TransferError>;
    async fn cancel(&self, tx_id: &TxId);
    async fn remove(&self, tx_id: &TxId);
}

/// Whether a repository is present locally and, if so, whether it has
/// completed at least one checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoStatus {
    Absent,
    PresentNoHead,
    PresentWithHead,
}

/// Index/checkout/merge primitives exposed by the repository store. These
/// run on the job executor; the orchestrator awaits them without blocking
/// its own event handling.
#[async_trait]
pub trait RepoStore: Send + Sync {
    /// Synchronous membership check against the repository manager's
    /// in-memory list of already-known repos: is `worktree` the worktree of
    /// one of them? Backs the worktree placer's oracle alongside the task
    /// registry so admission can't silently reuse another repo's directory.
    fn is_worktree_of_known_repo(&self, worktree: &Path) -> bool;

    async fn status(&self, repo_id: &RepoId) -> RepoStatus;
    async fn is_encrypted(&self, repo_id: &RepoId) -> bool;
    async fn verify_passphrase(&self, repo_id: &RepoId, passphrase: Option<&str>) -> bool;
    async fn set_metadata(
        &self,
        repo_id: &RepoId,
        token: &str,
        email: &str,
        peer_addr: &str,
        peer_port: &str,
    );
    /// Index the pre-existing worktree, returning the resulting tree hash.
    async fn index_worktree(
        &self,
        repo_id: &RepoId,
        worktree: &Path,
        passphrase: Option<&str>,
    ) -> Result<String, ()>;
    /// Request a checkout into an empty worktree. Unlike `index_worktree`/
    /// `merge`, this does not return the outcome: the checkout worker
    /// reports completion asynchronously through `CloneManager::on_checkout_done`,
    /// mirroring the `checkout-done` event named in the external interfaces.
    async fn request_checkout(&self, repo_id: &RepoId, worktree: &Path);
    async fn merge(&self, repo_id: &RepoId, worktree: &Path, root_id: &str) -> bool;
}

/// Pure filesystem check: is there already content in this directory?
/// Deliberately not part of `RepoStore` — it doesn't touch the repository,
/// only the candidate worktree.
pub fn worktree_is_nonempty(worktree: &Path) -> bool {
    std::fs::read_dir(worktree)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}
