// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic in-memory fakes for the collaborator traits. Used by this
//! crate's own tests and by the root integration-test crate; no production
//! code depends on this module.

use crate::collaborators::{
    ConnectionService, RepoStatus, RepoStore, TransferError, TransferService,
};
use async_trait::async_trait;
use clonemgr_core::{PeerId, RepoId, TxId};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Peer connectivity a test controls directly: connected unless told otherwise.
#[derive(Default)]
pub struct FakeConnectionService {
    connected: Mutex<HashSet<PeerId>>,
    registrations: Mutex<Vec<(PeerId, String, String)>>,
}

impl FakeConnectionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_connected(&self, peer_id: PeerId) {
        self.connected.lock().unwrap().insert(peer_id);
    }

    pub fn registrations(&self) -> Vec<(PeerId, String, String)> {
        self.registrations.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConnectionService for FakeConnectionService {
    async fn is_connected(&self, peer_id: &PeerId) -> bool {
        self.connected.lock().unwrap().contains(peer_id)
    }

    async fn register(&self, peer_id: &PeerId, addr: &str, port: &str) {
        self.registrations
            .lock()
            .unwrap()
            .push((peer_id.clone(), addr.to_string(), port.to_string()));
        // Registering a previously-unknown peer is how the real connection
        // layer eventually reaches CONNECTED; the fake does it immediately
        // so the next poll tick observes it.
        self.connected.lock().unwrap().insert(peer_id.clone());
    }
}

#[derive(Default)]
pub struct FakeTransferService {
    next_tx: AtomicU64,
    refuse: Mutex<HashSet<RepoId>>,
    canceled: Mutex<HashSet<TxId>>,
    removed: Mutex<HashSet<TxId>>,
}

impl FakeTransferService {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `add_download` call for `repo_id` fails with `Refused`.
    pub fn refuse_next_download_for(&self, repo_id: RepoId) {
        self.refuse.lock().unwrap().insert(repo_id);
    }

    pub fn was_canceled(&self, tx_id: &TxId) -> bool {
        self.canceled.lock().unwrap().contains(tx_id)
    }

    pub fn was_removed(&self, tx_id: &TxId) -> bool {
        self.removed.lock().unwrap().contains(tx_id)
    }
}

#[async_trait]
impl TransferService for FakeTransferService {
    async fn add_download(
        &self,
        repo_id: &RepoId,
        _peer_id: &PeerId,
        _token: &str,
    ) -> Result<TxId, TransferError> {
        if self.refuse.lock().unwrap().remove(repo_id) {
            return Err(TransferError::Refused);
        }
        let n = self.next_tx.fetch_add(1, Ordering::SeqCst);
        Ok(TxId::new(format!("tx-{n}")))
    }

    async fn cancel(&self, tx_id: &TxId) {
        self.canceled.lock().unwrap().insert(tx_id.clone());
    }

    async fn remove(&self, tx_id: &TxId) {
        self.removed.lock().unwrap().insert(tx_id.clone());
    }
}

#[derive(Clone)]
struct RepoConfig {
    status: RepoStatus,
    encrypted: bool,
    passphrase: Option<String>,
    index_result: Result<String, ()>,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            status: RepoStatus::Absent,
            encrypted: false,
            passphrase: None,
            index_result: Ok("f".repeat(40)),
        }
    }
}

/// Controls what the repository store reports for each repo id. Every repo
/// starts `Absent`, unencrypted, and indexes successfully.
#[derive(Default)]
pub struct FakeRepoStore {
    configs: Mutex<HashMap<RepoId, RepoConfig>>,
    metadata_calls: Mutex<Vec<RepoId>>,
    checkout_requests: Mutex<Vec<(RepoId, PathBuf)>>,
    merge_result: Mutex<Option<bool>>,
    known_worktrees: Mutex<HashSet<PathBuf>>,
}

impl FakeRepoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&self, repo_id: RepoId, status: RepoStatus) {
        self.configs.lock().unwrap().entry(repo_id).or_default().status = status;
    }

    /// Marks `worktree` as already belonging to some other known repo.
    pub fn add_known_worktree(&self, worktree: PathBuf) {
        self.known_worktrees.lock().unwrap().insert(worktree);
    }

    pub fn set_encrypted(&self, repo_id: RepoId, passphrase: impl Into<String>) {
        let mut configs = self.configs.lock().unwrap();
        let cfg = configs.entry(repo_id).or_default();
        cfg.encrypted = true;
        cfg.passphrase = Some(passphrase.into());
    }

    pub fn set_index_result(&self, repo_id: RepoId, result: Result<String, ()>) {
        self.configs.lock().unwrap().entry(repo_id).or_default().index_result = result;
    }

    pub fn set_merge_result(&self, ok: bool) {
        *self.merge_result.lock().unwrap() = Some(ok);
    }

    pub fn checkout_requests(&self) -> Vec<(RepoId, PathBuf)> {
        self.checkout_requests.lock().unwrap().clone()
    }

    pub fn metadata_calls(&self) -> Vec<RepoId> {
        self.metadata_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepoStore for FakeRepoStore {
    fn is_worktree_of_known_repo(&self, worktree: &Path) -> bool {
        self.known_worktrees.lock().unwrap().contains(worktree)
    }

    async fn status(&self, repo_id: &RepoId) -> RepoStatus {
        self.configs
            .lock()
            .unwrap()
            .get(repo_id)
            .map(|c| c.status)
            .unwrap_or(RepoStatus::Absent)
    }

    async fn is_encrypted(&self, repo_id: &RepoId) -> bool {
        self.configs.lock().unwrap().get(repo_id).map(|c| c.encrypted).unwrap_or(false)
    }

    async fn verify_passphrase(&self, repo_id: &RepoId, passphrase: Option<&str>) -> bool {
        match self.configs.lock().unwrap().get(repo_id) {
            Some(cfg) if cfg.encrypted => cfg.passphrase.as_deref() == passphrase,
            _ => true,
        }
    }

    async fn set_metadata(
        &self,
        repo_id: &RepoId,
        _token: &str,
        _email: &str,
        _peer_addr: &str,
        _peer_port: &str,
    ) {
        self.metadata_calls.lock().unwrap().push(repo_id.clone());
    }

    async fn index_worktree(
        &self,
        repo_id: &RepoId,
        _worktree: &Path,
        _passphrase: Option<&str>,
    ) -> Result<String, ()> {
        self.configs
            .lock()
            .unwrap()
            .get(repo_id)
            .map(|c| c.index_result.clone())
            .unwrap_or(Ok("f".repeat(40)))
    }

    async fn request_checkout(&self, repo_id: &RepoId, worktree: &Path) {
        self.checkout_requests.lock().unwrap().push((repo_id.clone(), worktree.to_path_buf()));
    }

    async fn merge(&self, _repo_id: &RepoId, _worktree: &Path, _root_id: &str) -> bool {
        self.merge_result.lock().unwrap().unwrap_or(true)
    }
}
