// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `CloneTask` data model (see the data model section of the design doc).

use crate::error::CloneErrorKind;
use crate::ids::{PeerId, RepoId, TxId};
use crate::state::CloneState;
use std::path::PathBuf;

/// An all-zero tree hash, used as the sentinel "nothing indexed yet" value
/// for `root_id` and as the empty-tree merge ancestor.
pub const ZERO_ROOT_ID: &str = "0000000000000000000000000000000000000000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneTask {
    pub repo_id: RepoId,
    pub peer_id: PeerId,
    pub repo_name: String,
    pub token: String,
    pub worktree: PathBuf,
    pub passphrase: Option<String>,
    pub peer_addr: String,
    pub peer_port: String,
    pub email: String,
    pub state: CloneState,
    pub error: Option<CloneErrorKind>,
    pub tx_id: Option<TxId>,
    pub root_id: String,
}

impl CloneTask {
    /// A freshly admitted task: INIT, no error, no transfer handle, unindexed.
    pub fn new(
        repo_id: RepoId,
        peer_id: PeerId,
        repo_name: impl Into<String>,
        token: impl Into<String>,
        worktree: PathBuf,
        peer_addr: impl Into<String>,
        peer_port: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            repo_id,
            peer_id,
            repo_name: repo_name.into(),
            token: token.into(),
            worktree,
            passphrase: None,
            peer_addr: peer_addr.into(),
            peer_port: peer_port.into(),
            email: email.into(),
            state: CloneState::Init,
            error: None,
            tx_id: None,
            root_id: ZERO_ROOT_ID.to_string(),
        }
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }
}

#[cfg(any(test, feature = "test-support"))]
pub struct CloneTaskBuilder {
    repo_id: String,
    peer_id: String,
    repo_name: String,
    token: String,
    worktree: PathBuf,
    passphrase: Option<String>,
    peer_addr: String,
    peer_port: String,
    email: String,
    state: CloneState,
    error: Option<CloneErrorKind>,
    tx_id: Option<TxId>,
    root_id: String,
}

#[cfg(any(test, feature = "test-support"))]
impl Default for CloneTaskBuilder {
    fn default() -> Self {
        Self {
            repo_id: "r".repeat(crate::ids::REPO_ID_LEN),
            peer_id: "p".repeat(crate::ids::PEER_ID_LEN),
            repo_name: "example-repo".to_string(),
            token: "token".to_string(),
            worktree: PathBuf::from("/tmp/example-repo"),
            passphrase: None,
            peer_addr: "127.0.0.1".to_string(),
            peer_port: "10001".to_string(),
            email: "user@example.com".to_string(),
            state: CloneState::Init,
            error: None,
            tx_id: None,
            root_id: ZERO_ROOT_ID.to_string(),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl CloneTaskBuilder {
    pub fn repo_id(mut self, v: impl Into<String>) -> Self {
        self.repo_id = v.into();
        self
    }

    pub fn peer_id(mut self, v: impl Into<String>) -> Self {
        self.peer_id = v.into();
        self
    }

    pub fn repo_name(mut self, v: impl Into<String>) -> Self {
        self.repo_name = v.into();
        self
    }

    pub fn worktree(mut self, v: impl Into<PathBuf>) -> Self {
        self.worktree = v.into();
        self
    }

    pub fn passphrase(mut self, v: impl Into<String>) -> Self {
        self.passphrase = Some(v.into());
        self
    }

    pub fn state(mut self, v: CloneState) -> Self {
        self.state = v;
        self
    }

    pub fn error(mut self, v: CloneErrorKind) -> Self {
        self.error = Some(v);
        self
    }

    pub fn tx_id(mut self, v: impl Into<String>) -> Self {
        self.tx_id = Some(TxId::new(v.into()));
        self
    }

    pub fn root_id(mut self, v: impl Into<String>) -> Self {
        self.root_id = v.into();
        self
    }

    pub fn build(self) -> CloneTask {
        CloneTask {
            repo_id: RepoId::new(self.repo_id).expect("test repo_id has valid length"),
            peer_id: PeerId::new(self.peer_id).expect("test peer_id has valid length"),
            repo_name: self.repo_name,
            token: self.token,
            worktree: self.worktree,
            passphrase: self.passphrase,
            peer_addr: self.peer_addr,
            peer_port: self.peer_port,
            email: self.email,
            state: self.state,
            error: self.error,
            tx_id: self.tx_id,
            root_id: self.root_id,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl CloneTask {
    pub fn builder() -> CloneTaskBuilder {
        CloneTaskBuilder::default()
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
