// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `CloneManager`: the single-writer orchestrator that owns the task
//! registry and drives every transition by executing the effects the
//! state machine emits. All mutating entry points run one transition
//! (and its cascading follow-up events) to completion before returning;
//! nothing here holds a lock, because nothing else touches the registry.

use crate::collaborators::{
    worktree_is_nonempty, ConnectionService, RepoStatus, RepoStore, TransferService,
};
use crate::error::ManagerError;
use crate::registry::TaskRegistry;
use clonemgr_core::worktree::{basename_matches_repo_name, place};
use clonemgr_core::{
    transition, AddTaskError, Clock, CloneState, CloneTask, Effect, Event, PeerId, PlaceError,
    RepoId, WorktreeOracle,
};
use clonemgr_storage::TaskStore;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// How often CONNECT tasks are re-polled for peer reachability. Exposed so
/// the out-of-scope run loop can build its `tokio::time::interval` from it.
pub const CONNECT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// The three outcomes the transfer engine reports for this task's `tx_id`,
/// bundled behind one sink method the way the original `repo-fetched`
/// signal handler branches on a single completion callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Completed { worktree_nonempty: bool },
    Canceled,
    Errored,
}

struct RegistryOracle<'a> {
    registry: &'a TaskRegistry,
    repo_store: &'a dyn RepoStore,
}

impl WorktreeOracle for RegistryOracle<'_> {
    fn is_known_worktree(&self, path: &Path) -> bool {
        self.registry
            .iter()
            .any(|task| !task.state.is_terminal() && task.worktree == path)
            || self.repo_store.is_worktree_of_known_repo(path)
    }
}

pub struct CloneManager<C: Clock> {
    registry: TaskRegistry,
    store: Arc<dyn TaskStore>,
    connection: Arc<dyn ConnectionService>,
    transfer: Arc<dyn TransferService>,
    repo_store: Arc<dyn RepoStore>,
    clock: C,
}

impl<C: Clock> CloneManager<C> {
    pub fn new(
        store: Arc<dyn TaskStore>,
        connection: Arc<dyn ConnectionService>,
        transfer: Arc<dyn TransferService>,
        repo_store: Arc<dyn RepoStore>,
        clock: C,
    ) -> Self {
        Self {
            registry: TaskRegistry::new(),
            store,
            connection,
            transfer,
            repo_store,
            clock,
        }
    }

    pub fn get_task(&self, repo_id: &RepoId) -> Option<&CloneTask> {
        self.registry.lookup(repo_id)
    }

    pub fn list_tasks(&self) -> impl Iterator<Item = &CloneTask> {
        self.registry.iter()
    }

    /// True once `CONNECT_POLL_INTERVAL` has elapsed since `last_poll`.
    /// Lets the connect poller's cadence be exercised against a `FakeClock`
    /// without a test ever sleeping on a wall clock.
    pub fn should_poll(&self, last_poll: Instant) -> bool {
        self.clock.now().duration_since(last_poll) >= CONNECT_POLL_INTERVAL
    }

    /// Dry-run worktree path generation. Never touches the filesystem and
    /// never fails in practice (`-N` suffixes are bounded only by `u32::MAX`).
    pub fn gen_default_worktree(
        &self,
        parent: &Path,
        repo_name: &str,
    ) -> Result<PathBuf, PlaceError> {
        let requested = parent.join(repo_name);
        let oracle = RegistryOracle { registry: &self.registry, repo_store: self.repo_store.as_ref() };
        place(&requested, &oracle, true)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn add_task(
        &mut self,
        repo_id: RepoId,
        peer_id: PeerId,
        repo_name: impl Into<String>,
        token: impl Into<String>,
        passphrase: Option<String>,
        worktree_parent: &Path,
        peer_addr: impl Into<String>,
        peer_port: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<RepoId, AddTaskError> {
        let repo_name = repo_name.into();

        if let Some(existing) = self.registry.lookup(&repo_id) {
            if !existing.state.is_terminal() {
                return Err(AddTaskError::TaskInProgress);
            }
        }

        let status = self.repo_store.status(&repo_id).await;
        if status == RepoStatus::PresentWithHead {
            return Err(AddTaskError::RepoAlreadyExists);
        }

        if !basename_matches_repo_name(worktree_parent, &repo_name) {
            return Err(AddTaskError::InvalidLocalDirectoryName);
        }

        let worktree = {
            let oracle = RegistryOracle { registry: &self.registry, repo_store: self.repo_store.as_ref() };
            place(worktree_parent, &oracle, false).map_err(|e| match e {
                PlaceError::InvalidDirectory => AddTaskError::InvalidLocalDirectory,
                PlaceError::AlreadyInSync => AddTaskError::AlreadyInSync,
                other => AddTaskError::Internal(other.to_string()),
            })?
        };

        let mut task = CloneTask::new(
            repo_id.clone(),
            peer_id.clone(),
            repo_name,
            token,
            worktree.clone(),
            peer_addr,
            peer_port,
            email,
        );
        if let Some(passphrase) = passphrase {
            task = task.with_passphrase(passphrase);
        }

        self.store
            .upsert(&task)
            .map_err(|e| AddTaskError::Internal(e.to_string()))?;
        self.registry.insert_or_replace(task);

        let worktree_nonempty = worktree_is_nonempty(&worktree);

        // Repo already present but never checked out: a prior run fetched
        // it and crashed before entering CHECKOUT/MERGE. Reuse the
        // fetch-completion fork directly from INIT instead of re-fetching.
        if status == RepoStatus::PresentNoHead {
            self.apply(repo_id.clone(), Event::FetchCompleted { worktree_nonempty })
                .await
                .map_err(|e| AddTaskError::Internal(e.to_string()))?;
            return Ok(repo_id);
        }

        let peer_connected = self.connection.is_connected(&peer_id).await;
        self.apply(
            repo_id.clone(),
            Event::Admit { peer_connected, worktree_nonempty },
        )
        .await
        .map_err(|e| AddTaskError::Internal(e.to_string()))?;

        Ok(repo_id)
    }

    pub async fn cancel_task(&mut self, repo_id: &RepoId) -> Result<(), ManagerError> {
        let task = self
            .registry
            .lookup(repo_id)
            .ok_or_else(|| ManagerError::NotFound(repo_id.to_string()))?;
        if task.state.is_terminal() || task.state == CloneState::CancelPending {
            return Ok(());
        }
        self.apply(repo_id.clone(), Event::CancelRequested).await
    }

    pub async fn remove_task(&mut self, repo_id: &RepoId) -> Result<(), ManagerError> {
        let task = self
            .registry
            .lookup(repo_id)
            .ok_or_else(|| ManagerError::NotFound(repo_id.to_string()))?;
        if !task.state.is_terminal() {
            return Err(ManagerError::TaskInProgress);
        }
        if let Some(tx_id) = task.tx_id.clone() {
            self.transfer.remove(&tx_id).await;
        }
        self.registry.remove(repo_id);
        Ok(())
    }

    /// Sink for the transfer engine's completion callback on this task's `tx_id`.
    pub async fn on_repo_fetched(
        &mut self,
        repo_id: RepoId,
        outcome: FetchOutcome,
    ) -> Result<(), ManagerError> {
        let event = match outcome {
            FetchOutcome::Completed { worktree_nonempty } => {
                Event::FetchCompleted { worktree_nonempty }
            }
            FetchOutcome::Canceled => Event::FetchCanceled,
            FetchOutcome::Errored => Event::FetchErrored,
        };
        self.apply(repo_id, event).await
    }

    /// Sink for the repository store's checkout-completion callback.
    pub async fn on_checkout_done(
        &mut self,
        repo_id: RepoId,
        success: bool,
    ) -> Result<(), ManagerError> {
        let event = if success { Event::CheckoutSucceeded } else { Event::CheckoutFailed };
        self.apply(repo_id, event).await
    }

    /// Re-check peer connectivity for every CONNECT task. The only thing
    /// that advances CONNECT; there is no event-driven connect callback.
    pub async fn tick_connect_poll(&mut self) -> Result<(), ManagerError> {
        let pending: Vec<RepoId> = self
            .registry
            .iter()
            .filter(|task| task.state == CloneState::Connect)
            .map(|task| task.repo_id.clone())
            .collect();

        for repo_id in pending {
            let Some(task) = self.registry.lookup(&repo_id) else { continue };
            if self.connection.is_connected(&task.peer_id).await {
                let worktree_nonempty = worktree_is_nonempty(&task.worktree);
                self.apply(repo_id, Event::PollConnected { worktree_nonempty }).await?;
            }
        }
        Ok(())
    }

    /// Reconstruct every durable row into a registry entry and dispatch it
    /// according to what actually landed on disk while the daemon was down.
    pub async fn recover(&mut self) -> Result<(), ManagerError> {
        for row in self.store.enumerate()? {
            let repo_id = row.repo_id()?;
            let peer_id = row.peer_id()?;
            let worktree = PathBuf::from(&row.worktree_parent);

            let mut task = CloneTask::new(
                repo_id.clone(),
                peer_id.clone(),
                row.repo_name.clone(),
                row.token.clone(),
                worktree.clone(),
                row.peer_addr.clone(),
                row.peer_port.clone(),
                row.email.clone(),
            );
            if let Some(passphrase) = row.passphrase.clone() {
                task = task.with_passphrase(passphrase);
            }
            self.registry.insert_or_replace(task);

            match self.repo_store.status(&repo_id).await {
                RepoStatus::PresentWithHead => {
                    // The repository already has a head: this run already
                    // finished before the crash. No `Event` models "recovery
                    // discovered completion" — this is a one-time startup
                    // reconciliation, not a live transition, so it bypasses
                    // `transition` and writes the terminal state directly.
                    if let Some(task) = self.registry.lookup_mut(&repo_id) {
                        task.state = CloneState::Done;
                    }
                    if let Err(e) = self.store.delete(&repo_id) {
                        warn!(%repo_id, error = %e, "failed to delete durable row during recovery");
                    }
                }
                RepoStatus::PresentNoHead => {
                    let worktree_nonempty = worktree_is_nonempty(&worktree);
                    self.apply(repo_id, Event::FetchCompleted { worktree_nonempty }).await?;
                }
                RepoStatus::Absent => {
                    let peer_connected = self.connection.is_connected(&peer_id).await;
                    let worktree_nonempty = worktree_is_nonempty(&worktree);
                    self.apply(repo_id, Event::Admit { peer_connected, worktree_nonempty }).await?;
                }
            }
        }
        Ok(())
    }

    /// Run `event` through the state machine, persist the result, and keep
    /// draining follow-up events (an effect's own completion, fed straight
    /// back in) until the queue is empty.
    async fn apply(&mut self, repo_id: RepoId, event: Event) -> Result<(), ManagerError> {
        let mut queue: VecDeque<(RepoId, Event)> = VecDeque::new();
        queue.push_back((repo_id, event));

        while let Some((repo_id, event)) = queue.pop_front() {
            let Some(task) = self.registry.lookup(&repo_id).cloned() else {
                continue;
            };
            info!(%repo_id, event = event.name(), summary = %event.log_summary(), "applying event");

            let (next, effects) = transition(&task, event);

            if next.state.is_terminal() {
                if let Err(e) = self.store.delete(&repo_id) {
                    warn!(%repo_id, error = %e, "failed to delete durable row on terminal transition");
                }
            } else if let Err(e) = self.store.upsert(&next) {
                warn!(%repo_id, error = %e, "failed to persist task");
            }
            self.registry.insert_or_replace(next.clone());

            for effect in effects {
                info!(%repo_id, effect = effect.name(), fields = ?effect.fields(), "executing effect");
                if let Some(follow_up) = self.execute_effect(&next, effect).await {
                    queue.push_back((repo_id.clone(), follow_up));
                    break;
                }
            }
        }
        Ok(())
    }

    /// Run one effect against the real collaborators, returning the event
    /// (if any) its completion feeds back into the machine.
    async fn execute_effect(&self, task: &CloneTask, effect: Effect) -> Option<Event> {
        match effect {
            Effect::RegisterPeer { peer_id, addr, port } => {
                self.connection.register(&peer_id, &addr, &port).await;
                None
            }
            Effect::ScheduleIndexJob { repo_id, worktree, passphrase } => {
                match self
                    .repo_store
                    .index_worktree(&repo_id, &worktree, passphrase.as_deref())
                    .await
                {
                    Ok(root_id) => Some(Event::IndexDone { root_id }),
                    Err(()) => Some(Event::IndexFailed),
                }
            }
            Effect::StartDownload { repo_id, peer_id, token } => {
                match self.transfer.add_download(&repo_id, &peer_id, &token).await {
                    Ok(tx_id) => Some(Event::DownloadStarted { tx_id }),
                    Err(_) => Some(Event::FetchErrored),
                }
            }
            Effect::CancelDownload { tx_id } => {
                self.transfer.cancel(&tx_id).await;
                None
            }
            Effect::VerifyPassword { repo_id, passphrase } => {
                if !self.repo_store.is_encrypted(&repo_id).await {
                    return None;
                }
                let verified = self.repo_store.verify_passphrase(&repo_id, passphrase.as_deref()).await;
                if verified {
                    None
                } else {
                    Some(Event::PasswordInvalid)
                }
            }
            Effect::ScheduleCheckout { repo_id, worktree } => {
                self.repo_store
                    .set_metadata(&repo_id, &task.token, &task.email, &task.peer_addr, &task.peer_port)
                    .await;
                self.repo_store.request_checkout(&repo_id, &worktree).await;
                None
            }
            Effect::ScheduleMerge { repo_id, worktree, root_id } => {
                self.repo_store
                    .set_metadata(&repo_id, &task.token, &task.email, &task.peer_addr, &task.peer_port)
                    .await;
                if self.repo_store.merge(&repo_id, &worktree, &root_id).await {
                    Some(Event::MergeSucceeded)
                } else {
                    Some(Event::MergeFailed)
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
