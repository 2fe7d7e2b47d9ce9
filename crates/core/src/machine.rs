// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The clone task state machine: a single pure function from
//! `(task, event)` to `(task, effects)`. No I/O happens here; every
//! external call the orchestrator must make comes back as an `Effect`
//! in the returned list, in the order they should run.

use crate::effect::Effect;
use crate::error::CloneErrorKind;
use crate::event::Event;
#[cfg(test)]
use crate::ids::TxId;
use crate::state::CloneState;
use crate::task::CloneTask;

/// Apply `event` to `task`, returning the task in its new state plus the
/// effects the orchestrator must execute. `task` is not mutated in place;
/// the caller is expected to persist the returned task.
pub fn transition(task: &CloneTask, event: Event) -> (CloneTask, Vec<Effect>) {
    let mut next = task.clone();

    // Terminal states never leave; any event here is stale (e.g. a job
    // completion that arrived after cancellation already finalized).
    if task.state.is_terminal() {
        return (next, Vec::new());
    }

    let (state, error, effects, tx_id, root_id) = match (task.state, event) {
        (CloneState::Init, Event::Admit { peer_connected: false, .. }) => (
            CloneState::Connect,
            None,
            vec![Effect::RegisterPeer {
                peer_id: task.peer_id.clone(),
                addr: task.peer_addr.clone(),
                port: task.peer_port.clone(),
            }],
            None,
            None,
        ),
        (CloneState::Init, Event::Admit { peer_connected: true, worktree_nonempty: true }) => (
            CloneState::Index,
            None,
            vec![schedule_index(task)],
            None,
            None,
        ),
        (CloneState::Init, Event::Admit { peer_connected: true, worktree_nonempty: false }) => {
            (CloneState::Fetch, None, vec![start_download(task)], None, None)
        }

        (CloneState::Connect, Event::PollConnected { worktree_nonempty: true }) => {
            (CloneState::Index, None, vec![schedule_index(task)], None, None)
        }
        (CloneState::Connect, Event::PollConnected { worktree_nonempty: false }) => {
            (CloneState::Fetch, None, vec![start_download(task)], None, None)
        }

        (CloneState::Index, Event::IndexDone { root_id }) => (
            CloneState::Fetch,
            None,
            vec![start_download(task)],
            None,
            Some(root_id),
        ),
        (CloneState::Index, Event::IndexFailed) => {
            (CloneState::Error, Some(CloneErrorKind::Index), vec![], None, None)
        }

        (CloneState::Fetch, Event::DownloadStarted { tx_id }) => {
            (CloneState::Fetch, None, vec![], Some(tx_id), None)
        }
        // Also reachable directly from INIT: admission finds the repo already
        // fetched but never checked out (a prior run crashed after FETCH).
        (CloneState::Fetch | CloneState::Init, Event::FetchCompleted { worktree_nonempty: false }) => (
            CloneState::Checkout,
            None,
            vec![
                Effect::VerifyPassword {
                    repo_id: task.repo_id.clone(),
                    passphrase: task.passphrase.clone(),
                },
                Effect::ScheduleCheckout {
                    repo_id: task.repo_id.clone(),
                    worktree: task.worktree.clone(),
                },
            ],
            None,
            None,
        ),
        (CloneState::Fetch | CloneState::Init, Event::FetchCompleted { worktree_nonempty: true }) => (
            CloneState::Merge,
            None,
            vec![
                Effect::VerifyPassword {
                    repo_id: task.repo_id.clone(),
                    passphrase: task.passphrase.clone(),
                },
                Effect::ScheduleMerge {
                    repo_id: task.repo_id.clone(),
                    worktree: task.worktree.clone(),
                    root_id: task.root_id.clone(),
                },
            ],
            None,
            None,
        ),
        (CloneState::Fetch, Event::FetchCanceled) => (CloneState::Canceled, None, vec![], None, None),
        (CloneState::Fetch, Event::FetchErrored) => {
            (CloneState::Error, Some(CloneErrorKind::Fetch), vec![], None, None)
        }

        (CloneState::Checkout, Event::PasswordInvalid) => {
            (CloneState::Error, Some(CloneErrorKind::Password), vec![], None, None)
        }
        (CloneState::Checkout, Event::CheckoutSucceeded) => {
            (CloneState::Done, None, vec![], None, None)
        }
        (CloneState::Checkout, Event::CheckoutFailed) => {
            (CloneState::Error, Some(CloneErrorKind::Checkout), vec![], None, None)
        }

        (CloneState::Merge, Event::PasswordInvalid) => {
            (CloneState::Error, Some(CloneErrorKind::Password), vec![], None, None)
        }
        (CloneState::Merge, Event::MergeSucceeded) => (CloneState::Done, None, vec![], None, None),
        (CloneState::Merge, Event::MergeFailed) => {
            (CloneState::Error, Some(CloneErrorKind::Merge), vec![], None, None)
        }

        // Cooperative cancellation: immediate while nothing is in flight,
        // cancel-then-wait while a job or transfer owns the worktree.
        (CloneState::Init | CloneState::Connect, Event::CancelRequested) => {
            (CloneState::Canceled, None, vec![], None, None)
        }
        (CloneState::Fetch, Event::CancelRequested) => (
            CloneState::CancelPending,
            None,
            match &task.tx_id {
                Some(tx_id) => vec![Effect::CancelDownload { tx_id: tx_id.clone() }],
                None => vec![],
            },
            None,
            None,
        ),
        (CloneState::Index | CloneState::Checkout | CloneState::Merge, Event::CancelRequested) => {
            (CloneState::CancelPending, None, vec![], None, None)
        }

        // CANCEL_PENDING absorbs whatever the in-flight job or transfer
        // reports and always finalizes to CANCELED.
        (CloneState::CancelPending, _) => (CloneState::Canceled, None, vec![], None, None),

        // Anything else is an event that cannot occur for this state under
        // a correct orchestrator; leave the task untouched rather than panic.
        (state, _) => (state, task.error, vec![], None, None),
    };

    next.state = state;
    next.error = error;
    if let Some(tx_id) = tx_id {
        next.tx_id = Some(tx_id);
    }
    if let Some(root_id) = root_id {
        next.root_id = root_id;
    }
    (next, effects)
}

fn schedule_index(task: &CloneTask) -> Effect {
    Effect::ScheduleIndexJob {
        repo_id: task.repo_id.clone(),
        worktree: task.worktree.clone(),
        passphrase: task.passphrase.clone(),
    }
}

fn start_download(task: &CloneTask) -> Effect {
    Effect::StartDownload {
        repo_id: task.repo_id.clone(),
        peer_id: task.peer_id.clone(),
        token: task.token.clone(),
    }
}

#[cfg(test)]
#[path = "machine_tests.rs"]
mod tests;
