// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events that drive clone task transitions. Every asynchronous completion
//! from a collaborator (peer layer, transfer engine, repository store) and
//! every caller-triggered action (admit, cancel) arrives here as a tagged
//! variant, never as a bare callback.

use crate::ids::TxId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Fired once, synchronously, when a task is admitted.
    Admit {
        peer_connected: bool,
        worktree_nonempty: bool,
    },
    /// Fired by the connect poller when a CONNECT task's peer becomes reachable.
    PollConnected { worktree_nonempty: bool },
    IndexDone { root_id: String },
    IndexFailed,
    /// Fired immediately after `StartDownload` returns a transfer handle.
    DownloadStarted { tx_id: TxId },
    FetchCompleted { worktree_nonempty: bool },
    FetchCanceled,
    FetchErrored,
    /// Fired when the passphrase check ahead of checkout/merge fails or is missing.
    PasswordInvalid,
    CheckoutSucceeded,
    CheckoutFailed,
    MergeSucceeded,
    MergeFailed,
    CancelRequested,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Admit { .. } => "admit",
            Event::PollConnected { .. } => "poll_connected",
            Event::IndexDone { .. } => "index_done",
            Event::IndexFailed => "index_failed",
            Event::DownloadStarted { .. } => "download_started",
            Event::FetchCompleted { .. } => "fetch_completed",
            Event::FetchCanceled => "fetch_canceled",
            Event::FetchErrored => "fetch_errored",
            Event::PasswordInvalid => "password_invalid",
            Event::CheckoutSucceeded => "checkout_succeeded",
            Event::CheckoutFailed => "checkout_failed",
            Event::MergeSucceeded => "merge_succeeded",
            Event::MergeFailed => "merge_failed",
            Event::CancelRequested => "cancel_requested",
        }
    }

    pub fn log_summary(&self) -> String {
        match self {
            Event::Admit { peer_connected, worktree_nonempty } => {
                format!("admit peer_connected={peer_connected} worktree_nonempty={worktree_nonempty}")
            }
            Event::PollConnected { worktree_nonempty } => {
                format!("poll_connected worktree_nonempty={worktree_nonempty}")
            }
            Event::IndexDone { root_id } => format!("index_done root_id={root_id}"),
            Event::DownloadStarted { tx_id } => format!("download_started tx_id={tx_id}"),
            Event::FetchCompleted { worktree_nonempty } => {
                format!("fetch_completed worktree_nonempty={worktree_nonempty}")
            }
            other => other.name().to_string(),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
