// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn name_is_stable_for_logging() {
    assert_eq!(Event::IndexFailed.name(), "index_failed");
    assert_eq!(Event::CancelRequested.name(), "cancel_requested");
}

#[test]
fn log_summary_includes_payload_for_data_carrying_variants() {
    let event = Event::Admit { peer_connected: true, worktree_nonempty: false };
    assert_eq!(
        event.log_summary(),
        "admit peer_connected=true worktree_nonempty=false"
    );
}

#[test]
fn log_summary_falls_back_to_name_for_unit_variants() {
    assert_eq!(Event::MergeFailed.log_summary(), "merge_failed");
}

#[test]
fn download_started_summary_includes_tx_id() {
    let event = Event::DownloadStarted { tx_id: TxId::new("tx-1") };
    assert_eq!(event.log_summary(), "download_started tx_id=tx-1");
}
