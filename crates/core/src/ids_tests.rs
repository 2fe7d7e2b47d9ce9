// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn repo_id(n: usize) -> String {
    "r".repeat(n)
}

#[test]
fn repo_id_accepts_exact_length() {
    assert!(RepoId::new(repo_id(REPO_ID_LEN)).is_ok());
}

#[test]
fn repo_id_rejects_wrong_length() {
    let err = RepoId::new(repo_id(REPO_ID_LEN - 1)).unwrap_err();
    assert_eq!(err.kind, "repo_id");
    assert_eq!(err.expected, REPO_ID_LEN);
    assert_eq!(err.actual, REPO_ID_LEN - 1);
}

#[test]
fn peer_id_accepts_exact_length() {
    assert!(PeerId::new("p".repeat(PEER_ID_LEN)).is_ok());
}

#[test]
fn peer_id_rejects_wrong_length() {
    assert!(PeerId::new("p".repeat(PEER_ID_LEN + 1)).is_err());
}

#[test]
fn tx_id_is_opaque_and_unvalidated() {
    let tx = TxId::new("anything-goes");
    assert_eq!(tx.as_str(), "anything-goes");
    assert_eq!(tx.to_string(), "anything-goes");
}

#[test]
fn repo_id_display_matches_input() {
    let raw = repo_id(REPO_ID_LEN);
    let id = RepoId::new(raw.clone()).unwrap();
    assert_eq!(id.to_string(), raw);
    assert_eq!(id.as_str(), raw);
}
