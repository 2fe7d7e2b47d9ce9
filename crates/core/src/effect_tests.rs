// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn repo_id() -> RepoId {
    RepoId::new("r".repeat(36)).unwrap()
}

fn peer_id() -> PeerId {
    PeerId::new("p".repeat(40)).unwrap()
}

#[test]
fn every_variant_has_a_distinct_name() {
    let effects = vec![
        Effect::RegisterPeer { peer_id: peer_id(), addr: "1.2.3.4".into(), port: "1".into() },
        Effect::ScheduleIndexJob { repo_id: repo_id(), worktree: "/tmp/a".into(), passphrase: None },
        Effect::StartDownload { repo_id: repo_id(), peer_id: peer_id(), token: "t".into() },
        Effect::CancelDownload { tx_id: TxId::new("tx") },
        Effect::VerifyPassword { repo_id: repo_id(), passphrase: None },
        Effect::ScheduleCheckout { repo_id: repo_id(), worktree: "/tmp/a".into() },
        Effect::ScheduleMerge { repo_id: repo_id(), worktree: "/tmp/a".into(), root_id: "r".into() },
    ];
    let names: std::collections::HashSet<_> = effects.iter().map(Effect::name).collect();
    assert_eq!(names.len(), effects.len());
}

#[test]
fn schedule_index_job_fields_report_encryption() {
    let effect = Effect::ScheduleIndexJob {
        repo_id: repo_id(),
        worktree: "/tmp/a".into(),
        passphrase: Some("secret".into()),
    };
    let fields = effect.fields();
    assert!(fields.contains(&("encrypted", "true".to_string())));
    assert!(!fields.iter().any(|(k, v)| *k == "encrypted" && v == "secret"));
}

#[test]
fn verify_password_fields_never_leak_the_passphrase() {
    let effect = Effect::VerifyPassword { repo_id: repo_id(), passphrase: Some("hunter2".into()) };
    for (_, value) in effect.fields() {
        assert_ne!(value, "hunter2");
    }
}
