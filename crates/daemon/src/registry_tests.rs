// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clonemgr_core::CloneTask;

#[test]
fn starts_empty() {
    let registry = TaskRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

#[test]
fn insert_then_lookup_round_trips() {
    let mut registry = TaskRegistry::new();
    let task = CloneTask::builder().build();
    let repo_id = task.repo_id.clone();
    registry.insert_or_replace(task);
    assert!(registry.lookup(&repo_id).is_some());
    assert_eq!(registry.len(), 1);
}

#[test]
fn insert_replaces_prior_entry_for_same_repo_id() {
    let mut registry = TaskRegistry::new();
    let repo_id_raw = "r".repeat(36);
    registry.insert_or_replace(CloneTask::builder().repo_id(&repo_id_raw).repo_name("first").build());
    registry.insert_or_replace(CloneTask::builder().repo_id(&repo_id_raw).repo_name("second").build());

    assert_eq!(registry.len(), 1);
    let repo_id = clonemgr_core::RepoId::new(repo_id_raw).unwrap();
    assert_eq!(registry.lookup(&repo_id).unwrap().repo_name, "second");
}

#[test]
fn remove_drops_the_entry() {
    let mut registry = TaskRegistry::new();
    let task = CloneTask::builder().build();
    let repo_id = task.repo_id.clone();
    registry.insert_or_replace(task);
    assert!(registry.remove(&repo_id).is_some());
    assert!(registry.lookup(&repo_id).is_none());
    assert!(registry.remove(&repo_id).is_none());
}

#[test]
fn iter_visits_every_task() {
    let mut registry = TaskRegistry::new();
    registry.insert_or_replace(CloneTask::builder().repo_id("a".repeat(36)).build());
    registry.insert_or_replace(CloneTask::builder().repo_id("b".repeat(36)).build());
    assert_eq!(registry.iter().count(), 2);
}
