// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable storage for in-flight clone tasks.
//!
//! Deliberately not event-sourced: a clone task's durable representation is
//! a single row that exists iff the task is non-terminal, not a log of
//! operations to replay. It is backed by an embedded SQL database with bound
//! parameters throughout — no field (repo name, email, worktree path, token)
//! is ever interpolated into SQL text.

mod row;

pub use row::CloneTaskRow;

use clonemgr_core::{CloneTask, PeerId, RepoId};
use rusqlite::{params, Connection};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("stored row for {repo_id} is malformed: {reason}")]
    MalformedRow { repo_id: String, reason: String },
}

const CREATE_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS CloneTasks (
    repo_id TEXT PRIMARY KEY,
    repo_name TEXT NOT NULL,
    token TEXT NOT NULL,
    dest_id TEXT NOT NULL,
    worktree_parent TEXT NOT NULL,
    passwd TEXT,
    server_addr TEXT NOT NULL,
    server_port TEXT NOT NULL,
    email TEXT NOT NULL
)";

/// Durable task persistence, keyed by `repo_id`. A row exists iff the task
/// it describes is non-terminal; see `clonemgr_core::CloneState::is_terminal`.
pub trait TaskStore: Send + Sync {
    fn upsert(&self, task: &CloneTask) -> Result<(), StoreError>;
    fn delete(&self, repo_id: &RepoId) -> Result<(), StoreError>;
    fn enumerate(&self) -> Result<Vec<CloneTaskRow>, StoreError>;
}

/// `rusqlite`-backed implementation. Opens (and migrates) `clone.db` at a
/// caller-supplied path — this crate does not decide where the daemon's
/// state directory lives.
pub struct SqliteTaskStore {
    conn: std::sync::Mutex<Connection>,
}

impl SqliteTaskStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute(CREATE_TABLE_SQL, [])?;
        Ok(Self { conn: std::sync::Mutex::new(conn) })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute(CREATE_TABLE_SQL, [])?;
        Ok(Self { conn: std::sync::Mutex::new(conn) })
    }
}

impl TaskStore for SqliteTaskStore {
    fn upsert(&self, task: &CloneTask) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        conn.execute(
            "INSERT INTO CloneTasks
                (repo_id, repo_name, token, dest_id, worktree_parent, passwd, server_addr, server_port, email)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(repo_id) DO UPDATE SET
                repo_name = excluded.repo_name,
                token = excluded.token,
                dest_id = excluded.dest_id,
                worktree_parent = excluded.worktree_parent,
                passwd = excluded.passwd,
                server_addr = excluded.server_addr,
                server_port = excluded.server_port,
                email = excluded.email",
            params![
                task.repo_id.as_str(),
                task.repo_name,
                task.token,
                task.peer_id.as_str(),
                task.worktree.to_string_lossy(),
                task.passphrase,
                task.peer_addr,
                task.peer_port,
                task.email,
            ],
        )?;
        Ok(())
    }

    fn delete(&self, repo_id: &RepoId) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        conn.execute("DELETE FROM CloneTasks WHERE repo_id = ?1", params![repo_id.as_str()])?;
        Ok(())
    }

    fn enumerate(&self) -> Result<Vec<CloneTaskRow>, StoreError> {
        let conn = self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut stmt = conn.prepare(
            "SELECT repo_id, repo_name, token, dest_id, worktree_parent, passwd, server_addr, server_port, email
             FROM CloneTasks",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CloneTaskRow {
                repo_id: row.get(0)?,
                repo_name: row.get(1)?,
                token: row.get(2)?,
                peer_id: row.get(3)?,
                worktree_parent: row.get(4)?,
                passphrase: row.get(5)?,
                peer_addr: row.get(6)?,
                peer_port: row.get(7)?,
                email: row.get(8)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

impl CloneTaskRow {
    pub fn repo_id(&self) -> Result<RepoId, StoreError> {
        RepoId::new(self.repo_id.clone()).map_err(|e| StoreError::MalformedRow {
            repo_id: self.repo_id.clone(),
            reason: e.to_string(),
        })
    }

    pub fn peer_id(&self) -> Result<PeerId, StoreError> {
        PeerId::new(self.peer_id.clone()).map_err(|e| StoreError::MalformedRow {
            repo_id: self.repo_id.clone(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
