// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed identifiers for clone tasks.
//!
//! `RepoId` and `PeerId` wrap caller-supplied identifiers and validate their
//! expected length so a malformed id is rejected at the boundary instead of
//! surfacing as a confusing failure three calls deep. `TxId` wraps the opaque
//! handle returned by the transfer engine and is not length-checked: its shape
//! is owned by that collaborator, not by us.

use std::fmt;

/// Repository identifiers are 36 characters (the transfer engine's repo-id format).
pub const REPO_ID_LEN: usize = 36;
/// Peer identifiers are 40 characters.
pub const PEER_ID_LEN: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidIdLength {
    pub kind: &'static str,
    pub expected: usize,
    pub actual: usize,
}

impl fmt::Display for InvalidIdLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} length: expected {} characters, got {}",
            self.kind, self.expected, self.actual
        )
    }
}

impl std::error::Error for InvalidIdLength {}

macro_rules! string_id {
    ($name:ident, $kind:expr, $len:expr) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Result<Self, InvalidIdLength> {
                let raw = raw.into();
                if raw.chars().count() != $len {
                    return Err(InvalidIdLength {
                        kind: $kind,
                        expected: $len,
                        actual: raw.chars().count(),
                    });
                }
                Ok(Self(raw))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(RepoId, "repo_id", REPO_ID_LEN);
string_id!(PeerId, "peer_id", PEER_ID_LEN);

/// Opaque handle returned by the transfer engine; present from FETCH onward.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxId(String);

impl TxId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[path = "ids_tests.rs"]
mod tests;
