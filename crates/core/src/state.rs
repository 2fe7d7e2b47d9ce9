// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The ten states a clone task can occupy.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloneState {
    Init,
    Connect,
    Index,
    Fetch,
    Checkout,
    Merge,
    Done,
    Error,
    CancelPending,
    Canceled,
}

crate::simple_display! {
    CloneState {
        Init => "init",
        Connect => "connect",
        Index => "index",
        Fetch => "fetch",
        Checkout => "checkout",
        Merge => "merge",
        Done => "done",
        Error => "error",
        CancelPending => "canceling",
        Canceled => "canceled",
    }
}

impl CloneState {
    /// A terminal task has no durable row and can no longer transition.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error | Self::Canceled)
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
