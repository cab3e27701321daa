//! Sync worker wiring for the panel.
//!
//! This module exposes the command/event protocol plus the worker spawn helper
//! used by panel hosts.

mod protocol;
mod worker;

pub use protocol::{SaveReply, SyncCmd, SyncErrorSource, SyncEvent};
pub use worker::{spawn_sync_backend, SaveTicket, SyncHandle};
