//! Protocol types for the sync backend worker.

use promptbar_core::{sync::SaveReport, AppError, Prompt};

/// Reply channel a save uses to resolve its [`super::SaveTicket`].
pub type SaveReply = crossbeam_channel::Sender<Result<SaveReport, AppError>>;

/// Commands issued by the panel host for the sync worker to execute.
#[derive(Debug)]
pub enum SyncCmd {
    /// Fetch up to `limit` remote prompts, newest first, as the fallback pool.
    FetchFallbackPool { limit: usize },
    /// De-duplicate and persist a full prompt snapshot.
    SavePrompts {
        ticket: u64,
        prompts: Vec<Prompt>,
        reply: SaveReply,
    },
}

/// Which command an error event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncErrorSource {
    FetchFallbackPool,
    SavePrompts { ticket: u64 },
}

/// Events produced by the sync worker and polled by the host.
#[derive(Debug)]
pub enum SyncEvent {
    /// Remote prompts mapped to local shape (default model, unfiled).
    FallbackPoolLoaded { prompts: Vec<Prompt> },
    /// A save finished writing both the local mirror and the remote record.
    PromptsSaved { ticket: u64, report: SaveReport },
    /// A command failed; nothing is retried.
    Error {
        source: SyncErrorSource,
        message: String,
    },
}
