//! Core domain library for Promptbar (config, models, list operations, storage, sync).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across Promptbar crates.
pub mod constants;
/// Process-global environment mutation helpers.
pub mod env;
/// Application error types (storage/remote/domain).
pub mod error;
/// Folder list operations shared by the panel and the CLI host.
pub mod folder_ops;
/// Data models for prompts, folders, and remote records.
pub mod models;
/// Prompt list operations: merge, search, dedupe, update.
pub mod prompt_ops;
/// Remote store abstraction and the PocketBase client.
pub mod remote;
/// Local key/value storage mirroring browser local storage.
pub mod storage;
/// Bulk snapshot persistence shared by the sync worker and the CLI.
pub mod sync;
/// Shared text normalization helpers.
pub mod text;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use constants::*;
pub use error::AppError;
pub use models::{
    folder::{Folder, FolderType},
    prompt::{ModelRef, Prompt},
};
pub use remote::{MemoryRemote, PocketBaseClient, RemoteStore};
pub use storage::LocalStorage;
