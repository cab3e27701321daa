//! Data models for persistence, drag payloads, and remote records.

/// Folder data types.
pub mod folder;
/// Prompt data types.
pub mod prompt;
