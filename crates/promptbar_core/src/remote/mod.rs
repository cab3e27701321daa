//! Remote prompt store abstraction.
//!
//! The panel never talks to a global client; a [`RemoteStore`] is built by the
//! host and handed to the sync worker, which keeps tests free to swap in
//! [`MemoryRemote`].

mod memory;
mod pocketbase;

pub use memory::{BulkWrite, MemoryRemote};
pub use pocketbase::PocketBaseClient;

use crate::{error::AppError, models::prompt::RemotePromptRecord};
use std::sync::Arc;

/// Backend-as-a-service operations used by the prompt sync path.
pub trait RemoteStore: Send + Sync {
    /// Fetch up to `limit` prompt records, most recently created first.
    fn fetch_recent_prompts(&self, limit: usize) -> Result<Vec<RemotePromptRecord>, AppError>;

    /// Overwrite the bulk record `record_id` with a JSON-encoded prompt array.
    fn write_bulk_prompts(&self, record_id: &str, payload: &str) -> Result<(), AppError>;
}

impl<T: RemoteStore + ?Sized> RemoteStore for Arc<T> {
    fn fetch_recent_prompts(&self, limit: usize) -> Result<Vec<RemotePromptRecord>, AppError> {
        (**self).fetch_recent_prompts(limit)
    }

    fn write_bulk_prompts(&self, record_id: &str, payload: &str) -> Result<(), AppError> {
        (**self).write_bulk_prompts(record_id, payload)
    }
}

impl<T: RemoteStore + ?Sized> RemoteStore for Box<T> {
    fn fetch_recent_prompts(&self, limit: usize) -> Result<Vec<RemotePromptRecord>, AppError> {
        (**self).fetch_recent_prompts(limit)
    }

    fn write_bulk_prompts(&self, record_id: &str, payload: &str) -> Result<(), AppError> {
        (**self).write_bulk_prompts(record_id, payload)
    }
}
