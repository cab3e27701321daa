//! Shared test-only helpers for promptbar_core.

use crate::models::prompt::{ModelRef, Prompt};
use crate::LocalStorage;
use tempfile::TempDir;

/// Build an unfiled prompt with the given id and name and empty text fields.
pub(crate) fn prompt(id: &str, name: &str) -> Prompt {
    Prompt {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        content: String::new(),
        model: ModelRef::default_model(),
        folder_id: None,
    }
}

/// Creates isolated local storage and returns it with the temp dir.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing file.
///
/// # Panics
/// Panics if temp-dir creation or storage initialization fails.
pub(crate) fn setup_temp_storage() -> (LocalStorage, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let path = temp_dir.path().join("local_storage.redb");
    let storage = LocalStorage::open(&path).expect("storage");
    (storage, temp_dir)
}
