//! Local key/value storage backed by redb.
//!
//! Values are stored as JSON text under fixed keys so the on-disk content
//! matches what the browser client keeps in `localStorage`.

/// Table definitions.
pub mod tables;

use crate::{
    constants::{FOLDERS_STORAGE_KEY, PROMPTS_STORAGE_KEY, SIDEBAR_STORAGE_KEY},
    error::AppError,
    models::{folder::Folder, prompt::Prompt},
};
use redb::{ReadableDatabase, ReadableTable, ReadableTableMetadata};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::sync::Arc;
use tables::LOCAL_STORAGE;

/// Handle to the local storage database. Cloning shares the same file.
#[derive(Clone)]
pub struct LocalStorage {
    db: Arc<redb::Database>,
}

impl LocalStorage {
    /// Open (or create) local storage at `path`.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    /// Returns an error when the directory or database cannot be created.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = redb::Database::create(path)?;
        let write_txn = db.begin_write()?;
        write_txn.open_table(LOCAL_STORAGE)?;
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Read the raw value stored under `key`.
    ///
    /// # Returns
    /// `Ok(None)` when the key is absent.
    pub fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LOCAL_STORAGE)?;
        Ok(table.get(key)?.map(|value| value.value().to_string()))
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LOCAL_STORAGE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove `key`.
    ///
    /// # Returns
    /// `true` when a value was present.
    pub fn remove_item(&self, key: &str) -> Result<bool, AppError> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(LOCAL_STORAGE)?;
            let previous = table.remove(key)?;
            previous.is_some()
        };
        write_txn.commit()?;
        Ok(removed)
    }

    /// Number of stored keys.
    pub fn len(&self) -> Result<u64, AppError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LOCAL_STORAGE)?;
        Ok(table.len()?)
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.len()? == 0)
    }

    fn load_json<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, AppError> {
        match self.get_item(key)? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(T::default()),
        }
    }

    fn store_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let encoded = serde_json::to_string(value)?;
        self.set_item(key, &encoded)
    }

    /// Load the prompt array stored under `prompts`.
    pub fn load_prompts(&self) -> Result<Vec<Prompt>, AppError> {
        self.load_json(PROMPTS_STORAGE_KEY)
    }

    /// Store the prompt array under `prompts`.
    pub fn store_prompts(&self, prompts: &[Prompt]) -> Result<(), AppError> {
        self.store_json(PROMPTS_STORAGE_KEY, prompts)
    }

    /// Store an already encoded prompt array under `prompts`.
    pub fn store_prompts_json(&self, encoded: &str) -> Result<(), AppError> {
        self.set_item(PROMPTS_STORAGE_KEY, encoded)
    }

    pub fn load_folders(&self) -> Result<Vec<Folder>, AppError> {
        self.load_json(FOLDERS_STORAGE_KEY)
    }

    pub fn store_folders(&self, folders: &[Folder]) -> Result<(), AppError> {
        self.store_json(FOLDERS_STORAGE_KEY, folders)
    }

    /// Sidebar visibility; defaults to visible when never stored.
    pub fn load_sidebar_visible(&self) -> Result<bool, AppError> {
        match self.get_item(SIDEBAR_STORAGE_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(true),
        }
    }

    pub fn store_sidebar_visible(&self, visible: bool) -> Result<(), AppError> {
        self.store_json(SIDEBAR_STORAGE_KEY, &visible)
    }
}
