//! Folder data models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which sidebar a folder belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderType {
    Chat,
    Prompt,
}

/// User-defined grouping container; prompts reference it by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub folder_type: FolderType,
}

impl Folder {
    pub fn new(name: String, folder_type: FolderType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            folder_type,
        }
    }

    /// Shorthand for a prompt-sidebar folder.
    pub fn prompt_folder(name: String) -> Self {
        Self::new(name, FolderType::Prompt)
    }

    pub fn is_prompt_folder(&self) -> bool {
        self.folder_type == FolderType::Prompt
    }
}
