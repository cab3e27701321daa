//! Prompt-related data models.

use crate::text::searchable_text;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to the chat model a prompt is meant for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRef {
    pub id: String,
    pub name: String,
    pub max_length: usize,
    pub token_limit: usize,
}

impl ModelRef {
    /// The fixed model reference given to prompts pulled from the remote store
    /// and to freshly created prompts.
    pub fn default_model() -> Self {
        Self {
            id: "gpt-3.5-turbo".to_string(),
            name: "GPT-3.5".to_string(),
            max_length: 12_000,
            token_limit: 4_000,
        }
    }
}

impl Default for ModelRef {
    fn default() -> Self {
        Self::default_model()
    }
}

/// Reusable prompt template.
///
/// Serialized with camelCase keys so payloads match the browser local
/// storage and bulk-record format (`folderId: null` for unfiled prompts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub model: ModelRef,
    #[serde(default)]
    pub folder_id: Option<String>,
}

/// Record shape served by the remote `prompts` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePromptRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

impl Prompt {
    /// Create an empty prompt named `Prompt {ordinal}`.
    ///
    /// # Arguments
    /// - `ordinal`: 1-based position the prompt will take in the caller's list.
    pub fn untitled(ordinal: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: format!("Prompt {}", ordinal),
            description: String::new(),
            content: String::new(),
            model: ModelRef::default_model(),
            folder_id: None,
        }
    }

    /// Copy of this prompt assigned to `folder_id` (`None` unfiles it).
    pub fn with_folder(&self, folder_id: Option<String>) -> Self {
        Self {
            folder_id,
            ..self.clone()
        }
    }

    /// `true` when the prompt is not assigned to any folder.
    pub fn is_unfiled(&self) -> bool {
        self.folder_id.is_none()
    }

    /// Case-insensitive substring match over name, description, and content.
    ///
    /// An empty term matches every prompt.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        searchable_text(&self.name, &self.description, &self.content)
            .contains(&term.to_lowercase())
    }
}

impl From<RemotePromptRecord> for Prompt {
    fn from(record: RemotePromptRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            content: record.content,
            model: ModelRef::default_model(),
            folder_id: None,
        }
    }
}
