//! Drag-and-drop payloads and per-target highlight state.

use promptbar_core::{AppError, Prompt, DRAG_PAYLOAD_KEY};
use std::collections::{BTreeMap, HashSet};

/// Where a prompt can be dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// A folder row; dropping assigns the prompt to this folder id.
    Folder(String),
    /// The unfiled prompt list; dropping clears the prompt's folder.
    Unfiled,
}

impl DropTarget {
    /// Folder id a dropped prompt receives.
    pub fn folder_id(&self) -> Option<String> {
        match self {
            Self::Folder(id) => Some(id.clone()),
            Self::Unfiled => None,
        }
    }
}

/// String-keyed drag payload, like a browser `DataTransfer`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    data: BTreeMap<String, String>,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload for dragging `prompt`: its JSON under the `prompt` key.
    ///
    /// # Errors
    /// Returns [`AppError::Serialization`] when encoding fails.
    pub fn for_prompt(prompt: &Prompt) -> Result<Self, AppError> {
        let mut transfer = Self::new();
        transfer.set_data(DRAG_PAYLOAD_KEY, serde_json::to_string(prompt)?);
        Ok(transfer)
    }

    pub fn set_data(&mut self, key: &str, value: String) {
        self.data.insert(key.to_string(), value);
    }

    pub fn get_data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Decode the dragged prompt.
    ///
    /// # Errors
    /// Returns [`AppError::BadRequest`] when the `prompt` entry is missing or
    /// is not a JSON prompt.
    pub fn prompt(&self) -> Result<Prompt, AppError> {
        let raw = self
            .get_data(DRAG_PAYLOAD_KEY)
            .ok_or_else(|| AppError::BadRequest("Drop payload has no prompt".to_string()))?;
        serde_json::from_str(raw)
            .map_err(|err| AppError::BadRequest(format!("Malformed prompt drop payload: {}", err)))
    }
}

/// Highlighted drop targets.
#[derive(Debug, Clone, Default)]
pub struct DropHighlights {
    active: HashSet<DropTarget>,
}

impl DropHighlights {
    pub fn enter(&mut self, target: &DropTarget) {
        self.active.insert(target.clone());
    }

    pub fn leave(&mut self, target: &DropTarget) {
        self.active.remove(target);
    }

    pub fn is_highlighted(&self, target: &DropTarget) -> bool {
        self.active.contains(target)
    }
}
