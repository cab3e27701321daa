//! Prompt persistence helpers used by panel hosts.
//!
//! Both helpers return immediately; the actual write happens on the sync
//! worker and is observed through the returned [`SaveTicket`].

use crate::backend::{SaveTicket, SyncHandle};
use promptbar_core::{prompt_ops::replace_prompt, Prompt};

/// Result of [`update_prompt`].
#[derive(Debug)]
pub struct PromptUpdate {
    pub single: Prompt,
    pub all: Vec<Prompt>,
    /// Completion of the snapshot save triggered by the update.
    pub save: SaveTicket,
}

/// Replace the prompt with `updated.id` and save the full list.
///
/// When no entry matches, the list comes back unchanged and is still saved.
pub fn update_prompt(updated: Prompt, all: &[Prompt], sync: &SyncHandle) -> PromptUpdate {
    let replaced = replace_prompt(updated, all);
    let save = save_prompts(&replaced.all, sync);
    PromptUpdate {
        single: replaced.single,
        all: replaced.all,
        save,
    }
}

/// Queue a de-duplicated snapshot save of `prompts`.
pub fn save_prompts(prompts: &[Prompt], sync: &SyncHandle) -> SaveTicket {
    sync.save_prompts(prompts.to_vec())
}
