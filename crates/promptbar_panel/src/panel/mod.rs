//! Panel controller holding UI-local state for the prompt sidebar.

pub mod drag;
pub mod view;


use crate::backend::{SyncEvent, SyncHandle};
use crate::callbacks::PromptbarCallbacks;
use drag::{DataTransfer, DropHighlights, DropTarget};
use promptbar_core::{
    folder_ops::prompt_folders,
    prompt_ops::{filter_prompts, merge_render_set, prompts_in_folder, unfiled_prompts},
    AppError, Folder, Prompt, DEFAULT_FOLDER_NAME,
};
use tracing::{debug, warn};
use view::{FolderSection, PanelView};

/// Headless prompt sidebar.
///
/// The host keeps ownership of prompts and folders and passes them in on
/// every render; the controller only tracks the search term, the remote
/// fallback pool, and drop-target highlights.
#[derive(Debug, Default)]
pub struct Promptbar {
    search_term: String,
    fallback_pool: Vec<Prompt>,
    pool_requested: bool,
    highlights: DropHighlights,
}

impl Promptbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the fallback pool once per controller.
    ///
    /// The pool is installed when the matching [`SyncEvent`] is passed to
    /// [`Promptbar::apply_event`].
    pub fn mount(&mut self, sync: &SyncHandle, limit: usize) {
        if self.pool_requested {
            return;
        }
        self.pool_requested = true;
        sync.request_fallback_pool(limit);
    }

    /// Apply a sync worker event to panel state.
    ///
    /// # Returns
    /// `true` when panel state changed and the host should re-render.
    pub fn apply_event(&mut self, event: &SyncEvent) -> bool {
        match event {
            SyncEvent::FallbackPoolLoaded { prompts } => {
                debug!(count = prompts.len(), "fallback pool loaded");
                self.set_fallback_pool(prompts.clone());
                true
            }
            SyncEvent::PromptsSaved { .. } => false,
            SyncEvent::Error { source, message } => {
                warn!(?source, "sync error: {}", message);
                false
            }
        }
    }

    pub fn set_fallback_pool(&mut self, prompts: Vec<Prompt>) {
        self.fallback_pool = prompts;
    }

    pub fn fallback_pool(&self) -> &[Prompt] {
        &self.fallback_pool
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Fallback pool merged with the caller's prompts.
    pub fn render_set(&self, prompts: &[Prompt]) -> Vec<Prompt> {
        merge_render_set(&self.fallback_pool, prompts)
    }

    /// Render set narrowed by the current search term.
    pub fn filtered_prompts(&self, prompts: &[Prompt]) -> Vec<Prompt> {
        filter_prompts(&self.render_set(prompts), &self.search_term)
    }

    /// Build the declarative view for the current state.
    ///
    /// Only prompt folders get sections. While a search term is active,
    /// sections without a matching prompt are left out.
    pub fn view(&self, prompts: &[Prompt], folders: &[Folder]) -> PanelView {
        let render_set = self.render_set(prompts);
        let filtered = filter_prompts(&render_set, &self.search_term);
        let searching = !self.search_term.is_empty();

        let folder_sections = prompt_folders(folders)
            .into_iter()
            .map(|folder| {
                let target = DropTarget::Folder(folder.id.clone());
                FolderSection {
                    prompts: prompts_in_folder(&filtered, &folder.id),
                    highlighted: self.highlights.is_highlighted(&target),
                    folder,
                }
            })
            .filter(|section| !searching || !section.prompts.is_empty())
            .collect();

        PanelView {
            search_term: self.search_term.clone(),
            show_search: render_set.len() > 1,
            folder_sections,
            unfiled: unfiled_prompts(&filtered),
            unfiled_highlighted: self.highlights.is_highlighted(&DropTarget::Unfiled),
            is_empty: render_set.is_empty(),
        }
    }

    pub fn handle_create_prompt(&mut self, callbacks: &mut dyn PromptbarCallbacks) {
        callbacks.create_prompt();
        self.search_term.clear();
    }

    pub fn handle_create_folder(&mut self, callbacks: &mut dyn PromptbarCallbacks) {
        callbacks.create_folder(DEFAULT_FOLDER_NAME);
    }

    pub fn handle_update_prompt(&mut self, prompt: Prompt, callbacks: &mut dyn PromptbarCallbacks) {
        callbacks.update_prompt(prompt);
        self.search_term.clear();
    }

    pub fn handle_delete_prompt(
        &mut self,
        prompt: &Prompt,
        callbacks: &mut dyn PromptbarCallbacks,
    ) {
        callbacks.delete_prompt(prompt);
        self.search_term.clear();
    }

    pub fn handle_update_folder(
        &mut self,
        folder_id: &str,
        name: &str,
        callbacks: &mut dyn PromptbarCallbacks,
    ) {
        callbacks.update_folder(folder_id, name);
    }

    pub fn handle_delete_folder(
        &mut self,
        folder_id: &str,
        callbacks: &mut dyn PromptbarCallbacks,
    ) {
        self.highlights.leave(&DropTarget::Folder(folder_id.to_string()));
        callbacks.delete_folder(folder_id);
    }

    pub fn handle_toggle_sidebar(&mut self, callbacks: &mut dyn PromptbarCallbacks) {
        callbacks.toggle_sidebar();
    }

    pub fn drag_enter(&mut self, target: &DropTarget) {
        self.highlights.enter(target);
    }

    /// Keeps the target highlighted while a drag hovers over it.
    pub fn drag_over(&mut self, target: &DropTarget) {
        self.highlights.enter(target);
    }

    pub fn drag_leave(&mut self, target: &DropTarget) {
        self.highlights.leave(target);
    }

    pub fn is_highlighted(&self, target: &DropTarget) -> bool {
        self.highlights.is_highlighted(target)
    }

    /// Re-parent the dragged prompt onto `target`.
    ///
    /// The target's highlight is cleared whether or not the payload decodes.
    /// The search term is left as is.
    ///
    /// # Errors
    /// Returns [`AppError::BadRequest`] for a missing or malformed payload; no
    /// callback runs in that case.
    pub fn handle_drop(
        &mut self,
        target: &DropTarget,
        transfer: &DataTransfer,
        callbacks: &mut dyn PromptbarCallbacks,
    ) -> Result<(), AppError> {
        self.highlights.leave(target);
        let prompt = transfer.prompt()?;
        debug!(prompt_id = %prompt.id, ?target, "prompt dropped");
        callbacks.update_prompt(prompt.with_folder(target.folder_id()));
        Ok(())
    }
}
