//! Headless panel host that owns prompts and folders for one CLI invocation.

use promptbar_core::{
    folder_ops::{create_folder_validated, delete_folder_and_unfile, rename_folder},
    prompt_ops::{ensure_name_available, first_free_untitled_ordinal, remove_prompt},
    sync::SaveReport,
    AppError, Config, Folder, FolderType, LocalStorage, MemoryRemote, PocketBaseClient, Prompt,
    RemoteStore,
};
use promptbar_panel::{
    backend::SyncErrorSource, save_prompts, spawn_sync_backend, update_prompt, PromptbarCallbacks,
    SaveTicket, SyncEvent, SyncHandle,
};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Owner of the prompt and folder arrays behind the panel.
///
/// Callbacks cannot return errors, so the first failure is kept and surfaced
/// by [`CliHost::finish`].
pub(crate) struct CliHost {
    storage: LocalStorage,
    sync: SyncHandle,
    prompts: Vec<Prompt>,
    folders: Vec<Folder>,
    sidebar_visible: bool,
    pending: Vec<SaveTicket>,
    failure: Option<AppError>,
}

impl CliHost {
    /// Open local storage and start the sync worker for `config`.
    ///
    /// Offline mode swaps the PocketBase client for an in-memory store, so
    /// saves only reach the local mirror.
    pub(crate) fn open(config: &Config) -> Result<Self, AppError> {
        let storage = LocalStorage::open(&config.local_storage_path())?;
        let remote: Box<dyn RemoteStore> = if config.offline {
            Box::new(MemoryRemote::new())
        } else {
            Box::new(PocketBaseClient::new(
                &config.remote_url,
                Duration::from_secs(config.request_timeout_secs),
            )?)
        };
        Self::new(storage, remote, config.bulk_record_id.clone())
    }

    pub(crate) fn new(
        storage: LocalStorage,
        remote: Box<dyn RemoteStore>,
        record_id: String,
    ) -> Result<Self, AppError> {
        let prompts = storage.load_prompts()?;
        let folders = storage.load_folders()?;
        let sidebar_visible = storage.load_sidebar_visible()?;
        debug!(
            prompts = prompts.len(),
            folders = folders.len(),
            "loaded local storage"
        );
        let sync = spawn_sync_backend(remote, Some(storage.clone()), record_id);
        Ok(Self {
            storage,
            sync,
            prompts,
            folders,
            sidebar_visible,
            pending: Vec::new(),
            failure: None,
        })
    }

    pub(crate) fn sync(&self) -> &SyncHandle {
        &self.sync
    }

    pub(crate) fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub(crate) fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub(crate) fn sidebar_visible(&self) -> bool {
        self.sidebar_visible
    }

    pub(crate) fn find_prompt(&self, id: &str) -> Result<Prompt, AppError> {
        self.prompts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    /// Wait for the answer to a fallback pool request.
    ///
    /// Save events that arrive in between are skipped.
    ///
    /// # Errors
    /// Returns [`AppError::Transport`] when the fetch failed or no answer
    /// arrived within `timeout`.
    pub(crate) fn await_fallback_pool(&self, timeout: Duration) -> Result<Vec<Prompt>, AppError> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let event = self.sync.evt_rx.recv_timeout(remaining).map_err(|_| {
                AppError::Transport("timed out waiting for remote prompts".to_string())
            })?;
            match event {
                SyncEvent::FallbackPoolLoaded { prompts } => return Ok(prompts),
                SyncEvent::Error {
                    source: SyncErrorSource::FetchFallbackPool,
                    message,
                } => return Err(AppError::Transport(message)),
                _ => continue,
            }
        }
    }

    /// Append remote prompts whose id and name are both new locally.
    ///
    /// # Returns
    /// Number of prompts added.
    pub(crate) fn adopt_remote(&mut self, pool: Vec<Prompt>) -> usize {
        let ids: HashSet<String> = self.prompts.iter().map(|p| p.id.clone()).collect();
        let names: HashSet<String> = self.prompts.iter().map(|p| p.name.clone()).collect();
        let fresh: Vec<Prompt> = pool
            .into_iter()
            .filter(|p| !ids.contains(&p.id) && !names.contains(&p.name))
            .collect();
        let added = fresh.len();
        if added > 0 {
            self.prompts.extend(fresh);
            self.queue_save();
        }
        added
    }

    /// Queue a save of the current list.
    pub(crate) fn push(&mut self) {
        self.queue_save();
    }

    /// Wait for every queued save.
    ///
    /// # Returns
    /// Reports for the saves in submission order.
    ///
    /// # Errors
    /// Returns the first recorded callback failure, otherwise the first
    /// failed save.
    pub(crate) fn finish(&mut self) -> Result<Vec<SaveReport>, AppError> {
        let mut reports = Vec::new();
        let mut first_error = self.failure.take();
        for ticket in self.pending.drain(..) {
            match ticket.wait() {
                Ok(report) => reports.push(report),
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(reports),
        }
    }

    /// Surface a failure recorded by a callback, if any.
    pub(crate) fn check(&mut self) -> Result<(), AppError> {
        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn queue_save(&mut self) {
        let ticket = save_prompts(&self.prompts, &self.sync);
        self.pending.push(ticket);
    }

    fn record_failure(&mut self, err: AppError) {
        self.failure.get_or_insert(err);
    }

    fn persist_folders(&mut self) {
        if let Err(err) = self.storage.store_folders(&self.folders) {
            self.record_failure(err);
        }
    }
}

impl PromptbarCallbacks for CliHost {
    fn create_folder(&mut self, name: &str) {
        match create_folder_validated(name, FolderType::Prompt) {
            Ok(folder) => {
                info!(folder_id = %folder.id, "created folder");
                self.folders.push(folder);
                self.persist_folders();
            }
            Err(err) => self.record_failure(err),
        }
    }

    fn delete_folder(&mut self, folder_id: &str) {
        match delete_folder_and_unfile(&self.folders, &self.prompts, folder_id) {
            Ok(deletion) => {
                info!(
                    folder_id,
                    unfiled = deletion.unfiled_prompt_ids.len(),
                    "deleted folder"
                );
                self.folders = deletion.folders;
                self.prompts = deletion.prompts;
                self.persist_folders();
                if !deletion.unfiled_prompt_ids.is_empty() {
                    self.queue_save();
                }
            }
            Err(err) => self.record_failure(err),
        }
    }

    fn update_folder(&mut self, folder_id: &str, name: &str) {
        match rename_folder(&self.folders, folder_id, name) {
            Ok(folders) => {
                self.folders = folders;
                self.persist_folders();
            }
            Err(err) => self.record_failure(err),
        }
    }

    fn toggle_sidebar(&mut self) {
        self.sidebar_visible = !self.sidebar_visible;
        if let Err(err) = self.storage.store_sidebar_visible(self.sidebar_visible) {
            self.record_failure(err);
        }
    }

    fn create_prompt(&mut self) {
        let prompt = Prompt::untitled(first_free_untitled_ordinal(&self.prompts));
        info!(prompt_id = %prompt.id, "created prompt");
        self.prompts.push(prompt);
        self.queue_save();
    }

    fn update_prompt(&mut self, prompt: Prompt) {
        let available = ensure_name_available(&self.prompts, &prompt.name, Some(prompt.id.as_str()));
        if let Err(err) = available {
            self.record_failure(err);
            return;
        }
        let update = update_prompt(prompt, &self.prompts, &self.sync);
        self.prompts = update.all;
        self.pending.push(update.save);
    }

    fn delete_prompt(&mut self, prompt: &Prompt) {
        self.prompts = remove_prompt(&self.prompts, &prompt.id);
        self.queue_save();
    }
}
