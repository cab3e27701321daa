//! Root crate facade for the Promptbar core library and headless panel.

pub use promptbar_core::{
    config, folder_ops, models, prompt_ops, remote, storage, sync, AppError, Config, Folder,
    FolderType, LocalStorage, MemoryRemote, ModelRef, PocketBaseClient, Prompt, RemoteStore,
};
pub use promptbar_panel::{
    backend, callbacks, panel, persistence, save_prompts, spawn_sync_backend, update_prompt,
    DataTransfer, DropTarget, FolderSection, PanelView, PromptUpdate, Promptbar,
    PromptbarCallbacks, SaveTicket, SyncCmd, SyncEvent, SyncHandle,
};
