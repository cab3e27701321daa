//! Headless Promptbar panel: controller state, drag-and-drop, and the sync worker.
//!
//! The host owns the prompt and folder arrays and implements
//! [`PromptbarCallbacks`]; the [`Promptbar`] controller holds only UI-local
//! state (search term, fallback pool, drop highlights) and produces a
//! declarative [`PanelView`] for whatever renders it.

/// Sync worker protocol and spawn helper.
pub mod backend;
/// Callback surface consumed from the host.
pub mod callbacks;
/// Panel controller, drag state, and view building.
pub mod panel;
/// `update_prompt` / `save_prompts` helpers on top of the sync worker.
pub mod persistence;

pub use backend::{spawn_sync_backend, SaveTicket, SyncCmd, SyncEvent, SyncHandle};
pub use callbacks::PromptbarCallbacks;
pub use panel::{
    drag::{DataTransfer, DropTarget},
    view::{FolderSection, PanelView},
    Promptbar,
};
pub use persistence::{save_prompts, update_prompt, PromptUpdate};
