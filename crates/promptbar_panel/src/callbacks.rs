//! Callback surface consumed from the host that owns prompts and folders.

use promptbar_core::Prompt;

/// Operations the panel delegates to its host.
///
/// Each call is a notification; the host applies the change to its own
/// arrays and passes the new arrays back on the next render.
pub trait PromptbarCallbacks {
    fn create_folder(&mut self, name: &str);
    fn delete_folder(&mut self, folder_id: &str);
    fn update_folder(&mut self, folder_id: &str, name: &str);
    fn toggle_sidebar(&mut self);
    fn create_prompt(&mut self);
    fn update_prompt(&mut self, prompt: Prompt);
    fn delete_prompt(&mut self, prompt: &Prompt);
}
