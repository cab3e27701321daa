//! Declarative panel view consumed by renderers.

use promptbar_core::{Folder, Prompt};

/// One folder row with the prompts it currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderSection {
    pub folder: Folder,
    pub prompts: Vec<Prompt>,
    pub highlighted: bool,
}

/// Everything a renderer needs for one frame of the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub search_term: String,
    /// Search box visibility; only worth showing with more than one prompt.
    pub show_search: bool,
    pub folder_sections: Vec<FolderSection>,
    /// Filtered prompts with no folder.
    pub unfiled: Vec<Prompt>,
    pub unfiled_highlighted: bool,
    /// Render set is empty ("No prompts.").
    pub is_empty: bool,
}

impl PanelView {
    /// Every prompt visible in this view, folders first.
    pub fn visible_prompts(&self) -> impl Iterator<Item = &Prompt> {
        self.folder_sections
            .iter()
            .flat_map(|section| section.prompts.iter())
            .chain(self.unfiled.iter())
    }
}
