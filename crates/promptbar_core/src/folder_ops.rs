//! Shared folder list operations used by the panel host and the CLI.

use crate::{
    models::{
        folder::{Folder, FolderType},
        prompt::Prompt,
    },
    text::normalize_display_name,
    AppError,
};

/// Outcome of deleting a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderDeletion {
    /// Folders left after removal.
    pub folders: Vec<Folder>,
    /// Prompts after every reference to the deleted folder was cleared.
    pub prompts: Vec<Prompt>,
    /// Ids of prompts that were moved to unfiled.
    pub unfiled_prompt_ids: Vec<String>,
}

fn validated_name(name: &str) -> Result<String, AppError> {
    normalize_display_name(name)
        .ok_or_else(|| AppError::BadRequest("Folder name cannot be empty".to_string()))
}

/// Validate that a folder can accept prompt assignments.
///
/// # Errors
/// Returns [`AppError::NotFound`] for unknown ids and
/// [`AppError::BadRequest`] when the folder belongs to the chat sidebar.
pub fn ensure_folder_assignable(folders: &[Folder], folder_id: &str) -> Result<(), AppError> {
    let Some(folder) = folders.iter().find(|f| f.id == folder_id) else {
        return Err(AppError::NotFound);
    };
    if !folder.is_prompt_folder() {
        return Err(AppError::BadRequest(format!(
            "Folder with id '{}' is not a prompt folder",
            folder_id
        )));
    }
    Ok(())
}

/// Create a folder after trimming and validating its name.
///
/// # Errors
/// Returns [`AppError::BadRequest`] for blank names.
pub fn create_folder_validated(name: &str, folder_type: FolderType) -> Result<Folder, AppError> {
    Ok(Folder::new(validated_name(name)?, folder_type))
}

/// Rename the folder with `id`.
///
/// # Returns
/// The full folder list with the renamed entry in place.
///
/// # Errors
/// Returns [`AppError::NotFound`] when `id` is unknown or
/// [`AppError::BadRequest`] for blank names.
pub fn rename_folder(folders: &[Folder], id: &str, name: &str) -> Result<Vec<Folder>, AppError> {
    let name = validated_name(name)?;
    if !folders.iter().any(|f| f.id == id) {
        return Err(AppError::NotFound);
    }
    Ok(folders
        .iter()
        .map(|folder| {
            if folder.id == id {
                Folder {
                    name: name.clone(),
                    ..folder.clone()
                }
            } else {
                folder.clone()
            }
        })
        .collect())
}

/// Delete a folder and move its prompts to unfiled.
///
/// # Errors
/// Returns [`AppError::NotFound`] when `id` is unknown.
pub fn delete_folder_and_unfile(
    folders: &[Folder],
    prompts: &[Prompt],
    id: &str,
) -> Result<FolderDeletion, AppError> {
    if !folders.iter().any(|f| f.id == id) {
        return Err(AppError::NotFound);
    }

    let mut unfiled_prompt_ids = Vec::new();
    let prompts = prompts
        .iter()
        .map(|prompt| {
            if prompt.folder_id.as_deref() == Some(id) {
                unfiled_prompt_ids.push(prompt.id.clone());
                prompt.with_folder(None)
            } else {
                prompt.clone()
            }
        })
        .collect();

    Ok(FolderDeletion {
        folders: folders.iter().filter(|f| f.id != id).cloned().collect(),
        prompts,
        unfiled_prompt_ids,
    })
}

/// Folders shown by the prompt sidebar, in input order.
pub fn prompt_folders(folders: &[Folder]) -> Vec<Folder> {
    folders
        .iter()
        .filter(|f| f.is_prompt_folder())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::prompt;

    fn folder(id: &str, name: &str, folder_type: FolderType) -> Folder {
        Folder {
            id: id.to_string(),
            name: name.to_string(),
            folder_type,
        }
    }

    #[test]
    fn create_folder_trims_and_rejects_blank_names() {
        let created = create_folder_validated("  Work  ", FolderType::Prompt).expect("create");
        assert_eq!(created.name, "Work");
        assert!(created.is_prompt_folder());

        assert!(matches!(
            create_folder_validated("   ", FolderType::Prompt),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn rename_folder_updates_only_target() {
        let folders = vec![
            folder("F1", "One", FolderType::Prompt),
            folder("F2", "Two", FolderType::Prompt),
        ];
        let renamed = rename_folder(&folders, "F2", "Second").expect("rename");
        assert_eq!(renamed[0], folders[0]);
        assert_eq!(renamed[1].name, "Second");
        assert_eq!(renamed[1].id, "F2");

        assert!(matches!(
            rename_folder(&folders, "missing", "x"),
            Err(AppError::NotFound)
        ));
    }

    #[test]
    fn delete_folder_unfiles_its_prompts_only() {
        let folders = vec![
            folder("F1", "One", FolderType::Prompt),
            folder("F2", "Two", FolderType::Prompt),
        ];
        let prompts = vec![
            prompt("1", "A").with_folder(Some("F1".to_string())),
            prompt("2", "B").with_folder(Some("F2".to_string())),
            prompt("3", "C"),
        ];

        let deletion = delete_folder_and_unfile(&folders, &prompts, "F1").expect("delete");

        assert_eq!(deletion.folders, vec![folders[1].clone()]);
        assert_eq!(deletion.unfiled_prompt_ids, vec!["1".to_string()]);
        assert!(deletion.prompts[0].is_unfiled());
        assert_eq!(deletion.prompts[1], prompts[1]);
        assert_eq!(deletion.prompts[2], prompts[2]);
    }

    #[test]
    fn delete_unknown_folder_is_not_found() {
        let result = delete_folder_and_unfile(&[], &[prompt("1", "A")], "F1");
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[test]
    fn assignability_requires_existing_prompt_folder() {
        let folders = vec![
            folder("F1", "Prompts", FolderType::Prompt),
            folder("C1", "Chats", FolderType::Chat),
        ];
        assert!(ensure_folder_assignable(&folders, "F1").is_ok());
        assert!(matches!(
            ensure_folder_assignable(&folders, "C1"),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            ensure_folder_assignable(&folders, "nope"),
            Err(AppError::NotFound)
        ));
        assert_eq!(prompt_folders(&folders), vec![folders[0].clone()]);
    }
}
