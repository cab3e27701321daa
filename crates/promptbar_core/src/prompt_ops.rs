//! Prompt list operations shared by the panel controller and the sync path.
//!
//! All functions are pure: they take slices and return new vectors, leaving
//! ownership of the caller's prompt array with the caller.

use crate::error::AppError;
use crate::models::prompt::Prompt;
use std::collections::HashSet;

/// Result of replacing one prompt inside a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedPrompts {
    /// The updated prompt as passed in.
    pub single: Prompt,
    /// The full list after replacement.
    pub all: Vec<Prompt>,
}

/// Build the panel's render set from the fallback pool and caller prompts.
///
/// The fallback pool comes first, followed by the caller prompts. Any
/// fallback entry whose name matches a caller prompt name is dropped, so the
/// caller's copy wins. Caller prompts are never filtered.
///
/// # Returns
/// Every caller prompt exactly once plus the non-colliding fallback prompts.
pub fn merge_render_set(fallback_pool: &[Prompt], prompts: &[Prompt]) -> Vec<Prompt> {
    let caller_names: HashSet<&str> = prompts.iter().map(|p| p.name.as_str()).collect();
    fallback_pool
        .iter()
        .filter(|fallback| !caller_names.contains(fallback.name.as_str()))
        .chain(prompts.iter())
        .cloned()
        .collect()
}

/// Filter prompts by a case-insensitive substring of name, description, or content.
///
/// # Returns
/// The matching subset in input order; the full input when `term` is empty.
pub fn filter_prompts(prompts: &[Prompt], term: &str) -> Vec<Prompt> {
    if term.is_empty() {
        return prompts.to_vec();
    }
    prompts
        .iter()
        .filter(|prompt| prompt.matches_search(term))
        .cloned()
        .collect()
}

/// Remove duplicates so that the first occurrence of an id or name wins.
///
/// Entries are visited in order; an entry is kept only when neither its id
/// nor its name belongs to an entry that was already kept.
///
/// # Returns
/// A list with unique ids and unique names.
pub fn dedupe_prompts(prompts: &[Prompt]) -> Vec<Prompt> {
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut seen_names: HashSet<&str> = HashSet::new();
    let mut kept = Vec::with_capacity(prompts.len());
    for prompt in prompts {
        if seen_ids.contains(prompt.id.as_str()) || seen_names.contains(prompt.name.as_str()) {
            continue;
        }
        seen_ids.insert(prompt.id.as_str());
        seen_names.insert(prompt.name.as_str());
        kept.push(prompt.clone());
    }
    kept
}

/// Replace the entry with the same id as `updated`.
///
/// # Returns
/// The updated prompt and the new list. When no entry matches, the list is
/// returned unchanged.
pub fn replace_prompt(updated: Prompt, all: &[Prompt]) -> UpdatedPrompts {
    let all = all
        .iter()
        .map(|existing| {
            if existing.id == updated.id {
                updated.clone()
            } else {
                existing.clone()
            }
        })
        .collect();
    UpdatedPrompts {
        single: updated,
        all,
    }
}

/// Remove the prompt with `id` from the list.
///
/// # Returns
/// The remaining prompts, in order.
pub fn remove_prompt(all: &[Prompt], id: &str) -> Vec<Prompt> {
    all.iter().filter(|p| p.id != id).cloned().collect()
}

/// Reject `name` when another prompt already uses it.
///
/// `except_id` names the prompt being edited, whose own name never counts as
/// taken. Saving a list with a repeated name would silently drop one entry.
///
/// # Errors
/// Returns [`AppError::BadRequest`] when a different prompt holds `name`.
pub fn ensure_name_available(
    prompts: &[Prompt],
    name: &str,
    except_id: Option<&str>,
) -> Result<(), AppError> {
    let taken = prompts
        .iter()
        .any(|p| p.name == name && Some(p.id.as_str()) != except_id);
    if taken {
        return Err(AppError::BadRequest(format!(
            "A prompt named '{}' already exists",
            name
        )));
    }
    Ok(())
}

/// Lowest ordinal `n` such that no prompt is named `Prompt {n}`.
pub fn first_free_untitled_ordinal(prompts: &[Prompt]) -> usize {
    let names: HashSet<&str> = prompts.iter().map(|p| p.name.as_str()).collect();
    (1..)
        .find(|n| !names.contains(format!("Prompt {}", n).as_str()))
        .unwrap_or(prompts.len() + 1)
}

/// Prompts with no folder assignment, in input order.
pub fn unfiled_prompts(prompts: &[Prompt]) -> Vec<Prompt> {
    prompts.iter().filter(|p| p.is_unfiled()).cloned().collect()
}

/// Prompts assigned to `folder_id`, in input order.
pub fn prompts_in_folder(prompts: &[Prompt], folder_id: &str) -> Vec<Prompt> {
    prompts
        .iter()
        .filter(|p| p.folder_id.as_deref() == Some(folder_id))
        .cloned()
        .collect()
}
