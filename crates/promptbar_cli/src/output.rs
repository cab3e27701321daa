//! Text and JSON rendering for CLI results.

use promptbar_core::{sync::SaveReport, AppError, Folder, Prompt};
use promptbar_panel::PanelView;
use serde_json::json;

fn prompt_line(prompt: &Prompt) -> String {
    format!("{} ({})", prompt.name, prompt.id)
}

/// Render the panel view as folder groups followed by unfiled prompts.
pub(crate) fn format_view_output(view: &PanelView, json: bool) -> Result<String, AppError> {
    if json {
        let folders: Vec<_> = view
            .folder_sections
            .iter()
            .map(|section| {
                json!({
                    "folder": section.folder,
                    "prompts": section.prompts,
                })
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&json!({
            "searchTerm": view.search_term,
            "folders": folders,
            "unfiled": view.unfiled,
        }))?);
    }

    if view.is_empty {
        return Ok("No prompts.".to_string());
    }

    let mut lines = Vec::new();
    for section in &view.folder_sections {
        lines.push(format!("{}/ ({})", section.folder.name, section.folder.id));
        for prompt in &section.prompts {
            lines.push(format!("  {}", prompt_line(prompt)));
        }
    }
    lines.extend(view.unfiled.iter().map(prompt_line));

    if lines.is_empty() {
        return Ok(format!("No prompts match '{}'.", view.search_term));
    }
    Ok(lines.join("\n"))
}

/// Render one prompt after a create/update/move.
pub(crate) fn format_prompt_output(
    verb: &str,
    prompt: &Prompt,
    json: bool,
) -> Result<String, AppError> {
    if json {
        return Ok(serde_json::to_string_pretty(prompt)?);
    }
    Ok(format!("{}: {}", verb, prompt_line(prompt)))
}

/// Render the prompt folders with their prompt counts.
pub(crate) fn format_folder_list(
    folders: &[Folder],
    prompts: &[Prompt],
    json: bool,
) -> Result<String, AppError> {
    if json {
        return Ok(serde_json::to_string_pretty(folders)?);
    }
    Ok(folders
        .iter()
        .map(|folder| {
            let count = prompts
                .iter()
                .filter(|p| p.folder_id.as_deref() == Some(folder.id.as_str()))
                .count();
            format!("{} ({}) - {} prompts", folder.name, folder.id, count)
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

pub(crate) fn format_folder_output(
    verb: &str,
    folder: &Folder,
    json: bool,
) -> Result<String, AppError> {
    if json {
        return Ok(serde_json::to_string_pretty(folder)?);
    }
    Ok(format!("{}: {} ({})", verb, folder.name, folder.id))
}

/// Render the last save of a push.
pub(crate) fn format_save_output(report: &SaveReport, json: bool) -> Result<String, AppError> {
    if json {
        return Ok(serde_json::to_string_pretty(&json!({
            "saved": report.saved,
            "dropped": report.dropped,
            "payloadBytes": report.payload_bytes,
            "savedAt": report.saved_at.to_rfc3339(),
        }))?);
    }
    Ok(format!(
        "Pushed {} prompts ({} duplicates dropped, {} bytes)",
        report.saved, report.dropped, report.payload_bytes
    ))
}
