//! Shared text normalization helpers.

/// Trim an optional string and drop empty values.
///
/// # Returns
/// `None` when the input is missing or whitespace-only; otherwise the trimmed
/// string.
pub fn normalize_optional_nonempty(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Trim a display name, rejecting names that are blank after trimming.
///
/// # Returns
/// The trimmed name, or `None` when nothing is left.
pub fn normalize_display_name(name: &str) -> Option<String> {
    normalize_optional_nonempty(Some(name.to_string()))
}

/// Lowercased haystack used by prompt search: `name description content`.
pub fn searchable_text(name: &str, description: &str, content: &str) -> String {
    let mut out = String::with_capacity(name.len() + description.len() + content.len() + 2);
    out.push_str(&name.to_lowercase());
    out.push(' ');
    out.push_str(&description.to_lowercase());
    out.push(' ');
    out.push_str(&content.to_lowercase());
    out
}
