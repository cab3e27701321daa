//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_BULK_RECORD_ID, DEFAULT_FETCH_LIMIT, DEFAULT_POCKETBASE_URL,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::text::normalize_optional_nonempty;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// File name of the redb database that backs local storage.
pub const LOCAL_STORAGE_FILE_NAME: &str = "local_storage.redb";

/// Runtime configuration for Promptbar.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data_dir: String,
    pub remote_url: String,
    pub bulk_record_id: String,
    pub fetch_limit: usize,
    pub request_timeout_secs: u64,
    pub offline: bool,
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    // Windows USERPROFILE (standard)
    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    std::env::current_dir().ok()
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn env_string(name: &str) -> Option<String> {
    normalize_optional_nonempty(env::var(name).ok())
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    env_string(name).and_then(|value| value.parse().ok())
}

/// Default data directory (`~/.cache/promptbar`).
pub fn default_data_dir() -> String {
    let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".cache")
        .join("promptbar")
        .to_string_lossy()
        .to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing
    /// or unparsable.
    pub fn from_env() -> Self {
        Self {
            data_dir: env_string("PROMPTBAR_DATA_DIR")
                .map(expand_tilde)
                .unwrap_or_else(default_data_dir),
            remote_url: env_string("POCKETBASE_URL")
                .unwrap_or_else(|| DEFAULT_POCKETBASE_URL.to_string()),
            bulk_record_id: env_string("PROMPTBAR_BULK_RECORD_ID")
                .unwrap_or_else(|| DEFAULT_BULK_RECORD_ID.to_string()),
            fetch_limit: env_parsed("PROMPTBAR_FETCH_LIMIT")
                .filter(|limit| *limit > 0)
                .unwrap_or(DEFAULT_FETCH_LIMIT),
            request_timeout_secs: env_parsed("PROMPTBAR_REQUEST_TIMEOUT_SECS")
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            offline: env_flag_enabled("PROMPTBAR_OFFLINE"),
        }
    }

    /// Path of the local storage database inside [`Config::data_dir`].
    pub fn local_storage_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(LOCAL_STORAGE_FILE_NAME)
    }
}
