//! Shared constants used across Promptbar crates.

/// Default PocketBase instance that hosts the shared prompt collections.
pub const DEFAULT_POCKETBASE_URL: &str = "https://pocket.aaho.cc";

/// Collection holding individually authored prompt records.
pub const PROMPTS_COLLECTION: &str = "prompts";

/// Collection holding the single bulk snapshot record.
pub const BULK_COLLECTION: &str = "promptsInBulk";

/// Record id of the bulk snapshot inside [`BULK_COLLECTION`].
pub const DEFAULT_BULK_RECORD_ID: &str = "rwc9dksdjxzjcp3";

/// Record field carrying the JSON-encoded prompt array.
pub const BULK_PAYLOAD_FIELD: &str = "promptsStringify";

/// Maximum number of remote prompts fetched into the fallback pool.
pub const DEFAULT_FETCH_LIMIT: usize = 200;

/// Default HTTP request timeout for remote calls, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Local storage key for the prompt array.
pub const PROMPTS_STORAGE_KEY: &str = "prompts";
/// Local storage key for the folder array.
pub const FOLDERS_STORAGE_KEY: &str = "folders";
/// Local storage key for the sidebar visibility flag.
pub const SIDEBAR_STORAGE_KEY: &str = "showPromptbar";

/// Data-transfer key carrying a dragged prompt.
pub const DRAG_PAYLOAD_KEY: &str = "prompt";

/// Name given to folders created from the panel's "new folder" button.
pub const DEFAULT_FOLDER_NAME: &str = "New folder";
