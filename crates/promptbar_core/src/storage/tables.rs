//! redb table definitions for local storage.

use redb::TableDefinition;

/// String key/value rows, mirroring the browser `localStorage` API.
pub const LOCAL_STORAGE: TableDefinition<&str, &str> = TableDefinition::new("local_storage");
