//! In-process remote store used by tests and offline mode.

use super::RemoteStore;
use crate::{error::AppError, models::prompt::RemotePromptRecord};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A bulk write observed by [`MemoryRemote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkWrite {
    pub record_id: String,
    pub payload: String,
}

/// Remote store that keeps records and bulk writes in memory.
#[derive(Debug, Default)]
pub struct MemoryRemote {
    records: Mutex<Vec<RemotePromptRecord>>,
    writes: Mutex<Vec<BulkWrite>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the `prompts` collection.
    pub fn with_records(records: Vec<RemotePromptRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    /// Make subsequent fetches fail with a 503.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent bulk writes fail with a 503.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Every bulk write accepted so far, oldest first.
    pub fn writes(&self) -> Vec<BulkWrite> {
        self.writes
            .lock()
            .map(|writes| writes.clone())
            .unwrap_or_default()
    }

    /// Payload of the most recent accepted bulk write for `record_id`.
    pub fn latest_payload(&self, record_id: &str) -> Option<String> {
        self.writes()
            .into_iter()
            .rev()
            .find(|write| write.record_id == record_id)
            .map(|write| write.payload)
    }

    fn unavailable() -> AppError {
        AppError::Remote {
            status: 503,
            message: "remote store unavailable".to_string(),
        }
    }
}

impl RemoteStore for MemoryRemote {
    fn fetch_recent_prompts(&self, limit: usize) -> Result<Vec<RemotePromptRecord>, AppError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        let mut records = self.records.lock().map_err(|_| AppError::Internal)?.clone();
        // PocketBase timestamps sort lexicographically.
        records.sort_by(|a, b| b.created.cmp(&a.created));
        records.truncate(limit);
        Ok(records)
    }

    fn write_bulk_prompts(&self, record_id: &str, payload: &str) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.writes
            .lock()
            .map_err(|_| AppError::Internal)?
            .push(BulkWrite {
                record_id: record_id.to_string(),
                payload: payload.to_string(),
            });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, created: &str) -> RemotePromptRecord {
        RemotePromptRecord {
            id: id.to_string(),
            name: format!("name-{}", id),
            description: String::new(),
            content: String::new(),
            created: created.to_string(),
            updated: created.to_string(),
        }
    }

    #[test]
    fn fetch_returns_newest_first_and_respects_limit() {
        let remote = MemoryRemote::with_records(vec![
            record("old", "2023-01-01 00:00:00.000Z"),
            record("new", "2023-03-01 00:00:00.000Z"),
            record("mid", "2023-02-01 00:00:00.000Z"),
        ]);

        let fetched = remote.fetch_recent_prompts(2).expect("fetch");
        let ids: Vec<&str> = fetched.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid"]);
    }

    #[test]
    fn failures_can_be_toggled() {
        let remote = MemoryRemote::new();
        remote.set_fail_writes(true);
        assert!(matches!(
            remote.write_bulk_prompts("bulk", "[]"),
            Err(AppError::Remote { status: 503, .. })
        ));
        remote.set_fail_writes(false);
        remote.write_bulk_prompts("bulk", "[]").expect("write");
        assert_eq!(remote.latest_payload("bulk").as_deref(), Some("[]"));

        remote.set_fail_reads(true);
        assert!(remote.fetch_recent_prompts(10).is_err());
    }
}
