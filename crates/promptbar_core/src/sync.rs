//! Bulk snapshot persistence: dedupe, encode, mirror locally, push remotely.

use crate::{
    error::AppError,
    models::prompt::Prompt,
    prompt_ops::dedupe_prompts,
    remote::RemoteStore,
    storage::LocalStorage,
};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Outcome of a completed bulk save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// Prompts written after de-duplication.
    pub saved: usize,
    /// Prompts removed as duplicates.
    pub dropped: usize,
    /// Size of the encoded JSON payload.
    pub payload_bytes: usize,
    pub saved_at: DateTime<Utc>,
}

/// De-duplicate `prompts` and encode the survivors as a JSON array.
///
/// # Returns
/// The surviving prompts and their JSON encoding.
///
/// # Errors
/// Returns [`AppError::Serialization`] when encoding fails.
pub fn encode_snapshot(prompts: &[Prompt]) -> Result<(Vec<Prompt>, String), AppError> {
    let unique = dedupe_prompts(prompts);
    let encoded = serde_json::to_string(&unique)?;
    Ok((unique, encoded))
}

/// Persist a de-duplicated snapshot to local storage and the remote bulk record.
///
/// The local mirror is written first. A local failure does not prevent the
/// remote write; the remote error wins when both fail.
///
/// # Errors
/// Returns the remote write error, or the local storage error when only the
/// mirror failed.
pub fn persist_snapshot(
    prompts: &[Prompt],
    remote: &dyn RemoteStore,
    storage: Option<&LocalStorage>,
    record_id: &str,
) -> Result<SaveReport, AppError> {
    let (unique, encoded) = encode_snapshot(prompts)?;
    let dropped = prompts.len() - unique.len();

    let local_result = match storage {
        Some(storage) => storage.store_prompts_json(&encoded),
        None => Ok(()),
    };
    if let Err(err) = &local_result {
        warn!("local prompt mirror failed: {}", err);
    }

    remote.write_bulk_prompts(record_id, &encoded)?;
    local_result?;

    info!(
        saved = unique.len(),
        dropped,
        bytes = encoded.len(),
        "saved prompt snapshot"
    );
    Ok(SaveReport {
        saved: unique.len(),
        dropped,
        payload_bytes: encoded.len(),
        saved_at: Utc::now(),
    })
}

/// Fetch the remote fallback pool and map records to prompts.
///
/// Mapped prompts carry the default model reference and no folder.
pub fn load_fallback_pool(
    remote: &dyn RemoteStore,
    limit: usize,
) -> Result<Vec<Prompt>, AppError> {
    let records = remote.fetch_recent_prompts(limit)?;
    Ok(records.into_iter().map(Prompt::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::prompt::{ModelRef, RemotePromptRecord};
    use crate::remote::MemoryRemote;
    use crate::test_support::{prompt, setup_temp_storage};

    #[test]
    fn persist_dedupes_and_writes_both_targets() {
        let (storage, _dir) = setup_temp_storage();
        let remote = MemoryRemote::new();
        let prompts = vec![prompt("1", "A"), prompt("2", "A"), prompt("3", "B")];

        let report = persist_snapshot(&prompts, &remote, Some(&storage), "bulk").expect("save");

        assert_eq!(report.saved, 2);
        assert_eq!(report.dropped, 1);
        let payload = remote.latest_payload("bulk").expect("remote payload");
        assert_eq!(report.payload_bytes, payload.len());
        let remote_prompts: Vec<Prompt> = serde_json::from_str(&payload).expect("decode");
        assert_eq!(remote_prompts, vec![prompt("1", "A"), prompt("3", "B")]);
        assert_eq!(storage.load_prompts().expect("local"), remote_prompts);
    }

    #[test]
    fn remote_failure_still_mirrors_locally() {
        let (storage, _dir) = setup_temp_storage();
        let remote = MemoryRemote::new();
        remote.set_fail_writes(true);

        let result = persist_snapshot(&[prompt("1", "A")], &remote, Some(&storage), "bulk");

        assert!(matches!(result, Err(AppError::Remote { status: 503, .. })));
        assert_eq!(storage.load_prompts().expect("local"), vec![prompt("1", "A")]);
        assert!(remote.writes().is_empty());
    }

    #[test]
    fn persist_without_storage_only_writes_remote() {
        let remote = MemoryRemote::new();
        persist_snapshot(&[prompt("1", "A")], &remote, None, "bulk").expect("save");
        assert_eq!(remote.writes().len(), 1);
    }

    #[test]
    fn fallback_pool_maps_records_to_unfiled_default_model_prompts() {
        let remote = MemoryRemote::with_records(vec![RemotePromptRecord {
            id: "r1".to_string(),
            name: "Remote".to_string(),
            description: "desc".to_string(),
            content: "content".to_string(),
            created: "2023-04-01 10:00:00.000Z".to_string(),
            updated: String::new(),
        }]);

        let pool = load_fallback_pool(&remote, 200).expect("pool");

        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].model, ModelRef::default_model());
        assert!(pool[0].folder_id.is_none());
        assert_eq!(pool[0].description, "desc");
    }
}
