//! Blocking PocketBase client for the `prompts` and `promptsInBulk` collections.

use super::RemoteStore;
use crate::{
    constants::{BULK_COLLECTION, BULK_PAYLOAD_FIELD, PROMPTS_COLLECTION},
    error::AppError,
    models::prompt::RemotePromptRecord,
};
use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// One page of a PocketBase record listing.
#[derive(Debug, Deserialize)]
struct RecordPage {
    #[serde(default)]
    items: Vec<RemotePromptRecord>,
}

/// PocketBase REST client.
#[derive(Debug, Clone)]
pub struct PocketBaseClient {
    http: Client,
    base_url: Url,
}

fn error_message_for_response(status: reqwest::StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return value
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or(body)
            .to_string();
    }

    body.to_string()
}

fn ensure_success(res: Response) -> Result<Response, AppError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res
        .text()
        .unwrap_or_else(|err| format!("failed to read error response body: {}", err));
    Err(AppError::Remote {
        status: status.as_u16(),
        message: error_message_for_response(status, &body),
    })
}

impl PocketBaseClient {
    /// Build a client for the PocketBase instance at `base_url`.
    ///
    /// # Errors
    /// Returns [`AppError::BadRequest`] when `base_url` is not an absolute
    /// http(s) URL, or [`AppError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url.trim()).map_err(|err| {
            AppError::BadRequest(format!("Invalid remote URL '{}': {}", base_url, err))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::BadRequest(format!(
                "Remote URL '{}' cannot be used as an API base",
                base_url
            )));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    fn api_url(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                AppError::BadRequest("Remote URL cannot be used as an API base".to_string())
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }
}

impl RemoteStore for PocketBaseClient {
    fn fetch_recent_prompts(&self, limit: usize) -> Result<Vec<RemotePromptRecord>, AppError> {
        let endpoint = self.api_url(&["api", "collections", PROMPTS_COLLECTION, "records"])?;
        let per_page = limit.to_string();
        let res = self
            .http
            .get(endpoint)
            .query(&[("page", "1"), ("perPage", per_page.as_str()), ("sort", "-created")])
            .send()?;
        let page: RecordPage = ensure_success(res)?.json()?;
        let mut items = page.items;
        items.truncate(limit);
        debug!(count = items.len(), "fetched remote prompt records");
        Ok(items)
    }

    fn write_bulk_prompts(&self, record_id: &str, payload: &str) -> Result<(), AppError> {
        let endpoint =
            self.api_url(&["api", "collections", BULK_COLLECTION, "records", record_id])?;
        let mut body = serde_json::Map::new();
        body.insert(
            BULK_PAYLOAD_FIELD.to_string(),
            Value::String(payload.to_string()),
        );
        let res = self.http.patch(endpoint).json(&body).send()?;
        ensure_success(res)?;
        debug!(record_id, bytes = payload.len(), "wrote bulk prompt record");
        Ok(())
    }
}
