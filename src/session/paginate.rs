//! Pagination aggregation
//!
//! [`PapiSession::send`] follows `resume` tokens across pages and merges the
//! pages into a single JSON object. Array fields are concatenated in page
//! order; any other field takes the value from the latest page.
//!
//! A 401 answer triggers a reconnect and a restart of the whole call with the
//! original request, at most `max_reauth_attempts` times per call.

use crate::{
    Error, Result,
    session::PapiSession,
    types::{ApiErrorEntry, ApiRequest, JsonObject, RawResponse},
};
use reqwest::StatusCode;
use serde_json::Value;
use std::borrow::Cow;

/// Upper bound on pages fetched by a single `send`
pub const MAX_PAGE_COUNT: usize = 10_000;

/// Page metadata removed before merging
const PAGE_METADATA_FIELDS: [&str; 3] = ["errors", "resume", "total"];

/// Outcome of one pass over the page chain
#[derive(Debug)]
enum PageOutcome {
    /// All pages fetched, or an empty body ended the chain
    Complete(Option<JsonObject>),
    /// The session was rejected; the call may be retried after re-authentication
    Unauthorized(RawResponse),
}

impl PapiSession {
    /// Performs an API call, following continuation tokens and merging pages.
    ///
    /// Returns `Ok(None)` when a page comes back with an empty body (e.g. most
    /// DELETE calls); pages merged before it are discarded.
    ///
    /// # Errors
    ///
    /// - [`Error::Api`] for any non-2xx status other than a recoverable 401
    /// - [`Error::Auth`] when a 401 persists after the allowed re-authentications
    /// - [`Error::ApiErrors`] when merged state carries an `errors` field
    /// - [`Error::Decode`] when a body is not a JSON object
    /// - transport errors from [`PapiSession::send_raw`] and [`PapiSession::reconnect`]
    pub async fn send(&mut self, request: &ApiRequest) -> Result<Option<JsonObject>> {
        let mut reauth_attempts = 0;
        loop {
            match self.collect_pages(request).await? {
                PageOutcome::Complete(body) => return Ok(body),
                PageOutcome::Unauthorized(raw) => {
                    if reauth_attempts >= self.config.max_reauth_attempts {
                        tracing::error!(
                            "Automatic re-authentication failed after {} attempt(s)",
                            reauth_attempts
                        );
                        return Err(Error::auth(format!(
                            "Re-authentication exhausted ({}): {}",
                            raw.status.as_u16(),
                            raw.text()
                        )));
                    }
                    reauth_attempts += 1;
                    tracing::warn!(
                        "Session rejected for {} {}, re-authenticating (attempt {})",
                        request.method,
                        request.path.joined(),
                        reauth_attempts
                    );
                    // connect resets the counter; carry it across the reconnect
                    let prior = self.reauth_count;
                    self.reconnect().await?;
                    self.reauth_count = prior + 1;
                }
            }
        }
    }

    async fn collect_pages(&self, request: &ApiRequest) -> Result<PageOutcome> {
        let mut merged = JsonObject::new();
        let mut resume: Option<String> = None;

        for page in 0..MAX_PAGE_COUNT {
            let current = match &resume {
                Some(token) => Cow::Owned(request.resumed(token)),
                None => Cow::Borrowed(request),
            };

            let raw = self.send_raw(&current).await?;
            if raw.status == StatusCode::UNAUTHORIZED {
                return Ok(PageOutcome::Unauthorized(raw));
            }
            if !raw.is_success() {
                return Err(Error::api(raw.status.as_u16(), raw.text()));
            }
            if raw.body.is_empty() {
                return Ok(PageOutcome::Complete(None));
            }

            let mut body = decode_page(&raw.body)?;
            resume = resume_token(&body)?;

            if let Some(errors) = merged.get("errors") {
                return Err(Error::ApiErrors(error_entries(errors)));
            }
            strip_page_metadata(&mut body);
            merge_page(&mut merged, body);

            tracing::debug!(
                "Merged page {} of {}{}",
                page + 1,
                request.path.joined(),
                if resume.is_some() { ", more to follow" } else { "" }
            );
            if resume.is_none() {
                return Ok(PageOutcome::Complete(Some(merged)));
            }
        }

        tracing::warn!(
            "Stopped following resume tokens for {} after {} pages",
            request.path.joined(),
            MAX_PAGE_COUNT
        );
        Ok(PageOutcome::Complete(Some(merged)))
    }
}

/// Decode a page body that must be a JSON object
pub fn decode_page(body: &[u8]) -> Result<JsonObject> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| Error::decode(format!("Error unmarshaling JSON: {}", e)))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::decode(format!(
            "Expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Continuation token of a page: `Some` for a string `resume`, `None` when absent or null
pub fn resume_token(page: &JsonObject) -> Result<Option<String>> {
    match page.get("resume") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(token)) => Ok(Some(token.clone())),
        Some(other) => Err(Error::decode(format!(
            "resume token must be a string, got {}",
            json_kind(other)
        ))),
    }
}

/// Remove `errors`, `resume` and `total` from a page
pub fn strip_page_metadata(page: &mut JsonObject) {
    for field in PAGE_METADATA_FIELDS {
        page.remove(field);
    }
}

/// Merge a page into the accumulated result.
///
/// When both sides hold arrays the page's elements are appended; otherwise
/// the page's value replaces the accumulated one.
pub fn merge_page(merged: &mut JsonObject, page: JsonObject) {
    for (key, value) in page {
        match value {
            Value::Array(items) => {
                if let Some(Value::Array(existing)) = merged.get_mut(&key) {
                    existing.extend(items);
                    continue;
                }
                merged.insert(key, Value::Array(items));
            }
            other => {
                merged.insert(key, other);
            }
        }
    }
}

fn error_entries(errors: &Value) -> Vec<ApiErrorEntry> {
    match serde_json::from_value::<Vec<ApiErrorEntry>>(errors.clone()) {
        Ok(entries) => entries,
        Err(_) => vec![ApiErrorEntry::new("", errors.to_string())],
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
