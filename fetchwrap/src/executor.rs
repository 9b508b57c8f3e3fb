//! Request executor: sends one request and maps every outcome onto `Option<T>` or [`ApiError`].

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::{
    request::{RequestBody, RequestOptions},
    ApiError,
};

/// Body fields checked, in order, for a server-supplied error message.
const MESSAGE_FIELDS: [&str; 2] = ["message", "error"];

/// Issues single-shot HTTP requests.
///
/// Holds a `reqwest::Client` so connections are pooled between calls; nothing
/// else is shared. There is no retry, timeout or cancellation layer: each call
/// runs until the transport resolves or fails.
#[derive(Clone, Debug, Default)]
pub struct Executor {
    http: reqwest::Client,
}

impl Executor {
    /// Creates an executor with a default `reqwest::Client`.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Creates an executor over a preconfigured client (proxies, TLS roots, ...).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Sends a request to `endpoint` and decodes the JSON response.
    ///
    /// Returns `Ok(None)` for `204 No Content` without reading the body. Every
    /// other outcome is either the decoded body or an [`ApiError`]:
    ///
    /// - no response (connect/DNS failure, invalid method, header or URL): status `0`
    /// - non-2xx response: the response status, with the message taken from the
    ///   body's `message` or `error` field, else the known-code table, else a
    ///   generic message
    /// - 2xx response whose body is not valid JSON for `T`: the response status
    pub async fn execute<T>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let RequestOptions {
            method,
            headers,
            body,
        } = options;

        let multipart = body.as_ref().is_some_and(RequestBody::is_multipart);
        let headers = resolve_headers(endpoint, &headers, multipart)?;

        let mut request = self.http.request(method.clone(), endpoint);
        request = match body {
            None => request,
            Some(RequestBody::Json(value)) => request.body(value.to_string()),
            Some(RequestBody::Multipart(form)) => request.multipart(form),
        };
        // Caller headers go on last so they replace anything the body setter added.
        request = request.headers(headers);

        tracing::debug!(method = %method, endpoint, "sending request");
        let resp = request.send().await.map_err(|e| {
            tracing::warn!(method = %method, endpoint, "request failed before a response: {}", e);
            ApiError::network(endpoint, e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            let message = extract_error_message(resp).await;
            let err = ApiError::new(status.as_u16(), message, endpoint);
            tracing::warn!(
                method = %method,
                endpoint,
                status = status.as_u16(),
                "request failed: {}",
                err.message()
            );
            return Err(err);
        }

        if status == StatusCode::NO_CONTENT {
            tracing::debug!(method = %method, endpoint, "no content");
            return Ok(None);
        }

        let bytes = resp.bytes().await.map_err(|e| {
            tracing::warn!(method = %method, endpoint, "failed to read response body: {}", e);
            ApiError::unparsable(status.as_u16(), endpoint, e)
        })?;

        let parsed = serde_json::from_slice::<T>(&bytes).map_err(|e| {
            let snippet = truncate_body(&String::from_utf8_lossy(&bytes));
            tracing::warn!(
                method = %method,
                endpoint,
                status = status.as_u16(),
                "failed to parse response: {} | body: {}",
                e,
                snippet
            );
            ApiError::unparsable(status.as_u16(), endpoint, e)
        })?;

        Ok(Some(parsed))
    }
}

/// Builds the outgoing header set. JSON and bodiless requests start from
/// `Content-Type: application/json`; multipart requests start empty so the
/// transport can set the boundary. Caller values replace defaults by name.
fn resolve_headers(
    endpoint: &str,
    caller: &BTreeMap<String, String>,
    multipart: bool,
) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    if !multipart {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    for (name, value) in caller {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::network(endpoint, e))?;
        let value = HeaderValue::from_str(value).map_err(|e| ApiError::network(endpoint, e))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Best-effort message from an error body. Any read or parse failure yields `None`.
async fn extract_error_message(resp: reqwest::Response) -> Option<String> {
    let bytes = resp.bytes().await.ok()?;
    let body = serde_json::from_slice::<serde_json::Value>(&bytes).ok()?;
    MESSAGE_FIELDS.iter().find_map(|field| {
        body.get(field)
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 500;
    match body.char_indices().nth(MAX) {
        None => body.to_string(),
        Some((idx, _)) => format!("{}...[truncated]", &body[..idx]),
    }
}
