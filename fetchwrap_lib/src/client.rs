//! Per-base-URL API client with verb helpers over the `fetchwrap` executor.

use std::collections::BTreeMap;

use fetchwrap::multipart::Form;
use fetchwrap::{Executor, Method, RequestBody, RequestOptions};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{validate_base_url, ClientConfig, DEFAULT_BASE_URL};
use crate::endpoint::join_url;
use crate::error::Error;

/// API client bound to one base URL.
///
/// Request paths are joined onto the base URL, and the client's default
/// headers are sent with every request beneath any per-call headers. Each
/// call is a single round trip; failures come back as [`Error::Api`].
#[derive(Clone, Debug)]
pub struct ApiClient {
    executor: Executor,
    base_url: String,
    default_headers: BTreeMap<String, String>,
}

/// Builder for [`ApiClient`].
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    default_headers: BTreeMap<String, String>,
    http: Option<reqwest::Client>,
}

impl ApiClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Adds a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Takes the base URL and default headers from a loaded configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.base_url = Some(config.base_url);
        self.default_headers.extend(config.default_headers);
        self
    }

    /// Uses a preconfigured `reqwest::Client` instead of a default one.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> Result<ApiClient, Error> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        validate_base_url(&base_url)?;
        tracing::debug!(base_url = %base_url, "api client configured");
        let executor = match self.http {
            Some(http) => Executor::with_client(http),
            None => Executor::new(),
        };
        Ok(ApiClient {
            executor,
            base_url,
            default_headers: self.default_headers,
        })
    }
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, Error> {
        Self::builder().config(config).build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves `path` against the base URL.
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Sends a request with full control over method, headers and body.
    pub async fn request<T>(&self, path: &str, options: RequestOptions) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
    {
        let endpoint = self.url(path);
        let RequestOptions {
            method,
            headers,
            body,
        } = options;
        let options = RequestOptions {
            method,
            headers: merge_headers(&self.default_headers, headers),
            body,
        };
        Ok(self.executor.execute(&endpoint, options).await?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, Error> {
        self.request(path, RequestOptions::new()).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, path, body).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PATCH, path, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, Error> {
        self.request(path, RequestOptions::new().with_method(Method::DELETE))
            .await
    }

    /// POSTs a multipart form. No JSON content type is sent; the transport sets the boundary.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<Option<T>, Error> {
        let options = RequestOptions::new()
            .with_method(Method::POST)
            .with_multipart(form);
        self.request(path, options).await
    }

    async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = RequestBody::json(body)?;
        let options = RequestOptions::new().with_method(method).with_body(body);
        self.request(path, options).await
    }
}

/// Client defaults overlaid by per-call headers. Header names compare case-insensitively.
fn merge_headers(
    defaults: &BTreeMap<String, String>,
    per_call: BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged: BTreeMap<String, String> = defaults
        .iter()
        .filter(|(name, _)| !per_call.keys().any(|k| k.eq_ignore_ascii_case(name)))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    merged.extend(per_call);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_local_base_url() {
        let client = ApiClient::builder().build().unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn builder_rejects_invalid_base_url() {
        let err = ApiClient::builder().base_url("localhost").build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn from_config_carries_headers() {
        let config = ClientConfig::new("https://api.example.com").with_bearer_token("t0k");
        let client = ApiClient::from_config(config).unwrap();
        assert_eq!(client.url("/api/users"), "https://api.example.com/api/users");
        assert_eq!(
            client.default_headers.get("Authorization").map(String::as_str),
            Some("Bearer t0k")
        );
    }

    #[test]
    fn per_call_headers_win_case_insensitively() {
        let defaults = BTreeMap::from([
            ("Authorization".to_string(), "Bearer default".to_string()),
            ("X-Client".to_string(), "fetchwrap".to_string()),
        ]);
        let per_call = BTreeMap::from([("authorization".to_string(), "Bearer call".to_string())]);
        let merged = merge_headers(&defaults, per_call);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("authorization").map(String::as_str), Some("Bearer call"));
        assert_eq!(merged.get("X-Client").map(String::as_str), Some("fetchwrap"));
        assert!(!merged.contains_key("Authorization"));
    }
}
