//! Client configuration, loaded once at startup and passed to [`crate::ApiClient`].

use std::collections::BTreeMap;

use url::Url;

use crate::error::Error;

/// Base URL used when `FETCHWRAP_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "FETCHWRAP_API_URL";
/// Environment variable holding an optional bearer token.
pub const API_TOKEN_ENV: &str = "FETCHWRAP_API_TOKEN";

/// Where requests go and which headers every request carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Absolute `http`/`https` URL that request paths are joined onto.
    pub base_url: String,
    /// Headers sent with every request. Per-call headers win on collision.
    pub default_headers: BTreeMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_headers: BTreeMap::new(),
        }
    }

    /// Reads `FETCHWRAP_API_URL` and `FETCHWRAP_API_TOKEN` from the process environment.
    ///
    /// Empty values count as unset. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_env_with_base_url(None)
    }

    /// Like [`ClientConfig::from_env`], but `base_url` (when given) replaces
    /// `FETCHWRAP_API_URL` before anything is validated.
    pub fn from_env_with_base_url(base_url: Option<&str>) -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok(), base_url)
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        base_url: Option<&str>,
    ) -> Result<Self, Error> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = base_url
            .map(str::to_string)
            .or_else(|| non_empty(BASE_URL_ENV));
        let mut config = match base_url {
            Some(base_url) => Self::new(base_url.trim()),
            None => Self::default(),
        };
        if let Some(token) = non_empty(API_TOKEN_ENV) {
            config = config.with_bearer_token(token.trim());
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    pub fn with_bearer_token(self, token: &str) -> Self {
        self.with_header("Authorization", format!("Bearer {}", token))
    }

    /// Checks that the base URL is an absolute `http` or `https` URL.
    pub fn validate(&self) -> Result<(), Error> {
        validate_base_url(&self.base_url)
    }
}

pub(crate) fn validate_base_url(base_url: &str) -> Result<(), Error> {
    let url = Url::parse(base_url)
        .map_err(|e| Error::Config(format!("invalid base URL {:?}: {}", base_url, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::Config(format!(
            "base URL {:?} must use http or https, not {}",
            base_url, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let config = ClientConfig::from_lookup(lookup(&[]), None).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config =
            ClientConfig::from_lookup(lookup(&[(BASE_URL_ENV, "  "), (API_TOKEN_ENV, "")]), None)
                .unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn reads_base_url_and_token() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BASE_URL_ENV, "https://api.example.com/v1"),
            (API_TOKEN_ENV, "secret"),
        ]), None)
        .unwrap();
        assert_eq!(config.base_url, "https://api.example.com/v1");
        assert_eq!(
            config.default_headers.get("Authorization").map(String::as_str),
            Some("Bearer secret")
        );
    }

    #[test]
    fn rejects_relative_base_url() {
        let err = ClientConfig::from_lookup(lookup(&[(BASE_URL_ENV, "/api")]), None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn override_replaces_invalid_env_base_url() {
        let config = ClientConfig::from_lookup(
            lookup(&[(BASE_URL_ENV, "localhost:3000"), (API_TOKEN_ENV, "secret")]),
            Some("https://api.example.com"),
        )
        .unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(
            config.default_headers.get("Authorization").map(String::as_str),
            Some("Bearer secret")
        );
    }

    #[test]
    fn invalid_override_is_rejected() {
        let err = ClientConfig::from_lookup(
            lookup(&[(BASE_URL_ENV, "https://api.example.com")]),
            Some("localhost:3000"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = ClientConfig::new("ftp://files.example.com").validate().unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }
}
