//! Error types for the library layer.

use fetchwrap::ApiError;

/// Errors produced by the library layer, wrapping request failures and adding
/// body encoding, configuration, and missing-body failures.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request failed; classify it through [`ApiError`]'s predicates.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// A typed request body could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Client configuration is invalid (e.g. a malformed base URL).
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// The server answered `204 No Content` where a body was required.
    #[error("Empty response from {endpoint}")]
    EmptyResponse { endpoint: String },
}

impl Error {
    /// The underlying request failure, if this is one.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_is_transparent() {
        let err = Error::from(ApiError::new(404, None, "/api/users/9"));
        assert_eq!(err.to_string(), "Resource not found (status: 404)");
        assert!(err.api().is_some_and(|e| e.is_client_error()));
    }

    #[test]
    fn non_api_errors_have_no_status() {
        let err = Error::Config("base URL is empty".to_string());
        assert!(err.api().is_none());
        assert!(err.to_string().contains("base URL is empty"));

        let err = Error::EmptyResponse {
            endpoint: "/api/users/1".to_string(),
        };
        assert_eq!(err.to_string(), "Empty response from /api/users/1");
    }
}
