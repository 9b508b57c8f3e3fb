//! The single error shape returned for every failed request.

use std::error::Error as StdError;

use crate::status::{default_message_for, KnownErrorCode};

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Message prefix for failures that happened before any response arrived.
const NETWORK_ERROR: &str = "Network error";
/// Message for a success status whose body could not be decoded.
const PARSE_ERROR: &str = "Failed to parse response";

/// A failed request.
///
/// `status_code` is the HTTP status of the response, or `0` when no response
/// was received at all. The value is immutable once constructed; inspect it
/// through the accessor and classification methods.
#[derive(thiserror::Error, Debug)]
#[error("{message} (status: {status_code})")]
pub struct ApiError {
    status_code: u16,
    message: String,
    known_code: Option<KnownErrorCode>,
    endpoint: String,
    #[source]
    source: Option<BoxError>,
}

/// Text of `cause`, followed by its innermost source when the top level does not already say it.
/// For reqwest that is where the OS-level reason (refused, DNS) lives.
fn describe_cause(cause: &(dyn StdError + 'static)) -> String {
    let mut innermost = cause;
    while let Some(next) = innermost.source() {
        innermost = next;
    }
    let top = cause.to_string();
    let root = innermost.to_string();
    if top.contains(&root) {
        top
    } else {
        format!("{} ({})", top, root)
    }
}

/// Coarse origin of an [`ApiError`], derived from its status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response was received (status 0).
    Network,
    /// The server answered with a non-success status.
    Status,
    /// The server answered 2xx but the body could not be decoded.
    MalformedResponse,
}

impl ApiError {
    /// Builds an error for `status_code`, falling back to the known-code table
    /// (or a generic message) when `message` is `None`.
    pub fn new(status_code: u16, message: Option<String>, endpoint: impl Into<String>) -> Self {
        let message = message.unwrap_or_else(|| default_message_for(status_code));
        Self {
            status_code,
            message,
            known_code: KnownErrorCode::from_status(status_code),
            endpoint: endpoint.into(),
            source: None,
        }
    }

    /// Transport failure: the request never produced a response.
    pub(crate) fn network<E>(endpoint: &str, cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        let cause = cause.into();
        let message = format!("{}: {}", NETWORK_ERROR, describe_cause(cause.as_ref()));
        Self::new(0, Some(message), endpoint).with_source(cause)
    }

    /// The response reported `status_code` but its body was not valid for the caller.
    pub(crate) fn unparsable<E>(status_code: u16, endpoint: &str, cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::new(status_code, Some(PARSE_ERROR.to_string()), endpoint).with_source(cause.into())
    }

    fn with_source(mut self, cause: BoxError) -> Self {
        self.source = Some(cause);
        self
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The table entry for the status, if the status is one of the known codes.
    pub fn known_code(&self) -> Option<KnownErrorCode> {
        self.known_code
    }

    /// The endpoint the failed request was sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status_code {
            0 => ErrorKind::Network,
            200..=299 => ErrorKind::MalformedResponse,
            _ => ErrorKind::Status,
        }
    }

    pub fn is_status(&self, code: u16) -> bool {
        self.status_code == code
    }

    /// True for 401 and 403.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status_code, 401 | 403)
    }

    /// True for 4xx.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    /// True for 5xx.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    /// True when no response was received. Status 0 is neither a client nor a server error.
    pub fn is_network_error(&self) -> bool {
        self.status_code == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn err(status: u16) -> ApiError {
        ApiError::new(status, None, "/api/users")
    }

    #[test]
    fn explicit_message_wins_over_table() {
        let e = ApiError::new(404, Some("User 7 does not exist".to_string()), "/api/users/7");
        assert_eq!(e.message(), "User 7 does not exist");
        assert_eq!(e.known_code(), Some(KnownErrorCode::NotFound));
        assert_eq!(e.endpoint(), "/api/users/7");
    }

    #[test]
    fn explicit_message_wins_for_unknown_status() {
        let e = ApiError::new(409, Some("Email already registered".to_string()), "/api/users");
        assert_eq!(e.message(), "Email already registered");
        assert_eq!(e.known_code(), None);
    }

    #[test]
    fn missing_message_falls_back_to_table_then_generic() {
        assert_eq!(err(401).message(), "Authentication required");
        assert_eq!(err(422).message(), "Unknown error (status: 422)");
        assert_eq!(err(422).known_code(), None);
    }

    #[test]
    fn auth_error_is_exactly_401_and_403() {
        for status in [0, 200, 400, 402, 404, 405, 500] {
            assert!(!err(status).is_auth_error(), "status {}", status);
        }
        assert!(err(401).is_auth_error());
        assert!(err(403).is_auth_error());
    }

    #[test]
    fn client_and_server_ranges() {
        assert!(err(400).is_client_error());
        assert!(err(499).is_client_error());
        assert!(!err(500).is_client_error());
        assert!(!err(399).is_client_error());

        assert!(err(500).is_server_error());
        assert!(err(599).is_server_error());
        assert!(!err(600).is_server_error());
        assert!(!err(499).is_server_error());
    }

    #[test]
    fn network_error_is_outside_both_ranges() {
        let e = ApiError::network("http://localhost:1/api", "connection refused");
        assert_eq!(e.status_code(), 0);
        assert!(e.is_network_error());
        assert!(!e.is_client_error());
        assert!(!e.is_server_error());
        assert!(!e.is_auth_error());
        assert_eq!(e.kind(), ErrorKind::Network);
        assert_eq!(e.message(), "Network error: connection refused");
        assert!(e.source().is_some());
    }

    #[derive(thiserror::Error, Debug)]
    #[error("error sending request for url (http://127.0.0.1:9/api/users)")]
    struct SendFailure(#[source] ConnectFailure);

    #[derive(thiserror::Error, Debug)]
    #[error("client error (Connect)")]
    struct ConnectFailure(#[source] std::io::Error);

    #[test]
    fn network_message_includes_innermost_cause() {
        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");
        let e = ApiError::network("http://127.0.0.1:9/api/users", SendFailure(ConnectFailure(refused)));
        assert_eq!(
            e.message(),
            "Network error: error sending request for url (http://127.0.0.1:9/api/users) (Connection refused)"
        );
        assert!(e.source().is_some());
    }

    #[test]
    fn unparsable_keeps_success_status() {
        let cause = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let e = ApiError::unparsable(200, "/api/users", cause);
        assert_eq!(e.status_code(), 200);
        assert_eq!(e.message(), "Failed to parse response");
        assert_eq!(e.kind(), ErrorKind::MalformedResponse);
        assert!(e.source().is_some());
    }

    #[test]
    fn is_status_is_exact_match() {
        assert!(err(404).is_status(404));
        assert!(!err(404).is_status(400));
    }

    #[test]
    fn display_includes_message_and_status() {
        assert_eq!(err(500).to_string(), "Internal server error (status: 500)");
        assert_eq!(err(500).kind(), ErrorKind::Status);
    }
}
