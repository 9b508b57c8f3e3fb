//! Request descriptor: method, headers and body for a single call.

use std::collections::BTreeMap;

use reqwest::multipart::Form;
use reqwest::Method;
use serde::Serialize;

/// Request body, tagged by the caller.
#[derive(Debug)]
pub enum RequestBody {
    /// Sent as JSON text with `Content-Type: application/json` unless overridden.
    Json(serde_json::Value),
    /// Sent unchanged; the transport sets the multipart content type and boundary.
    Multipart(Form),
}

impl RequestBody {
    /// Encodes any serializable value as a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        serde_json::to_value(value).map(RequestBody::Json)
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<Form> for RequestBody {
    fn from(form: Form) -> Self {
        RequestBody::Multipart(form)
    }
}

/// Options for one request. The default is a bodiless `GET` with no extra headers.
#[derive(Debug, Default)]
pub struct RequestOptions {
    /// HTTP method. Not validated against the common verbs; extension methods pass through.
    pub method: Method,
    /// Caller headers. These win over the default JSON content type on collision.
    pub headers: BTreeMap<String, String>,
    pub body: Option<RequestBody>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Adds a header, replacing any earlier value for the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_json(self, value: serde_json::Value) -> Self {
        self.with_body(RequestBody::Json(value))
    }

    pub fn with_multipart(self, form: Form) -> Self {
        self.with_body(RequestBody::Multipart(form))
    }
}
