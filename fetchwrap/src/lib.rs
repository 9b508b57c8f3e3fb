//! Single-shot HTTP request executor that normalizes every failure into one [`ApiError`].
//!
//! Successful responses are decoded from JSON, `204 No Content` yields `Ok(None)`,
//! and transport failures, non-2xx statuses and malformed success bodies all
//! surface as an [`ApiError`] that callers classify through its predicates.

mod errors;
mod executor;
mod request;
mod status;
pub use self::errors::{ApiError, ErrorKind};
pub use self::executor::Executor;
pub use self::request::{RequestBody, RequestOptions};
pub use self::status::KnownErrorCode;

pub use reqwest::multipart;
pub use reqwest::Method;
