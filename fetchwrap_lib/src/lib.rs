//! Library layer for fetchwrap: per-base-URL API clients, configuration, and example domain calls.
//!
//! Wraps the `fetchwrap` executor with URL joining, client-wide default
//! headers, typed verb helpers, and environment-driven configuration.

pub mod client;
pub mod config;
pub mod error;
pub mod endpoint;
pub mod users;

pub use fetchwrap;
pub use fetchwrap::{ApiError, ErrorKind, KnownErrorCode, Method, RequestBody, RequestOptions};

pub use client::{ApiClient, ApiClientBuilder};
pub use config::ClientConfig;
pub use error::Error;
pub use users::{NewUser, User, UserPatch};
