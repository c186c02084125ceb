//! Async client for the storefront web service.
//!
//! # Overview
//! Every backend route is exposed as a typed method on `ApiClient`. The
//! methods only shape requests: each one builds a `RequestDescriptor` and
//! hands it to `ApiClient::dispatch`, which attaches the JSON content type
//! and bearer token, executes the call through a `Transport`, and
//! normalizes the response into JSON, raw bytes, or an `ApiError`.
//!
//! # Design
//! - `ApiClient` holds only the immutable `ClientConfig` plus shared handles
//!   to a `TokenProvider` and a `Transport`.
//! - The token is fetched from the provider on every call; nothing is cached.
//! - Query strings are built through `Query`, which drops unset and default
//!   values in one place.
//! - No retries, timeouts or request deduplication: two identical calls are
//!   two network round-trips.

pub mod auth;
pub mod client;
pub mod config;
mod endpoints;
pub mod error;
pub mod form;
pub mod http;
pub mod query;
pub mod response;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use auth::{FileTokenStore, MemoryTokenStore, NoToken, TokenProvider, AUTH_TOKEN_KEY};
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use form::{MultipartForm, UploadFile};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody, RequestDescriptor};
pub use query::Query;
pub use response::{parse_response, ApiResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::*;
