//! Request dispatcher for the storefront API.
//!
//! # Design
//! `ApiClient` holds the immutable `ClientConfig`, a `TokenProvider` and a
//! `Transport`; it keeps no other state between calls. Every endpoint wrapper
//! produces a `RequestDescriptor` and hands it to `dispatch`, which resolves
//! it with `build_request`, executes it, and normalizes the result with
//! `parse_response`. `build_request` is pure, so header and URL composition
//! is testable without the network.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::{NoToken, TokenProvider};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, RequestDescriptor, APPLICATION_JSON, AUTHORIZATION, CONTENT_TYPE};
use crate::response::{parse_response, ApiResponse};
use crate::transport::{ReqwestTransport, Transport};

/// Client for the storefront backend. Cheap to clone; clones share the
/// token provider and transport.
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    tokens: Arc<dyn TokenProvider>,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Unauthenticated client using the default `reqwest` transport.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            tokens: Arc::new(NoToken),
            transport: Arc::new(ReqwestTransport::new()),
        }
    }

    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    pub fn with_token_provider(mut self, tokens: impl TokenProvider + 'static) -> Self {
        self.tokens = Arc::new(tokens);
        self
    }

    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve a descriptor into the request sent over the wire.
    ///
    /// Headers are layered, later layers replacing earlier ones by
    /// case-insensitive name: JSON content type (skipped for multipart
    /// bodies), bearer token, caller headers.
    pub fn build_request(&self, descriptor: RequestDescriptor) -> HttpRequest {
        let mut headers = Vec::new();
        if !descriptor.body.is_multipart() {
            set_header(&mut headers, CONTENT_TYPE, APPLICATION_JSON);
        }
        if let Some(token) = self.tokens.token() {
            set_header(&mut headers, AUTHORIZATION, &format!("Bearer {token}"));
        }
        for (name, value) in &descriptor.headers {
            set_header(&mut headers, name, value);
        }

        HttpRequest {
            method: descriptor.method,
            url: format!("{}{}", self.config.base_url(), descriptor.path),
            headers,
            body: descriptor.body,
        }
    }

    /// Execute a descriptor and normalize the response.
    pub async fn dispatch(&self, descriptor: RequestDescriptor) -> Result<ApiResponse, ApiError> {
        self.dispatch_with(descriptor, Ok).await
    }

    /// Dispatch and convert the normalized response. Conversion failures are
    /// logged alongside transport and HTTP failures.
    async fn dispatch_with<T>(
        &self,
        descriptor: RequestDescriptor,
        convert: impl FnOnce(ApiResponse) -> Result<T, ApiError> + Send,
    ) -> Result<T, ApiError> {
        let path = descriptor.path.clone();
        let method = descriptor.method;
        let request = self.build_request(descriptor);
        tracing::debug!(method = method.as_str(), %path, "dispatching request");

        let result = match self.transport.execute(request).await {
            Ok(response) => parse_response(response).and_then(convert),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            tracing::error!(method = method.as_str(), %path, error = %err, "API request failed");
        }
        result
    }

    pub async fn request_json(&self, descriptor: RequestDescriptor) -> Result<Value, ApiError> {
        self.dispatch_with(descriptor, ApiResponse::into_json).await
    }

    pub async fn request_as<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<T, ApiError> {
        self.dispatch_with(descriptor, ApiResponse::into_typed).await
    }

    /// Response body exactly as received, whatever its content type.
    pub async fn request_bytes(&self, descriptor: RequestDescriptor) -> Result<Bytes, ApiError> {
        self.dispatch_with(descriptor, |response| Ok(response.into_bytes()))
            .await
    }

    /// `GET /health`.
    pub async fn health_check(&self) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get("/health")).await
    }
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value.to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;
    use crate::form::{MultipartForm, UploadFile};
    use crate::http::HttpMethod;
    use crate::testing::{json_response, LogBuffer, RecordingTransport};

    fn client() -> ApiClient {
        ApiClient::new(ClientConfig::new("http://localhost:5000/api"))
    }

    #[test]
    fn url_is_plain_concatenation() {
        let req = client().build_request(RequestDescriptor::get("/products/7"));
        assert_eq!(req.url, "http://localhost:5000/api/products/7");

        let slashed = ApiClient::new(ClientConfig::new("http://host/api/"));
        let req = slashed.build_request(RequestDescriptor::get("/health"));
        assert_eq!(req.url, "http://host/api//health");
    }

    #[test]
    fn json_content_type_by_default() {
        let req = client().build_request(RequestDescriptor::get("/categories"));
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.header("Authorization"), None);
    }

    #[test]
    fn token_becomes_bearer_header() {
        let client = client().with_token_provider(MemoryTokenStore::with_token("t0k3n"));
        let req = client.build_request(RequestDescriptor::get("/auth/profile"));
        assert_eq!(req.header("authorization"), Some("Bearer t0k3n"));
    }

    #[test]
    fn token_is_read_per_request() {
        let store = MemoryTokenStore::new();
        let client = client().with_token_provider(store.clone());

        let before = client.build_request(RequestDescriptor::get("/auth/profile"));
        store.set("fresh");
        let after = client.build_request(RequestDescriptor::get("/auth/profile"));

        assert_eq!(before.header("authorization"), None);
        assert_eq!(after.header("authorization"), Some("Bearer fresh"));
    }

    #[test]
    fn caller_headers_override_defaults() {
        let client = client().with_token_provider(MemoryTokenStore::with_token("abc"));
        let req = client.build_request(
            RequestDescriptor::get("/gdpr/export/1/download")
                .with_header("Content-Type", "text/csv")
                .with_header("Authorization", "Bearer other"),
        );
        assert_eq!(req.headers.len(), 2);
        assert_eq!(req.header("content-type"), Some("text/csv"));
        assert_eq!(req.header("authorization"), Some("Bearer other"));
    }

    #[test]
    fn multipart_body_has_no_content_type() {
        let client = client().with_token_provider(MemoryTokenStore::with_token("abc"));
        let form = MultipartForm::new().file("image", UploadFile::new("a.png", "image/png", &b"x"[..]));
        let req = client.build_request(RequestDescriptor::post("/auth/profile/image").with_form(form));
        assert_eq!(req.header("content-type"), None);
        assert_eq!(req.header("authorization"), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn dispatch_returns_json_unchanged() {
        let transport = RecordingTransport::new();
        transport.push(json_response(200, r#"{"status":"healthy","db":true}"#));
        let client = client().with_transport(transport.clone());

        let value = client.health_check().await.unwrap();
        assert_eq!(value, serde_json::json!({"status": "healthy", "db": true}));

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert_eq!(sent[0].url, "http://localhost:5000/api/health");
    }

    #[tokio::test]
    async fn dispatch_surfaces_backend_error() {
        let transport = RecordingTransport::new();
        transport.push(json_response(403, r#"{"error":"admin access required"}"#));
        let client = client().with_transport(transport);

        let err = client.request_json(RequestDescriptor::get("/admin/dashboard")).await.unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.to_string(), "admin access required");
    }

    #[tokio::test]
    async fn dispatch_propagates_transport_failure() {
        let transport = RecordingTransport::new();
        let client = client().with_transport(transport.clone());

        let err = client.health_check().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_calls_are_independent() {
        let transport = RecordingTransport::new();
        transport.push(json_response(200, "{}"));
        transport.push(json_response(200, "{}"));
        let client = client().with_transport(transport.clone());

        let (a, b) = tokio::join!(client.health_check(), client.health_check());
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn conversion_failure_is_logged() {
        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let transport = RecordingTransport::new();
        transport.push(json_response(200, r#"{"status":"healthy"}"#));
        let client = client().with_transport(transport);

        let err = client
            .request_as::<Vec<u64>>(RequestDescriptor::get("/health"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));

        let output = logs.contents();
        assert!(output.contains("API request failed"), "{output}");
        assert!(output.contains("/health"), "{output}");
    }

    #[test]
    fn debug_shows_base_url_only() {
        let rendered = format!("{:?}", client());
        assert!(rendered.contains("http://localhost:5000/api"));
    }
}
