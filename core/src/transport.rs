//! Network execution of resolved requests.
//!
//! `ApiClient` only talks to the network through `Transport`, so tests can
//! substitute a recording implementation and the default can be swapped for
//! a preconfigured `reqwest::Client` (proxies, custom TLS, timeouts).

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::error::ApiError;
use crate::form::{MultipartForm, PartValue};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};

/// Executes one HTTP round-trip.
///
/// Implementations return non-2xx responses as `Ok`; status interpretation
/// belongs to the dispatcher. Only failures to obtain a response are `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `Transport` backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn multipart(form: MultipartForm) -> Result<Form, ApiError> {
    let mut out = Form::new();
    for part in form.into_parts() {
        out = match part.value {
            PartValue::Text(text) => out.text(part.name, text),
            PartValue::File(file) => {
                let body = Part::bytes(file.data.to_vec())
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)
                    .map_err(|e| ApiError::Serialization(e.to_string()))?;
                out.part(part.name, body)
            }
        };
    }
    Ok(out)
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.client.request(method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(text) => builder.body(text),
            RequestBody::Multipart(form) => builder.multipart(multipart(form)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(Box::new(e)))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(Box::new(e)))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::UploadFile;

    #[test]
    fn maps_methods() {
        assert_eq!(method(HttpMethod::Get), reqwest::Method::GET);
        assert_eq!(method(HttpMethod::Delete), reqwest::Method::DELETE);
    }

    #[test]
    fn rejects_invalid_part_mime() {
        let form = MultipartForm::new().file("image", UploadFile::new("a", "not a mime", &b"x"[..]));
        assert!(matches!(multipart(form), Err(ApiError::Serialization(_))));
    }

    #[tokio::test]
    async fn refused_connection_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let request = HttpRequest {
            method: HttpMethod::Get,
            url: format!("http://{addr}/health"),
            headers: Vec::new(),
            body: RequestBody::Empty,
        };
        let err = ReqwestTransport::new().execute(request).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
