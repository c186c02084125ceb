//! GDPR consent, erasure and data-portability routes.

use bytes::Bytes;
use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::RequestDescriptor;
use crate::types::ExportFormat;

impl ApiClient {
    pub async fn get_consents(&self) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get("/gdpr/consent")).await
    }

    pub async fn update_consent(&self, consent_type: &str, granted: bool) -> Result<Value, ApiError> {
        let body = json!({ "consent_type": consent_type, "granted": granted });
        self.request_json(RequestDescriptor::post("/gdpr/consent").with_json(&body)?)
            .await
    }

    pub async fn request_data_deletion(&self, reason: Option<&str>) -> Result<Value, ApiError> {
        let body = match reason {
            Some(r) if !r.is_empty() => json!({ "reason": r }),
            _ => json!({}),
        };
        self.request_json(RequestDescriptor::post("/gdpr/deletion-request").with_json(&body)?)
            .await
    }

    pub async fn get_deletion_status(&self) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get("/gdpr/deletion-request"))
            .await
    }

    pub async fn cancel_data_deletion(&self) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::delete("/gdpr/deletion-request"))
            .await
    }

    pub async fn request_data_export(&self, format: ExportFormat) -> Result<Value, ApiError> {
        self.request_json(
            RequestDescriptor::post("/gdpr/export").with_json(&json!({ "format": format }))?,
        )
        .await
    }

    pub async fn get_export_status(&self, export_id: &str) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get(format!("/gdpr/export/{export_id}")))
            .await
    }

    /// Download a finished export as raw bytes. Uses the same bearer token as
    /// every other call.
    pub async fn download_data_export(&self, export_id: &str) -> Result<Bytes, ApiError> {
        self.request_bytes(RequestDescriptor::get(format!("/gdpr/export/{export_id}/download")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use crate::http::{HttpMethod, HttpResponse};
    use crate::testing::{json_body, json_response, recording_client, RecordingTransport};
    use crate::{ApiClient, ClientConfig, MemoryTokenStore};

    use super::*;

    #[tokio::test]
    async fn download_returns_binary_body() {
        let transport = RecordingTransport::new();
        transport.push(HttpResponse {
            status: 200,
            headers: vec![("content-type".to_string(), "application/zip".to_string())],
            body: Bytes::from_static(b"PK\x03\x04payload"),
        });
        let client = ApiClient::new(ClientConfig::new("http://api.test"))
            .with_transport(transport.clone())
            .with_token_provider(MemoryTokenStore::with_token("abc"));

        let bytes = client.download_data_export("exp-1").await.unwrap();
        assert_eq!(&bytes[..], b"PK\x03\x04payload");

        let req = transport.last();
        assert_eq!(req.url, "http://api.test/gdpr/export/exp-1/download");
        assert_eq!(req.header("authorization"), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn json_export_download_is_byte_exact() {
        let exported = b"{\n  \"username\": \"ana\",\n  \"email\": \"a@b.com\"\n}\n";
        let transport = RecordingTransport::new();
        transport.push(HttpResponse {
            status: 200,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Bytes::from_static(exported),
        });
        let client = ApiClient::new(ClientConfig::new("http://api.test")).with_transport(transport);

        let bytes = client.download_data_export("exp-1").await.unwrap();
        assert_eq!(&bytes[..], &exported[..]);
    }

    #[tokio::test]
    async fn download_failure_is_http_error() {
        let transport = RecordingTransport::new();
        transport.push(json_response(410, r#"{"error":"export expired"}"#));
        let client = ApiClient::new(ClientConfig::new("http://api.test")).with_transport(transport);

        let err = client.download_data_export("exp-1").await.unwrap_err();
        assert_eq!(err.to_string(), "export expired");
    }

    #[tokio::test]
    async fn consent_and_deletion_bodies() {
        let (client, transport) = recording_client();
        client.update_consent("marketing", false).await.unwrap();
        assert_eq!(
            json_body(&transport.last()),
            json!({"consent_type": "marketing", "granted": false})
        );

        let (client, transport) = recording_client();
        client.request_data_deletion(Some("closing account")).await.unwrap();
        assert_eq!(json_body(&transport.last()), json!({"reason": "closing account"}));

        let (client, transport) = recording_client();
        client.cancel_data_deletion().await.unwrap();
        let req = transport.last();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://api.test/gdpr/deletion-request");
    }

    #[tokio::test]
    async fn export_request_format() {
        let (client, transport) = recording_client();
        client.request_data_export(ExportFormat::Csv).await.unwrap();
        assert_eq!(json_body(&transport.last()), json!({"format": "csv"}));
    }
}
