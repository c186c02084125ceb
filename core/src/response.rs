//! Response normalization.
//!
//! # Design
//! Failures become `ApiError::Http` carrying the backend's `error` field, or
//! the generic status message when the body has none (including bodies that
//! are not JSON at all). Successful bodies are returned as parsed JSON; a
//! body that is not JSON (a file download) is handed back untouched. The
//! received bytes are kept either way, so `into_bytes` never re-encodes.
//!
//! Only a missing or JSON content type is parsed. A `text/plain` body that
//! happens to hold JSON stays `Raw`.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpResponse;

/// Normalized successful response.
#[derive(Debug, Clone)]
pub enum ApiResponse {
    /// Parsed body plus the bytes it was parsed from.
    Json { value: Value, body: Bytes },
    Raw(HttpResponse),
}

impl ApiResponse {
    /// JSON value of the response. A raw UTF-8 body becomes a JSON string.
    pub fn into_json(self) -> Result<Value, ApiError> {
        match self {
            ApiResponse::Json { value, .. } => Ok(value),
            ApiResponse::Raw(response) => String::from_utf8(response.body.to_vec())
                .map(Value::String)
                .map_err(|e| ApiError::Deserialization(e.to_string())),
        }
    }

    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let value = self.into_json()?;
        serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Body bytes exactly as received.
    pub fn into_bytes(self) -> Bytes {
        match self {
            ApiResponse::Json { body, .. } => body,
            ApiResponse::Raw(response) => response.body,
        }
    }
}

/// Map a transport response to a normalized result.
pub fn parse_response(response: HttpResponse) -> Result<ApiResponse, ApiError> {
    if !response.is_success() {
        return Err(error_from_response(&response));
    }
    if response.body.is_empty() {
        return Ok(ApiResponse::Json {
            value: Value::Null,
            body: response.body,
        });
    }
    let json_like = response
        .content_type()
        .map_or(true, |ct| ct.to_ascii_lowercase().contains("json"));
    if json_like {
        if let Ok(value) = serde_json::from_slice(&response.body) {
            return Ok(ApiResponse::Json {
                value,
                body: response.body,
            });
        }
    }
    Ok(ApiResponse::Raw(response))
}

/// Build the error for a non-2xx response.
pub fn error_from_response(response: &HttpResponse) -> ApiError {
    let message = serde_json::from_slice::<Value>(&response.body)
        .ok()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| ApiError::fallback_message(response.status));
    ApiError::Http {
        status: response.status,
        message,
    }
}
