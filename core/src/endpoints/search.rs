//! Visual (image) and voice search.

use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::form::{MultipartForm, UploadFile};
use crate::http::RequestDescriptor;
use crate::query::{Query, QueryValue};
use crate::types::Id;

impl ApiClient {
    /// Find products resembling an uploaded image.
    pub async fn visual_search(
        &self,
        image: UploadFile,
        limit: Option<u32>,
    ) -> Result<Value, ApiError> {
        let mut form = MultipartForm::new().file("image", image);
        if let Some(limit) = limit.render() {
            form = form.text("limit", limit);
        }
        self.request_json(RequestDescriptor::post("/search/visual").with_form(form))
            .await
    }

    pub async fn visual_search_similar(
        &self,
        product_id: Id,
        limit: Option<u32>,
    ) -> Result<Value, ApiError> {
        let query = Query::new().push("limit", limit);
        self.request_json(
            RequestDescriptor::get(format!("/search/visual/similar/{product_id}")).with_query(query),
        )
        .await
    }

    /// Transcribe recorded audio and search with the transcript.
    pub async fn voice_search(
        &self,
        audio: UploadFile,
        language: Option<&str>,
    ) -> Result<Value, ApiError> {
        let mut form = MultipartForm::new().file("audio", audio);
        if let Some(language) = language.render() {
            form = form.text("language", language);
        }
        self.request_json(RequestDescriptor::post("/search/voice").with_form(form))
            .await
    }

    /// Search with a transcript produced client-side.
    pub async fn voice_search_text(
        &self,
        transcript: &str,
        language: Option<&str>,
    ) -> Result<Value, ApiError> {
        let mut body = json!({ "query": transcript });
        if let Some(language) = language.render() {
            body["language"] = Value::String(language);
        }
        self.request_json(RequestDescriptor::post("/search/voice/text").with_json(&body)?)
            .await
    }

    pub async fn voice_languages(&self) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get("/search/voice/languages"))
            .await
    }
}
