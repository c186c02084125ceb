use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::RequestDescriptor;

impl ApiClient {
    pub async fn get_privacy_settings(&self) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get("/privacy/settings")).await
    }

    pub async fn update_privacy_settings(&self, settings: &Value) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::put("/privacy/settings").with_json(settings)?)
            .await
    }
}
