use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::RequestDescriptor;

impl ApiClient {
    pub async fn performance_metrics(&self) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get("/performance/metrics"))
            .await
    }

    pub async fn cache_stats(&self) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get("/performance/cache/stats"))
            .await
    }

    /// Clear cached entries whose key matches `pattern`, or everything when
    /// no pattern is given.
    pub async fn clear_cache(&self, pattern: Option<&str>) -> Result<Value, ApiError> {
        let body = match pattern {
            Some(p) if !p.is_empty() => json!({ "pattern": p }),
            _ => json!({}),
        };
        self.request_json(RequestDescriptor::post("/performance/cache/clear").with_json(&body)?)
            .await
    }

    pub async fn warm_cache(&self) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::post("/performance/cache/warm"))
            .await
    }
}
