use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::RequestDescriptor;
use crate::query::Query;
use crate::types::{Id, InteractionKind};

impl ApiClient {
    /// Personalized recommendations; `algorithm` selects the backend strategy
    /// (e.g. `collaborative`, `content`, `hybrid`).
    pub async fn get_recommendations(
        &self,
        limit: Option<u32>,
        algorithm: Option<&str>,
    ) -> Result<Value, ApiError> {
        let query = Query::new().push("limit", limit).push("algorithm", algorithm);
        self.request_json(RequestDescriptor::get("/recommendations").with_query(query))
            .await
    }

    pub async fn get_similar_products(
        &self,
        product_id: Id,
        limit: Option<u32>,
    ) -> Result<Value, ApiError> {
        let query = Query::new().push("limit", limit);
        self.request_json(
            RequestDescriptor::get(format!("/recommendations/similar/{product_id}"))
                .with_query(query),
        )
        .await
    }

    pub async fn get_trending_products(
        &self,
        limit: Option<u32>,
        days: Option<u32>,
    ) -> Result<Value, ApiError> {
        let query = Query::new().push("limit", limit).push("days", days);
        self.request_json(RequestDescriptor::get("/recommendations/trending").with_query(query))
            .await
    }

    pub async fn record_interaction(
        &self,
        product_id: Id,
        kind: InteractionKind,
    ) -> Result<Value, ApiError> {
        let body = json!({ "product_id": product_id, "interaction_type": kind });
        self.request_json(RequestDescriptor::post("/recommendations/interactions").with_json(&body)?)
            .await
    }

    pub async fn get_product_analytics(&self, product_id: Id) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get(format!("/analytics/products/{product_id}")))
            .await
    }

    pub async fn get_user_analytics(&self) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get("/analytics/user")).await
    }
}
