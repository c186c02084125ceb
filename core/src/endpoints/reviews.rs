use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::RequestDescriptor;
use crate::types::{Id, ReviewFilter, ReviewInput, ReviewUpdate};

impl ApiClient {
    pub async fn get_product_reviews(
        &self,
        product_id: Id,
        filter: &ReviewFilter,
    ) -> Result<Value, ApiError> {
        self.request_json(
            RequestDescriptor::get(format!("/products/{product_id}/reviews"))
                .with_query(filter.to_query()),
        )
        .await
    }

    pub async fn get_review(&self, id: Id) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get(format!("/reviews/{id}")))
            .await
    }

    pub async fn create_review(&self, product_id: Id, review: &ReviewInput) -> Result<Value, ApiError> {
        self.request_json(
            RequestDescriptor::post(format!("/products/{product_id}/reviews")).with_json(review)?,
        )
        .await
    }

    pub async fn update_review(&self, id: Id, update: &ReviewUpdate) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::put(format!("/reviews/{id}")).with_json(update)?)
            .await
    }

    pub async fn delete_review(&self, id: Id) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::delete(format!("/reviews/{id}")))
            .await
    }

    /// Mark a review as helpful or unhelpful.
    pub async fn vote_review(&self, id: Id, helpful: bool) -> Result<Value, ApiError> {
        self.request_json(
            RequestDescriptor::post(format!("/reviews/{id}/vote"))
                .with_json(&json!({ "is_helpful": helpful }))?,
        )
        .await
    }

    pub async fn remove_vote(&self, id: Id) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::delete(format!("/reviews/{id}/vote")))
            .await
    }

    pub async fn report_review(&self, id: Id, reason: &str) -> Result<Value, ApiError> {
        self.request_json(
            RequestDescriptor::post(format!("/reviews/{id}/report"))
                .with_json(&json!({ "reason": reason }))?,
        )
        .await
    }
}
