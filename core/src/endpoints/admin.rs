//! Admin dashboard routes. All of them require an admin token.

use serde_json::{json, Map, Value};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::RequestDescriptor;
use crate::query::Query;
use crate::types::{
    AdminProductFilter, AdminReviewFilter, AdminUserFilter, CategoryInput, Id, ModerationAction,
};

/// Body shared by the bulk-update routes; ids and updates are forwarded as given.
fn bulk_update(
    path: &str,
    id_field: &str,
    ids: &[Id],
    updates: &Value,
) -> Result<RequestDescriptor, ApiError> {
    let mut body = Map::new();
    body.insert(id_field.to_string(), json!(ids));
    body.insert("updates".to_string(), updates.clone());
    RequestDescriptor::post(path).with_json(&body)
}

impl ApiClient {
    pub async fn admin_dashboard(&self) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get("/admin/dashboard")).await
    }

    /// `period` is a backend window such as `7d`, `30d` or `1y`.
    pub async fn admin_analytics(&self, period: Option<&str>) -> Result<Value, ApiError> {
        let query = Query::new().push("period", period);
        self.request_json(RequestDescriptor::get("/admin/analytics").with_query(query))
            .await
    }

    // --- users ---

    pub async fn admin_users(&self, filter: &AdminUserFilter) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get("/admin/users").with_query(filter.to_query()))
            .await
    }

    pub async fn admin_update_user(&self, id: Id, updates: &Value) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::put(format!("/admin/users/{id}")).with_json(updates)?)
            .await
    }

    pub async fn admin_delete_user(&self, id: Id) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::delete(format!("/admin/users/{id}")))
            .await
    }

    pub async fn admin_bulk_update_users(&self, ids: &[Id], updates: &Value) -> Result<Value, ApiError> {
        self.request_json(bulk_update("/admin/users/bulk-update", "user_ids", ids, updates)?)
            .await
    }

    // --- products ---

    pub async fn admin_products(&self, filter: &AdminProductFilter) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get("/admin/products").with_query(filter.to_query()))
            .await
    }

    pub async fn admin_create_product(&self, product: &Value) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::post("/admin/products").with_json(product)?)
            .await
    }

    pub async fn admin_update_product(&self, id: Id, updates: &Value) -> Result<Value, ApiError> {
        self.request_json(
            RequestDescriptor::put(format!("/admin/products/{id}")).with_json(updates)?,
        )
        .await
    }

    pub async fn admin_delete_product(&self, id: Id) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::delete(format!("/admin/products/{id}")))
            .await
    }

    pub async fn admin_bulk_update_products(
        &self,
        ids: &[Id],
        updates: &Value,
    ) -> Result<Value, ApiError> {
        self.request_json(bulk_update("/admin/products/bulk-update", "product_ids", ids, updates)?)
            .await
    }

    // --- reviews ---

    pub async fn admin_reviews(&self, filter: &AdminReviewFilter) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get("/admin/reviews").with_query(filter.to_query()))
            .await
    }

    pub async fn admin_moderate_review(
        &self,
        id: Id,
        action: ModerationAction,
    ) -> Result<Value, ApiError> {
        self.request_json(
            RequestDescriptor::put(format!("/admin/reviews/{id}/moderate"))
                .with_json(&json!({ "action": action }))?,
        )
        .await
    }

    pub async fn admin_delete_review(&self, id: Id) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::delete(format!("/admin/reviews/{id}")))
            .await
    }

    pub async fn admin_bulk_update_reviews(
        &self,
        ids: &[Id],
        updates: &Value,
    ) -> Result<Value, ApiError> {
        self.request_json(bulk_update("/admin/reviews/bulk-update", "review_ids", ids, updates)?)
            .await
    }

    // --- categories ---

    pub async fn admin_create_category(&self, category: &CategoryInput) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::post("/admin/categories").with_json(category)?)
            .await
    }

    pub async fn admin_update_category(
        &self,
        id: Id,
        category: &CategoryInput,
    ) -> Result<Value, ApiError> {
        self.request_json(
            RequestDescriptor::put(format!("/admin/categories/{id}")).with_json(category)?,
        )
        .await
    }

    pub async fn admin_delete_category(&self, id: Id) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::delete(format!("/admin/categories/{id}")))
            .await
    }
}
