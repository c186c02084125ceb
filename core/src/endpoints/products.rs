use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::RequestDescriptor;
use crate::query::Query;
use crate::types::{Id, ProductFilter};

impl ApiClient {
    pub async fn get_products(&self, filter: &ProductFilter) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get("/products").with_query(filter.to_query()))
            .await
    }

    pub async fn get_product(&self, id: Id) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get(format!("/products/{id}")))
            .await
    }

    pub async fn search_products(&self, query: &str, page: Option<u32>) -> Result<Value, ApiError> {
        let query = Query::new().push("q", query).push("page", page);
        self.request_json(RequestDescriptor::get("/products/search").with_query(query))
            .await
    }

    pub async fn get_categories(&self) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get("/categories")).await
    }

    pub async fn get_category(&self, id: Id) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get(format!("/categories/{id}")))
            .await
    }

    pub async fn get_category_products(
        &self,
        id: Id,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Value, ApiError> {
        let query = Query::new().push("page", page).push("per_page", per_page);
        self.request_json(
            RequestDescriptor::get(format!("/categories/{id}/products")).with_query(query),
        )
        .await
    }
}
