//! Request payloads and filter types for the storefront API.
//!
//! # Design
//! Payloads serialize straight into the JSON bodies the backend expects;
//! optional fields are skipped when unset so partial updates only touch
//! what the caller named. Filters turn into query strings through `Query`,
//! which drops unset and default values.

use serde::{Deserialize, Serialize};

use crate::query::{Query, QueryValue};

/// Backend identifiers are plain integers.
pub type Id = u64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Only the fields present are changed on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl QueryValue for SortOrder {
    fn render(&self) -> Option<String> {
        Some(
            match self {
                SortOrder::Asc => "asc",
                SortOrder::Desc => "desc",
            }
            .to_string(),
        )
    }
}

/// Filters for `GET /products`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductFilter {
    pub category_id: Option<Id>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<SortOrder>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub featured: bool,
}

impl ProductFilter {
    pub fn to_query(&self) -> Query {
        Query::new()
            .push("category_id", self.category_id)
            .push("page", self.page)
            .push("per_page", self.per_page)
            .push("search", self.search.as_deref())
            .push("sort_by", self.sort_by.as_deref())
            .push("order", self.order)
            .push("min_price", self.min_price)
            .push("max_price", self.max_price)
            .push("min_rating", self.min_rating)
            .push("featured", self.featured)
    }
}

/// Filters for a product's review list.
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort_by: Option<String>,
    pub rating: Option<u8>,
    pub verified_only: bool,
}

impl ReviewFilter {
    pub fn to_query(&self) -> Query {
        Query::new()
            .push("page", self.page)
            .push("per_page", self.per_page)
            .push("sort_by", self.sort_by.as_deref())
            .push("rating", self.rating)
            .push("verified_only", self.verified_only)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewInput {
    pub rating: u8,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// User interaction recorded for the recommendation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    View,
    Click,
    AddToCart,
    Purchase,
    Wishlist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl QueryValue for UserStatus {
    fn render(&self) -> Option<String> {
        Some(
            match self {
                UserStatus::Active => "active",
                UserStatus::Inactive => "inactive",
            }
            .to_string(),
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdminUserFilter {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub role: Option<String>,
    pub status: Option<UserStatus>,
}

impl AdminUserFilter {
    pub fn to_query(&self) -> Query {
        Query::new()
            .push("page", self.page)
            .push("per_page", self.per_page)
            .push("search", self.search.as_deref())
            .push("role", self.role.as_deref())
            .push("status", self.status)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdminProductFilter {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub category_id: Option<Id>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<SortOrder>,
}

impl AdminProductFilter {
    pub fn to_query(&self) -> Query {
        Query::new()
            .push("page", self.page)
            .push("per_page", self.per_page)
            .push("search", self.search.as_deref())
            .push("category_id", self.category_id)
            .push("status", self.status.as_deref())
            .push("sort_by", self.sort_by.as_deref())
            .push("order", self.order)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdminReviewFilter {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<String>,
    pub product_id: Option<Id>,
    pub flagged: bool,
}

impl AdminReviewFilter {
    pub fn to_query(&self) -> Query {
        Query::new()
            .push("page", self.page)
            .push("per_page", self.per_page)
            .push("status", self.status.as_deref())
            .push("product_id", self.product_id)
            .push("flagged", self.flagged)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approve,
    Reject,
    Flag,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Id>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}
