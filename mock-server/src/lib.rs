use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const USER_EMAIL: &str = "a@b.com";
pub const USER_PASSWORD: &str = "secret";
pub const USER_TOKEN: &str = "user-token";
pub const ADMIN_EMAIL: &str = "admin@shop.test";
pub const ADMIN_PASSWORD: &str = "admin";
pub const ADMIN_TOKEN: &str = "admin-token";

/// Bytes served by the export download route.
pub const EXPORT_ARCHIVE: &[u8] = b"PK\x03\x04mock-export";

/// Pretty-printed body served for the JSON-format export.
pub const EXPORT_JSON: &[u8] = b"{\n  \"username\": \"ana\",\n  \"email\": \"a@b.com\"\n}\n";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub category_id: u64,
    pub price: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    pub product_id: u64,
    pub rating: u8,
    pub title: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct CreateReview {
    pub rating: u8,
    pub title: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ProductQuery {
    pub category_id: Option<u64>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub search: Option<String>,
}

#[derive(Default)]
pub struct Store {
    pub products: BTreeMap<u64, Product>,
    pub reviews: BTreeMap<u64, Review>,
    next_review_id: u64,
}

impl Store {
    pub fn seeded() -> Self {
        let catalog = [
            (1, "Desk Lamp", 1, 24.5),
            (2, "Office Chair", 1, 149.0),
            (3, "Garden Hose", 2, 19.99),
            (4, "Trowel", 2, 8.0),
            (5, "Running Shoes", 3, 89.9),
        ];
        let products = catalog
            .into_iter()
            .map(|(id, name, category_id, price)| {
                (
                    id,
                    Product {
                        id,
                        name: name.to_string(),
                        category_id,
                        price,
                    },
                )
            })
            .collect();
        Self {
            products,
            reviews: BTreeMap::new(),
            next_review_id: 1,
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiError = (StatusCode, Json<Value>);

fn error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "error": message })))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    User,
    Admin,
}

fn authenticate(headers: &HeaderMap) -> Result<Role, ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Authorization token required"))?;
    match token {
        USER_TOKEN => Ok(Role::User),
        ADMIN_TOKEN => Ok(Role::Admin),
        _ => Err(error(StatusCode::UNAUTHORIZED, "Invalid token")),
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    let api = Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(login))
        .route("/auth/profile", get(profile))
        .route("/auth/profile/image", post(upload_profile_image))
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/products/{id}/reviews", get(list_reviews).post(create_review))
        .route("/reviews/{id}", delete(delete_review))
        .route("/admin/dashboard", get(admin_dashboard))
        .route("/gdpr/export/{id}/download", get(download_export))
        .with_state(db);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn login(Json(input): Json<Login>) -> Result<Json<Value>, ApiError> {
    let (token, role) = match (input.email.as_str(), input.password.as_str()) {
        (USER_EMAIL, USER_PASSWORD) => (USER_TOKEN, "user"),
        (ADMIN_EMAIL, ADMIN_PASSWORD) => (ADMIN_TOKEN, "admin"),
        _ => {
            tracing::info!(email = %input.email, "rejected login");
            return Err(error(StatusCode::UNAUTHORIZED, "invalid credentials"));
        }
    };
    Ok(Json(json!({
        "token": token,
        "user": { "email": input.email, "role": role },
    })))
}

async fn profile(headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    let role = authenticate(&headers)?;
    let email = match role {
        Role::User => USER_EMAIL,
        Role::Admin => ADMIN_EMAIL,
    };
    Ok(Json(json!({ "email": email, "role": format!("{role:?}").to_lowercase() })))
}

async fn upload_profile_image(
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    authenticate(&headers)?;
    let mut fields = Vec::new();
    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| error(StatusCode::BAD_REQUEST, &e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| error(StatusCode::BAD_REQUEST, &e.body_text()))?;
        if name == "image" {
            image = Some(json!({
                "filename": file_name,
                "content_type": content_type,
                "size": data.len(),
            }));
        }
        fields.push(name);
    }
    let image = image.ok_or_else(|| error(StatusCode::BAD_REQUEST, "No image provided"))?;
    Ok(Json(json!({ "fields": fields, "image": image })))
}

async fn list_products(
    State(db): State<Db>,
    Query(query): Query<ProductQuery>,
) -> Json<Value> {
    let store = db.read().await;
    let search = query.search.map(|s| s.to_lowercase());
    let matching: Vec<&Product> = store
        .products
        .values()
        .filter(|p| query.category_id.map_or(true, |c| p.category_id == c))
        .filter(|p| {
            search
                .as_deref()
                .map_or(true, |s| p.name.to_lowercase().contains(s))
        })
        .collect();
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(10).max(1);
    let products: Vec<&Product> = matching
        .iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .copied()
        .collect();
    Json(json!({
        "products": products,
        "page": page,
        "per_page": per_page,
        "total": matching.len(),
    }))
}

async fn get_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, ApiError> {
    let store = db.read().await;
    store
        .products
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Product not found"))
}

async fn list_reviews(
    State(db): State<Db>,
    Path(product_id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    if !store.products.contains_key(&product_id) {
        return Err(error(StatusCode::NOT_FOUND, "Product not found"));
    }
    let reviews: Vec<&Review> = store
        .reviews
        .values()
        .filter(|r| r.product_id == product_id)
        .collect();
    Ok(Json(json!({ "reviews": reviews, "total": reviews.len() })))
}

async fn create_review(
    State(db): State<Db>,
    Path(product_id): Path<u64>,
    headers: HeaderMap,
    Json(input): Json<CreateReview>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    authenticate(&headers)?;
    if !(1..=5).contains(&input.rating) {
        return Err(error(StatusCode::BAD_REQUEST, "Rating must be between 1 and 5"));
    }
    let mut store = db.write().await;
    if !store.products.contains_key(&product_id) {
        return Err(error(StatusCode::NOT_FOUND, "Product not found"));
    }
    let id = store.next_review_id;
    store.next_review_id += 1;
    let review = Review {
        id,
        product_id,
        rating: input.rating,
        title: input.title,
        content: input.content,
    };
    store.reviews.insert(id, review.clone());
    Ok((StatusCode::CREATED, Json(review)))
}

async fn delete_review(
    State(db): State<Db>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authenticate(&headers)?;
    let mut store = db.write().await;
    store
        .reviews
        .remove(&id)
        .map(|_| Json(json!({ "message": "Review deleted" })))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Review not found"))
}

async fn admin_dashboard(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    if authenticate(&headers)? != Role::Admin {
        return Err(error(StatusCode::FORBIDDEN, "admin access required"));
    }
    let store = db.read().await;
    Ok(Json(json!({
        "total_products": store.products.len(),
        "total_reviews": store.reviews.len(),
    })))
}

async fn download_export(
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    authenticate(&headers)?;
    let (content_type, file_name, body) = match id.as_str() {
        "latest" => ("application/zip", "export.zip", EXPORT_ARCHIVE),
        "json" => ("application/json", "export.json", EXPORT_JSON),
        _ => return Err(error(StatusCode::NOT_FOUND, "Export not found")),
    };
    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response())
}
