use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::form::{MultipartForm, UploadFile};
use crate::http::RequestDescriptor;
use crate::query::Query;
use crate::types::{LoginRequest, PasswordChange, ProfileUpdate, RegisterRequest};

impl ApiClient {
    pub async fn register(&self, input: &RegisterRequest) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::post("/auth/register").with_json(input)?)
            .await
    }

    /// The returned body carries the token; storing it is up to the caller's
    /// `TokenProvider`.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::post("/auth/login").with_json(credentials)?)
            .await
    }

    pub async fn logout(&self) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::post("/auth/logout")).await
    }

    pub async fn get_profile(&self) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get("/auth/profile")).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::put("/auth/profile").with_json(update)?)
            .await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::put("/auth/change-password").with_json(change)?)
            .await
    }

    /// Multipart upload with a single `image` field.
    pub async fn upload_profile_image(&self, image: UploadFile) -> Result<Value, ApiError> {
        let form = MultipartForm::new().file("image", image);
        self.request_json(RequestDescriptor::post("/auth/profile/image").with_form(form))
            .await
    }

    pub async fn delete_profile_image(&self) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::delete("/auth/profile/image"))
            .await
    }

    /// Reviews written by the authenticated user.
    pub async fn get_my_reviews(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Value, ApiError> {
        let query = Query::new().push("page", page).push("per_page", per_page);
        self.request_json(RequestDescriptor::get("/auth/reviews").with_query(query))
            .await
    }
}
