use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::form::{MultipartForm, UploadFile};
use crate::http::RequestDescriptor;
use crate::types::Id;

impl ApiClient {
    /// Upload a product image as multipart `image`; `is_primary` is only sent
    /// when set.
    pub async fn upload_product_image(
        &self,
        product_id: Id,
        image: UploadFile,
        is_primary: bool,
    ) -> Result<Value, ApiError> {
        let mut form = MultipartForm::new().file("image", image);
        if is_primary {
            form = form.text("is_primary", "true");
        }
        self.request_json(
            RequestDescriptor::post(format!("/products/{product_id}/images")).with_form(form),
        )
        .await
    }

    pub async fn get_product_images(&self, product_id: Id) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::get(format!("/products/{product_id}/images")))
            .await
    }

    pub async fn delete_product_image(&self, product_id: Id, image_id: Id) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::delete(format!(
            "/products/{product_id}/images/{image_id}"
        )))
        .await
    }

    pub async fn set_primary_image(&self, product_id: Id, image_id: Id) -> Result<Value, ApiError> {
        self.request_json(RequestDescriptor::put(format!(
            "/products/{product_id}/images/{image_id}/primary"
        )))
        .await
    }
}
