pub mod request {
    use crate::modules::{
        auth::middleware::RestaurantAuth, menu::routes::item::price::validate_price,
    };
    use axum_typed_multipart::{FieldData, TryFromMultipart};
    use tempfile::NamedTempFile;
    use validator::Validate;

    #[derive(TryFromMultipart, Validate)]
    pub struct Body {
        #[validate(length(
            min = 1,
            max = 100,
            code = "INVALID_ITEM_NAME",
            message = "Item name must be between 1 and 100 characters"
        ))]
        pub name: Option<String>,
        pub description: Option<String>,
        #[validate(custom(function = "validate_price"))]
        pub price: Option<String>,
        pub category_id: Option<String>,
        pub is_available: Option<bool>,
        pub is_featured: Option<bool>,
        pub is_vegetarian: Option<bool>,
        #[form_data(limit = "10MiB")]
        pub image: Option<FieldData<NamedTempFile>>,
    }

    pub struct Payload {
        pub id: String,
        pub auth: RestaurantAuth,
        pub body: Body,
    }
}

pub mod response {
    use crate::{modules::menu::repository::MenuItem, utils};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        ItemUpdated(MenuItem),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ItemUpdated(item) => (
                    StatusCode::OK,
                    Json(json!({ "message": "Menu item updated successfully", "item": item })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        ItemNotFound,
        CategoryNotFound,
        ItemAlreadyExists,
        FailedToUploadImage,
        FailedToUpdateItem,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    utils::validation::into_response(errors).into_response()
                }
                Self::ItemNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "Menu item not found" })),
                )
                    .into_response(),
                Self::CategoryNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "Category not found" })),
                )
                    .into_response(),
                Self::ItemAlreadyExists => (
                    StatusCode::CONFLICT,
                    Json(json!({
                        "message": "Menu item with this name already exists in this category"
                    })),
                )
                    .into_response(),
                Self::FailedToUploadImage => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to upload image" })),
                )
                    .into_response(),
                Self::FailedToUpdateItem => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to update menu item" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
