pub mod request {
    use crate::{
        modules::{
            auth::middleware::Auth,
            restaurant::routes::setup::validation::{
                validate_food_category, validate_restaurant_type,
            },
        },
        utils::validation::validate_time_of_day,
    };
    use axum_typed_multipart::{FieldData, TryFromMultipart};
    use tempfile::NamedTempFile;
    use validator::Validate;

    /// Text fields replace the stored ones. Files are only replaced when sent.
    #[derive(TryFromMultipart, Validate)]
    pub struct Body {
        #[validate(length(min = 1, code = "INVALID_NAME", message = "Name is required"))]
        pub name: String,
        #[validate(custom(function = "validate_restaurant_type"))]
        pub restaurant_type: String,
        #[validate(custom(function = "validate_food_category"))]
        pub food_category: String,
        #[validate(length(min = 1, message = "Description is required"))]
        pub description: String,
        #[validate(length(min = 1, message = "Address is required"))]
        pub address: String,
        #[validate(length(min = 1, message = "City is required"))]
        pub city: String,
        #[validate(length(min = 1, message = "Pincode is required"))]
        pub pincode: String,
        pub branch_number: Option<String>,
        #[validate(custom(function = "validate_time_of_day"))]
        pub opening_time: String,
        #[validate(custom(function = "validate_time_of_day"))]
        pub closing_time: String,
        #[form_data(limit = "10MiB")]
        pub logo: Option<FieldData<NamedTempFile>>,
        #[form_data(limit = "10MiB")]
        pub images: Vec<FieldData<NamedTempFile>>,
    }

    pub struct Payload {
        pub id: String,
        pub auth: Auth,
        pub body: Body,
    }
}

pub mod response {
    use crate::{modules::restaurant::repository::Restaurant, utils};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        RestaurantUpdated(Restaurant),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantUpdated(restaurant) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Restaurant updated successfully",
                        "restaurant": restaurant,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        RestaurantNotFound,
        NotRestaurantOwner,
        FailedToUploadImages,
        FailedToUpdateRestaurant,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    utils::validation::into_response(errors).into_response()
                }
                Self::RestaurantNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "Restaurant not found" })),
                )
                    .into_response(),
                Self::NotRestaurantOwner => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "message": "You can only update your own restaurant" })),
                )
                    .into_response(),
                Self::FailedToUploadImages => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to upload images" })),
                )
                    .into_response(),
                Self::FailedToUpdateRestaurant => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to update restaurant" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
