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
        pub auth: Auth,
        pub body: Body,
    }
}

pub mod response {
    use crate::{
        modules::{auth::service::session::Session, restaurant::repository::Restaurant},
        utils,
    };
    use axum::{
        extract::Json,
        http::{header, HeaderValue, StatusCode},
        response::IntoResponse,
    };
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        /// The owner's session is reissued so it carries the new restaurant.
        RestaurantCreated(Restaurant, Session),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantCreated(restaurant, session) => {
                    let cookie = HeaderValue::from_str(&session.cookie());
                    let mut res = (
                        StatusCode::CREATED,
                        Json(json!({
                            "message": "Restaurant created!",
                            "restaurant": restaurant,
                            "access_token": session.access_token,
                        })),
                    )
                        .into_response();

                    if let Ok(cookie) = cookie {
                        res.headers_mut().insert(header::SET_COOKIE, cookie);
                    }

                    res
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        OwnerNotApproved,
        AlreadyOwnsRestaurant,
        LogoRequired,
        FailedToUploadImages,
        FailedToCreateRestaurant,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    utils::validation::into_response(errors).into_response()
                }
                Self::OwnerNotApproved => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "message": "Your account has not been approved yet" })),
                )
                    .into_response(),
                Self::AlreadyOwnsRestaurant => (
                    StatusCode::CONFLICT,
                    Json(json!({ "message": "You already own a restaurant" })),
                )
                    .into_response(),
                Self::LogoRequired => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "Logo is required" })),
                )
                    .into_response(),
                Self::FailedToUploadImages => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to upload images" })),
                )
                    .into_response(),
                Self::FailedToCreateRestaurant => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to create restaurant" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
