pub mod request {
    use crate::modules::auth::middleware::RestaurantAuth;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(
            min = 1,
            max = 100,
            code = "INVALID_CATEGORY_NAME",
            message = "Category name must be between 1 and 100 characters"
        ))]
        pub name: String,
        pub description: Option<String>,
    }

    pub struct Payload {
        pub auth: RestaurantAuth,
        pub body: Body,
    }
}

pub mod response {
    use crate::{modules::menu::repository::MenuCategory, utils};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        CategoryCreated(MenuCategory),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CategoryCreated(category) => (
                    StatusCode::CREATED,
                    Json(json!({ "message": "Category created!", "category": category })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        CategoryAlreadyExists,
        FailedToCreateCategory,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    utils::validation::into_response(errors).into_response()
                }
                Self::CategoryAlreadyExists => (
                    StatusCode::CONFLICT,
                    Json(json!({ "message": "Category with this name already exists" })),
                )
                    .into_response(),
                Self::FailedToCreateCategory => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to create category" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
