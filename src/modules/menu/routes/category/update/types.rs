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
        pub name: Option<String>,
        pub description: Option<String>,
    }

    pub struct Payload {
        pub id: String,
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
        CategoryUpdated(MenuCategory),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CategoryUpdated(category) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Category updated successfully",
                        "category": category,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        CategoryNotFound,
        CategoryAlreadyExists,
        FailedToUpdateCategory,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    utils::validation::into_response(errors).into_response()
                }
                Self::CategoryNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "Category not found" })),
                )
                    .into_response(),
                Self::CategoryAlreadyExists => (
                    StatusCode::CONFLICT,
                    Json(json!({ "message": "Category with this name already exists" })),
                )
                    .into_response(),
                Self::FailedToUpdateCategory => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to update category" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
