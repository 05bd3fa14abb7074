pub mod request {
    use crate::modules::auth::middleware::RestaurantAuth;

    pub struct Payload {
        pub id: String,
        pub auth: RestaurantAuth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        CategoryDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CategoryDeleted => (
                    StatusCode::OK,
                    Json(json!({ "message": "Category deleted successfully" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        CategoryNotFound,
        CategoryInUse,
        FailedToDeleteCategory,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CategoryNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "Category not found" })),
                )
                    .into_response(),
                Self::CategoryInUse => (
                    StatusCode::CONFLICT,
                    Json(json!({ "message": "Cannot delete category with existing menu items" })),
                )
                    .into_response(),
                Self::FailedToDeleteCategory => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to delete category" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
