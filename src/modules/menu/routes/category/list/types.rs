pub mod request {
    use crate::modules::auth::middleware::RestaurantAuth;

    pub struct Payload {
        pub auth: RestaurantAuth,
    }
}

pub mod response {
    use crate::modules::menu::repository::MenuCategory;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Categories(Vec<MenuCategory>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Categories(categories) => {
                    (StatusCode::OK, Json(json!(categories))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToFetchCategories,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchCategories => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to fetch categories" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
