pub mod request {
    use crate::modules::auth::middleware::RestaurantAuth;

    pub struct Payload {
        pub auth: RestaurantAuth,
    }
}

pub mod response {
    use crate::modules::menu::repository::MenuItem;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Items(Vec<MenuItem>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Items(items) => (StatusCode::OK, Json(json!(items))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchItems,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchItems => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to fetch menu items" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
