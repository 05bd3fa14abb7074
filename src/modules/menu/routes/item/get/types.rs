pub mod request {
    use crate::modules::auth::middleware::RestaurantAuth;

    pub struct Payload {
        pub id: String,
        pub auth: RestaurantAuth,
    }
}

pub mod response {
    use crate::modules::menu::repository::MenuItem;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Item(MenuItem),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Item(item) => (StatusCode::OK, Json(json!(item))).into_response(),
            }
        }
    }

    pub enum Error {
        ItemNotFound,
        FailedToFetchItem,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ItemNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "Menu item not found" })),
                )
                    .into_response(),
                Self::FailedToFetchItem => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to fetch menu item" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
