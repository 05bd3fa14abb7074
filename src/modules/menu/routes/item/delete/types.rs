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
        ItemDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ItemDeleted => (
                    StatusCode::OK,
                    Json(json!({ "message": "Menu item deleted successfully" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        ItemNotFound,
        FailedToDeleteItem,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ItemNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "Menu item not found" })),
                )
                    .into_response(),
                Self::FailedToDeleteItem => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to delete menu item" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
