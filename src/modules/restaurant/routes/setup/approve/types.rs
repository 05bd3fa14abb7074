pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub id: String,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::restaurant::repository::Restaurant;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        RestaurantApproved(Restaurant),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantApproved(restaurant) => (
                    StatusCode::OK,
                    Json(json!({ "message": "Restaurant approved", "restaurant": restaurant })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        RestaurantNotFound,
        FailedToApproveRestaurant,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "Restaurant not found" })),
                )
                    .into_response(),
                Self::FailedToApproveRestaurant => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to approve restaurant" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
