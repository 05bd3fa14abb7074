pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::restaurant::repository::Restaurant;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Restaurant(Restaurant),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Restaurant(restaurant) => {
                    (StatusCode::OK, Json(json!(restaurant))).into_response()
                }
            }
        }
    }

    pub enum Error {
        RestaurantNotCreated,
        FailedToFetchRestaurant,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantNotCreated => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "Restaurant not found" })),
                )
                    .into_response(),
                Self::FailedToFetchRestaurant => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to fetch restaurant" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
