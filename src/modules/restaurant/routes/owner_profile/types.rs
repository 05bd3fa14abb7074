pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::{restaurant::repository::Restaurant, user::repository::User};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Profile {
            user: User,
            restaurant: Option<Restaurant>,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Profile { user, restaurant } => (
                    StatusCode::OK,
                    Json(json!({ "user": user, "restaurant": restaurant })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        UserNotFound,
        FailedToFetchProfile,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::UserNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "User not found" })),
                )
                    .into_response(),
                Self::FailedToFetchProfile => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to fetch profile" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
