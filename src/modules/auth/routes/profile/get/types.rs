pub mod request {
    pub use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::user::repository::User;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        User(User),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::User(user) => (StatusCode::OK, Json(json!(user))).into_response(),
            }
        }
    }

    pub enum Error {
        UserNotFound,
        FailedToFetchUser,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::UserNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "User not found" })),
                )
                    .into_response(),
                Self::FailedToFetchUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to fetch user" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
