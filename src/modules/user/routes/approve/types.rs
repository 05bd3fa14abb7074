pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub id: String,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::user::repository::User;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        AccountApproved(User),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::AccountApproved(user) => (
                    StatusCode::OK,
                    Json(json!({ "message": "Account approved", "user": user })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        PendingAccountNotFound,
        FailedToApproveAccount,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::PendingAccountNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "No pending account found" })),
                )
                    .into_response(),
                Self::FailedToApproveAccount => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to approve account" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
