pub mod request {
    use crate::modules::user::repository::Role;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1, code = "INVALID_USER_EMAIL", message = "Email is required"))]
        pub email: String,
        #[validate(length(min = 1, code = "INVALID_PASSWORD", message = "Password is required"))]
        pub password: String,
        /// When present it must match the stored role.
        pub role: Option<Role>,
    }

    pub struct Payload {
        pub body: Body,
    }
}

pub mod response {
    use crate::{modules::auth::service::session::Session, utils};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        LoggedIn(Session),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::LoggedIn(session) => {
                    session.into_response_with(StatusCode::OK, "Login successful")
                }
            }
        }
    }

    #[derive(Debug, PartialEq)]
    pub enum Error {
        FailedToValidate(ValidationErrors),
        InvalidCredentials,
        PendingApproval,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    utils::validation::into_response(errors).into_response()
                }
                Self::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "message": "Invalid credentials" })),
                )
                    .into_response(),
                Self::PendingApproval => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "message": "Account pending approval" })),
                )
                    .into_response(),
                Self::UnexpectedError => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Sorry an error occurred" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
