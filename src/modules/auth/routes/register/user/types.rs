pub mod request {
    use crate::utils::validation::validate_phone_number;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1, code = "INVALID_NAME", message = "Name is required"))]
        pub name: String,
        #[validate(email(code = "INVALID_USER_EMAIL", message = "Invalid email address"))]
        pub email: String,
        #[validate(length(
            min = 6,
            code = "INVALID_PASSWORD",
            message = "Password must be at least 6 characters long"
        ))]
        pub password: String,
        #[validate(custom(function = "validate_phone_number"))]
        pub phone: String,
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
        Registered(Session),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Registered(session) => {
                    session.into_response_with(StatusCode::CREATED, "Registration successful")
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        EmailAlreadyInUse,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    utils::validation::into_response(errors).into_response()
                }
                Self::EmailAlreadyInUse => (
                    StatusCode::CONFLICT,
                    Json(json!({ "message": "Email already in use" })),
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
