pub mod request {
    use crate::{modules::user::repository::Role, utils::validation::validate_phone_number};
    use axum_typed_multipart::{FieldData, TryFromMultipart};
    use tempfile::NamedTempFile;
    use validator::Validate;

    /// Owners and delivery agents register with identity documents attached.
    #[derive(TryFromMultipart, Validate)]
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
        #[form_data(limit = "10MiB")]
        pub profile_photo: Option<FieldData<NamedTempFile>>,
        #[form_data(limit = "10MiB")]
        pub id_card: Option<FieldData<NamedTempFile>>,
    }

    pub struct Payload {
        pub role: Role,
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
                Self::Registered(session) => session.into_response_with(
                    StatusCode::CREATED,
                    "Registration successful, your account is pending approval",
                ),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        MissingDocuments,
        EmailAlreadyInUse,
        FailedToUploadDocuments,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    utils::validation::into_response(errors).into_response()
                }
                Self::MissingDocuments => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "Profile photo and ID card are required" })),
                )
                    .into_response(),
                Self::EmailAlreadyInUse => (
                    StatusCode::CONFLICT,
                    Json(json!({ "message": "Email already in use" })),
                )
                    .into_response(),
                Self::FailedToUploadDocuments => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to upload documents" })),
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
