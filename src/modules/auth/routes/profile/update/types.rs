pub mod request {
    use crate::{modules::auth::middleware::Auth, utils::validation::validate_phone_number};
    use axum_typed_multipart::{FieldData, TryFromMultipart};
    use tempfile::NamedTempFile;
    use validator::Validate;

    #[derive(TryFromMultipart, Validate)]
    pub struct Body {
        #[validate(length(min = 1, code = "INVALID_NAME", message = "Name cannot be empty"))]
        pub name: Option<String>,
        #[validate(custom(function = "validate_phone_number"))]
        pub phone: Option<String>,
        #[form_data(limit = "10MiB")]
        pub profile_photo: Option<FieldData<NamedTempFile>>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub body: Body,
    }
}

pub mod response {
    use crate::{modules::user::repository::User, utils};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        ProfileUpdated(User),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ProfileUpdated(user) => (
                    StatusCode::OK,
                    Json(json!({ "message": "Profile updated successfully", "user": user })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        UserNotFound,
        FailedToUploadProfilePhoto,
        FailedToUpdateProfile,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    utils::validation::into_response(errors).into_response()
                }
                Self::UserNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "User not found" })),
                )
                    .into_response(),
                Self::FailedToUploadProfilePhoto => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to upload profile photo" })),
                )
                    .into_response(),
                Self::FailedToUpdateProfile => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to update profile" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
