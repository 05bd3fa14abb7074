pub mod request {
    use crate::{modules::user::repository::FindManyFilters, utils::pagination::Pagination};

    pub struct Payload {
        pub pagination: Pagination,
        pub filters: FindManyFilters,
    }
}

pub mod response {
    use crate::{modules::user::repository::User, utils::pagination::Paginated};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Users(Paginated<User>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Users(users) => (StatusCode::OK, Json(json!(users))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchUsers,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchUsers => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to fetch users" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
