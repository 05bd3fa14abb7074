pub mod request {
    use crate::modules::auth::middleware::RestaurantAuth;
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Body {
        pub is_available: bool,
    }

    pub struct Payload {
        pub id: String,
        pub auth: RestaurantAuth,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::menu::repository::MenuItem;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        AvailabilityUpdated(MenuItem),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::AvailabilityUpdated(item) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Menu item availability updated successfully",
                        "item": item,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        ItemNotFound,
        FailedToUpdateItem,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ItemNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "Menu item not found" })),
                )
                    .into_response(),
                Self::FailedToUpdateItem => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to update menu item availability" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
