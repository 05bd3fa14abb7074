use super::{service::service, types::request};
use crate::{modules::auth::middleware::RestaurantAuth, types::Context};
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

pub async fn handler(
    auth: RestaurantAuth,
    State(ctx): State<Arc<Context>>,
    Json(body): Json<request::Body>,
) -> impl IntoResponse {
    service(ctx, request::Payload { auth, body }).await
}
