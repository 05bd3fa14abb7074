use super::{service::service, types::request};
use crate::{modules::auth::middleware::RestaurantAuth, types::Context};
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

pub async fn handler(auth: RestaurantAuth, State(ctx): State<Arc<Context>>) -> impl IntoResponse {
    service(ctx, request::Payload { auth }).await
}
