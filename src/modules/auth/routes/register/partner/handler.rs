use super::{service::service, types::request};
use crate::{modules::user::repository::Role, types::Context};
use axum::{extract::State, response::IntoResponse};
use axum_typed_multipart::TypedMultipart;
use std::sync::Arc;

pub async fn restaurant_owner(
    State(ctx): State<Arc<Context>>,
    TypedMultipart(body): TypedMultipart<request::Body>,
) -> impl IntoResponse {
    service(
        ctx,
        request::Payload {
            role: Role::RestaurantOwner,
            body,
        },
    )
    .await
}

pub async fn delivery_agent(
    State(ctx): State<Arc<Context>>,
    TypedMultipart(body): TypedMultipart<request::Body>,
) -> impl IntoResponse {
    service(
        ctx,
        request::Payload {
            role: Role::DeliveryAgent,
            body,
        },
    )
    .await
}
