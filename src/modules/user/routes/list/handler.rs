use super::{service::service, types::request};
use crate::{
    modules::{
        auth::middleware::AdminAuth,
        user::repository::{FindManyFilters, Role},
    },
    types::Context,
    utils::pagination::Pagination,
};
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

async fn list(
    ctx: Arc<Context>,
    pagination: Pagination,
    role: Role,
    is_approved: bool,
) -> impl IntoResponse {
    service(
        ctx,
        request::Payload {
            pagination,
            filters: FindManyFilters { role, is_approved },
        },
    )
    .await
}

pub async fn delivery_agents(
    _: AdminAuth,
    State(ctx): State<Arc<Context>>,
    pagination: Pagination,
) -> impl IntoResponse {
    list(ctx, pagination, Role::DeliveryAgent, true).await
}

pub async fn delivery_agent_requests(
    _: AdminAuth,
    State(ctx): State<Arc<Context>>,
    pagination: Pagination,
) -> impl IntoResponse {
    list(ctx, pagination, Role::DeliveryAgent, false).await
}

pub async fn restaurant_owners(
    _: AdminAuth,
    State(ctx): State<Arc<Context>>,
    pagination: Pagination,
) -> impl IntoResponse {
    list(ctx, pagination, Role::RestaurantOwner, true).await
}

pub async fn restaurant_owner_requests(
    _: AdminAuth,
    State(ctx): State<Arc<Context>>,
    pagination: Pagination,
) -> impl IntoResponse {
    list(ctx, pagination, Role::RestaurantOwner, false).await
}
