mod handler;
mod service;
mod types;

use crate::types::Context;
use axum::routing::{get, Router};
use std::sync::Arc;

pub fn delivery_agents_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/delivery_agents", get(handler::delivery_agents))
        .route(
            "/delivery_agents/requests",
            get(handler::delivery_agent_requests),
        )
}

pub fn restaurant_owners_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/restaurant_owners", get(handler::restaurant_owners))
        .route(
            "/restaurant_owners/requests",
            get(handler::restaurant_owner_requests),
        )
}
