pub mod auth;
pub mod menu;
pub mod restaurant;
pub mod storage;
pub mod user;

use crate::types::Context;
use axum::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/auth", auth::get_router())
        .nest("/restaurants", restaurant::get_router())
        .nest("/users", user::get_router())
        .nest("/menu", menu::get_router())
}
