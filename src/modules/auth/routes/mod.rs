mod login;
mod profile;
mod register;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/register", register::get_router())
        .merge(login::get_router())
        .merge(profile::get_router())
}
