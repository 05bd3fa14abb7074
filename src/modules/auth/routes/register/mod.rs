mod partner;
mod user;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(user::get_router())
        .merge(partner::get_router())
}
