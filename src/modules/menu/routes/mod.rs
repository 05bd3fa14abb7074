mod category;
mod item;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(category::get_router())
        .merge(item::get_router())
}
