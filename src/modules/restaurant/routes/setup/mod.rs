mod approve;
mod create;
mod get;
mod update;
mod validation;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(get::get_router())
        .merge(create::get_router())
        .merge(update::get_router())
        .merge(approve::get_router())
}
