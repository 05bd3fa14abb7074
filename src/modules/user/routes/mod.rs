mod approve;
mod list;
mod reject;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

/// Mounted under `/users`.
pub fn get_router() -> Router<Arc<Context>> {
    Router::new().merge(list::delivery_agents_router())
}

/// Account review and owner listings, mounted under `/restaurants`.
pub fn accounts_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(list::restaurant_owners_router())
        .merge(approve::get_router())
        .merge(reject::get_router())
}
