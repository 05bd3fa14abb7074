mod get;
mod list;
mod owner_profile;
mod setup;

use crate::{modules::user, types::Context};
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(list::get_router())
        .merge(get::get_router())
        .nest("/setup/details", setup::get_router())
        .merge(owner_profile::get_router())
        .merge(user::accounts_router())
}
