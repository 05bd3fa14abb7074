use super::types::{request, response};
use crate::{modules::menu::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::find_items(&ctx.db_conn.pool, payload.auth.restaurant_id)
        .await
        .map_err(|_| response::Error::FailedToFetchItems)
        .map(response::Success::Items)
}
