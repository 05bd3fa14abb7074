use super::types::{request, response};
use crate::{modules::restaurant::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::find_by_owner_id(&ctx.db_conn.pool, payload.auth.user_id)
        .await
        .map_err(|_| response::Error::FailedToFetchRestaurant)?
        .ok_or(response::Error::RestaurantNotCreated)
        .map(response::Success::Restaurant)
}
