use super::types::{request, response};
use crate::{modules::restaurant::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let restaurant = repository::approve(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToApproveRestaurant)?
        .ok_or(response::Error::RestaurantNotFound)?;

    tracing::info!(
        "Admin {} approved restaurant {}",
        payload.auth.user_id,
        restaurant.id
    );

    Ok(response::Success::RestaurantApproved(restaurant))
}
