use super::types::{request, response};
use crate::{modules::restaurant::repository, types::Context, utils::pagination::Paginated};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::find_many_approved(&ctx.db_conn.pool, &payload.pagination)
        .await
        .map_err(|_| response::Error::FailedToFetchRestaurants)
        .map(|(restaurants, total)| {
            response::Success::Restaurants(Paginated::new(
                restaurants,
                total,
                &payload.pagination,
            ))
        })
}
