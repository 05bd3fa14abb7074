use super::types::{request, response};
use crate::{modules::user::repository, types::Context, utils::pagination::Paginated};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::find_many(&ctx.db_conn.pool, &payload.pagination, payload.filters)
        .await
        .map_err(|_| response::Error::FailedToFetchUsers)
        .map(|(users, total)| {
            response::Success::Users(Paginated::new(users, total, &payload.pagination))
        })
}
