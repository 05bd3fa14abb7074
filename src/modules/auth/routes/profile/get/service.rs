use super::types::{request, response};
use crate::{modules::user::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::find_by_id(&ctx.db_conn.pool, payload.auth.user_id)
        .await
        .map_err(|_| response::Error::FailedToFetchUser)?
        .ok_or(response::Error::UserNotFound)
        .map(response::Success::User)
}
