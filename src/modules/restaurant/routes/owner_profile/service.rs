use super::types::{request, response};
use crate::{
    modules::{restaurant::repository, user},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user = user::repository::find_by_id(&ctx.db_conn.pool, payload.auth.user_id)
        .await
        .map_err(|_| response::Error::FailedToFetchProfile)?
        .ok_or(response::Error::UserNotFound)?;

    let restaurant = repository::find_by_owner_id(&ctx.db_conn.pool, user.id.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchProfile)?;

    Ok(response::Success::Profile { user, restaurant })
}
