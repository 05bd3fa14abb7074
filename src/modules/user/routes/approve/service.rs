use super::types::{request, response};
use crate::{modules::user::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user = repository::approve_pending(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToApproveAccount)?
        .ok_or(response::Error::PendingAccountNotFound)?;

    tracing::info!(
        "Admin {} approved {} account {}",
        payload.auth.user_id,
        user.role,
        user.id
    );

    Ok(response::Success::AccountApproved(user))
}
