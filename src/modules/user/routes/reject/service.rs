use super::types::{request, response};
use crate::{
    modules::{storage, user::repository},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user = repository::delete_pending(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToRejectAccount)?
        .ok_or(response::Error::PendingAccountNotFound)?;

    storage::discard(ctx.storage.as_ref(), user.uploaded_media()).await;

    tracing::info!(
        "Admin {} rejected {} account {}",
        payload.auth.user_id,
        user.role,
        user.id
    );

    Ok(response::Success::AccountRejected)
}
