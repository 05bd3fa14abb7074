use super::types::{request, response};
use crate::{
    modules::{menu::repository, storage},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let item = repository::delete_item(&ctx.db_conn.pool, payload.auth.restaurant_id, payload.id)
        .await
        .map_err(|_| response::Error::FailedToDeleteItem)?
        .ok_or(response::Error::ItemNotFound)?;

    let image = item.image.map(|image| image.0);
    storage::discard(ctx.storage.as_ref(), image.into_iter().collect()).await;

    Ok(response::Success::ItemDeleted)
}
