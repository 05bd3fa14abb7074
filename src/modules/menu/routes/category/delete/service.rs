use super::types::{request, response};
use crate::{modules::menu::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let restaurant_id = payload.auth.restaurant_id;

    let category = repository::find_category(&ctx.db_conn.pool, restaurant_id.clone(), payload.id)
        .await
        .map_err(|_| response::Error::FailedToDeleteCategory)?
        .ok_or(response::Error::CategoryNotFound)?;

    let items = repository::count_items_by_category(&ctx.db_conn.pool, category.id.clone())
        .await
        .map_err(|_| response::Error::FailedToDeleteCategory)?;

    if items > 0 {
        return Err(response::Error::CategoryInUse);
    }

    repository::delete_category(&ctx.db_conn.pool, restaurant_id, category.id)
        .await
        .map_err(|err| match err {
            repository::Error::CategoryInUse => response::Error::CategoryInUse,
            _ => response::Error::FailedToDeleteCategory,
        })?
        .ok_or(response::Error::CategoryNotFound)
        .map(|_| response::Success::CategoryDeleted)
}
