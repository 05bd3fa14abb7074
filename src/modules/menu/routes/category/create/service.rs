use super::types::{request, response};
use crate::{modules::menu::repository, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let restaurant_id = payload.auth.restaurant_id;

    let existing = repository::find_category_by_name(
        &ctx.db_conn.pool,
        restaurant_id.clone(),
        payload.body.name.clone(),
        None,
    )
    .await
    .map_err(|_| response::Error::FailedToCreateCategory)?;

    if existing.is_some() {
        return Err(response::Error::CategoryAlreadyExists);
    }

    repository::create_category(
        &ctx.db_conn.pool,
        repository::CreateCategoryPayload {
            restaurant_id,
            name: payload.body.name,
            description: payload.body.description,
        },
    )
    .await
    .map_err(|err| match err {
        repository::Error::NameTaken => response::Error::CategoryAlreadyExists,
        _ => response::Error::FailedToCreateCategory,
    })
    .map(response::Success::CategoryCreated)
}
