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

    let category =
        repository::find_category(&ctx.db_conn.pool, restaurant_id.clone(), payload.id.clone())
            .await
            .map_err(|_| response::Error::FailedToUpdateCategory)?
            .ok_or(response::Error::CategoryNotFound)?;

    if let Some(name) = payload.body.name.as_ref().filter(|name| **name != category.name) {
        let existing = repository::find_category_by_name(
            &ctx.db_conn.pool,
            restaurant_id.clone(),
            name.clone(),
            Some(category.id.clone()),
        )
        .await
        .map_err(|_| response::Error::FailedToUpdateCategory)?;

        if existing.is_some() {
            return Err(response::Error::CategoryAlreadyExists);
        }
    }

    repository::update_category(
        &ctx.db_conn.pool,
        restaurant_id,
        category.id,
        repository::UpdateCategoryPayload {
            name: payload.body.name,
            description: payload.body.description,
        },
    )
    .await
    .map_err(|err| match err {
        repository::Error::NameTaken => response::Error::CategoryAlreadyExists,
        _ => response::Error::FailedToUpdateCategory,
    })?
    .ok_or(response::Error::CategoryNotFound)
    .map(response::Success::CategoryUpdated)
}
