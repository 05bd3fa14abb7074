use super::types::{request, response};
use crate::{
    modules::{
        menu::{repository, routes::item::price},
        storage,
    },
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let restaurant_id = payload.auth.restaurant_id;
    let body = payload.body;

    let price = price::parse(&body.price).ok_or(response::Error::FailedToCreateItem)?;

    let category = repository::find_category(
        &ctx.db_conn.pool,
        restaurant_id.clone(),
        body.category_id.clone(),
    )
    .await
    .map_err(|_| response::Error::FailedToCreateItem)?
    .ok_or(response::Error::CategoryNotFound)?;

    let existing = repository::find_item_by_name(
        &ctx.db_conn.pool,
        restaurant_id.clone(),
        category.id.clone(),
        body.name.clone(),
        None,
    )
    .await
    .map_err(|_| response::Error::FailedToCreateItem)?;

    if existing.is_some() {
        return Err(response::Error::ItemAlreadyExists);
    }

    let image = match body.image {
        Some(image) => {
            let folder = format!(
                "{}/{}/menu",
                ctx.folders.restaurants, payload.auth.auth.user_id
            );

            let media = storage::upload_file(ctx.storage.as_ref(), folder, image)
                .await
                .map_err(|_| response::Error::FailedToUploadImage)?;

            Some(media)
        }
        None => None,
    };

    let uploaded = image.clone().into_iter().collect::<Vec<_>>();

    let created = repository::create_item(
        &ctx.db_conn.pool,
        repository::CreateItemPayload {
            restaurant_id,
            category_id: category.id,
            name: body.name,
            description: body.description.unwrap_or_default(),
            price,
            image,
            is_available: body.is_available.unwrap_or(false),
            is_featured: body.is_featured.unwrap_or(false),
            is_vegetarian: body.is_vegetarian.unwrap_or(true),
        },
    )
    .await;

    match created {
        Ok(item) => Ok(response::Success::ItemCreated(item)),
        Err(err) => {
            storage::discard(ctx.storage.as_ref(), uploaded).await;
            Err(match err {
                repository::Error::NameTaken => response::Error::ItemAlreadyExists,
                _ => response::Error::FailedToCreateItem,
            })
        }
    }
}
