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

    let price = match body.price.as_deref() {
        Some(value) => Some(price::parse(value).ok_or(response::Error::FailedToUpdateItem)?),
        None => None,
    };

    let item = repository::find_item(&ctx.db_conn.pool, restaurant_id.clone(), payload.id)
        .await
        .map_err(|_| response::Error::FailedToUpdateItem)?
        .ok_or(response::Error::ItemNotFound)?;

    let category_changed = body
        .category_id
        .as_ref()
        .is_some_and(|category_id| *category_id != item.category_id);

    if category_changed {
        if let Some(category_id) = body.category_id.clone() {
            repository::find_category(&ctx.db_conn.pool, restaurant_id.clone(), category_id)
                .await
                .map_err(|_| response::Error::FailedToUpdateItem)?
                .ok_or(response::Error::CategoryNotFound)?;
        }
    }

    let name_changed = body.name.as_ref().is_some_and(|name| *name != item.name);

    if name_changed || category_changed {
        let existing = repository::find_item_by_name(
            &ctx.db_conn.pool,
            restaurant_id.clone(),
            body.category_id.clone().unwrap_or(item.category_id.clone()),
            body.name.clone().unwrap_or(item.name.clone()),
            Some(item.id.clone()),
        )
        .await
        .map_err(|_| response::Error::FailedToUpdateItem)?;

        if existing.is_some() {
            return Err(response::Error::ItemAlreadyExists);
        }
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
    let superseded = match image {
        Some(_) => item.image.as_ref().map(|image| image.0.clone()),
        None => None,
    };

    let updated = repository::update_item(
        &ctx.db_conn.pool,
        restaurant_id,
        item.id,
        repository::UpdateItemPayload {
            category_id: body.category_id,
            name: body.name,
            description: body.description,
            price,
            image,
            is_available: body.is_available,
            is_featured: body.is_featured,
            is_vegetarian: body.is_vegetarian,
        },
    )
    .await;

    match updated {
        Ok(Some(item)) => {
            storage::discard(ctx.storage.as_ref(), superseded.into_iter().collect()).await;
            Ok(response::Success::ItemUpdated(item))
        }
        Ok(None) => {
            storage::discard(ctx.storage.as_ref(), uploaded).await;
            Err(response::Error::ItemNotFound)
        }
        Err(err) => {
            storage::discard(ctx.storage.as_ref(), uploaded).await;
            Err(match err {
                repository::Error::NameTaken => response::Error::ItemAlreadyExists,
                _ => response::Error::FailedToUpdateItem,
            })
        }
    }
}
