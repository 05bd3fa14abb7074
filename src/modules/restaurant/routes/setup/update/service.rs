use super::types::{request, response};
use crate::{
    modules::{
        restaurant::repository,
        storage::{self, Upload, UploadedMedia},
    },
    types::Context,
};
use axum_typed_multipart::FieldData;
use std::sync::Arc;
use tempfile::NamedTempFile;
use validator::Validate;

async fn upload_images(
    ctx: &Context,
    folder: &str,
    images: Vec<FieldData<NamedTempFile>>,
) -> Result<Vec<UploadedMedia>, storage::Error> {
    let timestamp = chrono::Utc::now().timestamp_millis();
    let uploads = images
        .into_iter()
        .enumerate()
        .map(|(i, image)| {
            storage::read_file(image).map(|contents| Upload {
                folder: format!("{}/images", folder),
                public_id: format!("{}-{}", timestamp, i),
                contents,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    storage::upload_many(ctx.storage.as_ref(), uploads).await
}

/// Uploads replacement files. Nothing stored so far is touched, and on failure
/// the files uploaded by this request are discarded again.
async fn upload_replacements(
    ctx: &Context,
    folder: &str,
    logo: Option<FieldData<NamedTempFile>>,
    images: Vec<FieldData<NamedTempFile>>,
) -> Result<(Option<UploadedMedia>, Option<Vec<UploadedMedia>>), response::Error> {
    let logo = match logo {
        Some(logo) => Some(
            storage::upload_file(ctx.storage.as_ref(), format!("{}/logo", folder), logo)
                .await
                .map_err(|_| response::Error::FailedToUploadImages)?,
        ),
        None => None,
    };

    if images.is_empty() {
        return Ok((logo, None));
    }

    match upload_images(ctx, folder, images).await {
        Ok(images) => Ok((logo, Some(images))),
        Err(err) => {
            tracing::error!("Failed to upload restaurant images: {:?}", err);
            storage::discard(ctx.storage.as_ref(), logo.into_iter().collect()).await;
            Err(response::Error::FailedToUploadImages)
        }
    }
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let restaurant = repository::find_by_id(&ctx.db_conn.pool, payload.id.clone())
        .await
        .map_err(|_| response::Error::FailedToUpdateRestaurant)?
        .ok_or(response::Error::RestaurantNotFound)?;

    if !restaurant.is_owner(&payload.auth.user_id) {
        return Err(response::Error::NotRestaurantOwner);
    }

    let restaurant_type = payload
        .body
        .restaurant_type
        .parse()
        .map_err(|_| response::Error::FailedToUpdateRestaurant)?;
    let food_category = payload
        .body
        .food_category
        .parse()
        .map_err(|_| response::Error::FailedToUpdateRestaurant)?;

    let folder = format!("{}/{}", ctx.folders.restaurants, restaurant.owner_id);
    let (logo, images) =
        upload_replacements(&ctx, &folder, payload.body.logo, payload.body.images).await?;

    let uploaded = logo
        .iter()
        .chain(images.iter().flatten())
        .cloned()
        .collect::<Vec<_>>();
    let mut superseded = vec![];
    if logo.is_some() {
        superseded.push(restaurant.logo.0.clone());
    }
    if images.is_some() {
        superseded.extend(restaurant.images.0.iter().cloned());
    }

    let updated = repository::update_by_id(
        &ctx.db_conn.pool,
        restaurant.id.clone(),
        repository::UpdateRestaurantPayload {
            name: payload.body.name,
            restaurant_type,
            food_category,
            description: payload.body.description,
            address: payload.body.address,
            city: payload.body.city,
            pincode: payload.body.pincode,
            branch_number: payload.body.branch_number,
            opening_time: payload.body.opening_time,
            closing_time: payload.body.closing_time,
            logo,
            images,
        },
    )
    .await;

    match updated {
        Ok(restaurant) => {
            storage::discard(ctx.storage.as_ref(), superseded).await;
            Ok(response::Success::RestaurantUpdated(restaurant))
        }
        Err(_) => {
            storage::discard(ctx.storage.as_ref(), uploaded).await;
            Err(response::Error::FailedToUpdateRestaurant)
        }
    }
}
