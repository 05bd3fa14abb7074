use super::types::{request, response};
use crate::{
    modules::{
        auth::service::{session::Session, token},
        restaurant::repository,
        storage::{self, Upload},
        user,
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

    let restaurant_type = payload
        .body
        .restaurant_type
        .parse()
        .map_err(|_| response::Error::FailedToCreateRestaurant)?;
    let food_category = payload
        .body
        .food_category
        .parse()
        .map_err(|_| response::Error::FailedToCreateRestaurant)?;

    let owner = user::repository::find_by_id(&ctx.db_conn.pool, payload.auth.user_id.clone())
        .await
        .map_err(|_| response::Error::FailedToCreateRestaurant)?
        .filter(|owner| owner.is_approved)
        .ok_or(response::Error::OwnerNotApproved)?;

    let existing = repository::find_by_owner_id(&ctx.db_conn.pool, owner.id.clone())
        .await
        .map_err(|_| response::Error::FailedToCreateRestaurant)?;

    if existing.is_some() {
        return Err(response::Error::AlreadyOwnsRestaurant);
    }

    let logo = payload.body.logo.ok_or(response::Error::LogoRequired)?;

    let folder = format!("{}/{}", ctx.folders.restaurants, owner.id);
    let timestamp = chrono::Utc::now().timestamp_millis();
    let mut uploads = vec![Upload::timestamped(
        format!("{}/logo", folder),
        storage::read_file(logo).map_err(|_| response::Error::FailedToUploadImages)?,
    )];

    for (i, image) in payload.body.images.into_iter().enumerate() {
        uploads.push(Upload {
            folder: format!("{}/images", folder),
            public_id: format!("{}-{}", timestamp, i),
            contents: storage::read_file(image)
                .map_err(|_| response::Error::FailedToUploadImages)?,
        });
    }

    let mut media = storage::upload_many(ctx.storage.as_ref(), uploads)
        .await
        .map_err(|_| response::Error::FailedToUploadImages)?;
    let logo = media.remove(0);

    let uploaded = std::iter::once(logo.clone())
        .chain(media.iter().cloned())
        .collect::<Vec<_>>();

    let created = repository::create(
        &ctx.db_conn.pool,
        repository::CreateRestaurantPayload {
            owner_id: owner.id.clone(),
            name: payload.body.name,
            restaurant_type,
            food_category,
            description: payload.body.description,
            address: payload.body.address,
            city: payload.body.city,
            pincode: payload.body.pincode,
            branch_number: payload.body.branch_number,
            logo,
            images: media,
            opening_time: payload.body.opening_time,
            closing_time: payload.body.closing_time,
        },
    )
    .await;

    let restaurant = match created {
        Ok(restaurant) => restaurant,
        Err(err) => {
            storage::discard(ctx.storage.as_ref(), uploaded).await;
            return Err(match err {
                repository::Error::AlreadyOwnsRestaurant => response::Error::AlreadyOwnsRestaurant,
                _ => response::Error::FailedToCreateRestaurant,
            });
        }
    };

    let access_token = token::issue_for_user(&ctx.auth, &owner, Some(&restaurant.id))
        .map_err(|_| response::Error::FailedToCreateRestaurant)?;

    tracing::info!("Owner {} created restaurant {}", owner.id, restaurant.id);

    Ok(response::Success::RestaurantCreated(
        restaurant,
        Session {
            user: owner,
            access_token,
            ttl: ctx.auth.jwt_ttl,
        },
    ))
}
