use super::types::{request, response};
use crate::{
    modules::{
        storage,
        user::repository,
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

    let user = repository::find_by_id(&ctx.db_conn.pool, payload.auth.user_id.clone())
        .await
        .map_err(|_| response::Error::FailedToUpdateProfile)?
        .ok_or(response::Error::UserNotFound)?;

    let profile_photo = match payload.body.profile_photo {
        Some(file) => {
            let folder = format!("{}/{}/profile_photo", ctx.folders.profile_photos, user.id);

            let media = storage::upload_file(ctx.storage.as_ref(), folder, file)
                .await
                .map_err(|_| response::Error::FailedToUploadProfilePhoto)?;

            Some(media)
        }
        None => None,
    };

    let uploaded = profile_photo.clone().into_iter().collect::<Vec<_>>();
    let superseded = match profile_photo {
        Some(_) => user.profile_photo.as_ref().map(|media| media.0.clone()),
        None => None,
    };

    let updated = repository::update_by_id(
        &ctx.db_conn.pool,
        user.id,
        repository::UpdateUserPayload {
            name: payload.body.name,
            phone: payload.body.phone,
            profile_photo,
            id_photo: None,
        },
    )
    .await;

    match updated {
        Ok(user) => {
            storage::discard(ctx.storage.as_ref(), superseded.into_iter().collect()).await;
            Ok(response::Success::ProfileUpdated(user))
        }
        Err(_) => {
            storage::discard(ctx.storage.as_ref(), uploaded).await;
            Err(response::Error::FailedToUpdateProfile)
        }
    }
}
