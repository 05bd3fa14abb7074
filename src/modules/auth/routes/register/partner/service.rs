use super::types::{request, response};
use crate::{
    modules::{
        auth::service::{password, session::Session, token},
        storage::{self, Upload, UploadedMedia},
        user::repository,
    },
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

/// Removes a registration that could not be completed so the email can be
/// used again.
async fn withdraw(ctx: &Context, user_id: &str, documents: Vec<UploadedMedia>) {
    if let Err(err) = repository::delete_pending(&ctx.db_conn.pool, user_id.to_string()).await {
        tracing::error!("Failed to remove incomplete registration {}: {:?}", user_id, err);
    }
    storage::discard(ctx.storage.as_ref(), documents).await;
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let (Some(profile_photo), Some(id_card)) = (payload.body.profile_photo, payload.body.id_card)
    else {
        return Err(response::Error::MissingDocuments);
    };

    let profile_photo =
        storage::read_file(profile_photo).map_err(|_| response::Error::FailedToUploadDocuments)?;
    let id_card =
        storage::read_file(id_card).map_err(|_| response::Error::FailedToUploadDocuments)?;

    let password_hash = password::hash(payload.body.password)
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    let user = repository::create(
        &ctx.db_conn.pool,
        repository::CreateUserPayload {
            name: payload.body.name,
            email: payload.body.email,
            password_hash,
            phone: payload.body.phone,
            role: payload.role,
            is_approved: !payload.role.requires_approval(),
        },
    )
    .await
    .map_err(|err| match err {
        repository::Error::EmailAlreadyInUse => response::Error::EmailAlreadyInUse,
        _ => response::Error::UnexpectedError,
    })?;

    let uploaded = storage::upload_many(
        ctx.storage.as_ref(),
        vec![
            Upload::timestamped(
                format!("{}/{}/profile_photo", ctx.folders.profile_photos, user.id),
                profile_photo,
            ),
            Upload::timestamped(
                format!("{}/{}/id_card", ctx.folders.id_cards, user.id),
                id_card,
            ),
        ],
    )
    .await;

    let documents = match uploaded {
        Ok(documents) => documents,
        Err(_) => {
            withdraw(&ctx, &user.id, vec![]).await;
            return Err(response::Error::FailedToUploadDocuments);
        }
    };

    let mut attached = documents.clone().into_iter();
    let updated = repository::update_by_id(
        &ctx.db_conn.pool,
        user.id.clone(),
        repository::UpdateUserPayload {
            name: None,
            phone: None,
            profile_photo: attached.next(),
            id_photo: attached.next(),
        },
    )
    .await;

    let user = match updated {
        Ok(user) => user,
        Err(_) => {
            withdraw(&ctx, &user.id, documents).await;
            return Err(response::Error::UnexpectedError);
        }
    };

    let access_token = token::issue_for_user(&ctx.auth, &user, None)
        .map_err(|_| response::Error::UnexpectedError)?;

    tracing::info!("Registered {} {} pending approval", user.role, user.id);

    Ok(response::Success::Registered(Session {
        user,
        access_token,
        ttl: ctx.auth.jwt_ttl,
    }))
}
