use super::types::{request, response};
use crate::{
    modules::{
        auth::service::{password, session::Session, token},
        user::repository::{self, Role},
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
            role: Role::User,
            is_approved: true,
        },
    )
    .await
    .map_err(|err| match err {
        repository::Error::EmailAlreadyInUse => response::Error::EmailAlreadyInUse,
        _ => response::Error::UnexpectedError,
    })?;

    let access_token = token::issue_for_user(&ctx.auth, &user, None)
        .map_err(|_| response::Error::UnexpectedError)?;

    tracing::info!("Registered user {}", user.id);

    Ok(response::Success::Registered(Session {
        user,
        access_token,
        ttl: ctx.auth.jwt_ttl,
    }))
}
