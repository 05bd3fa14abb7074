use super::types::{request, response};
use crate::{
    modules::{
        auth::service::{password, session::Session, token},
        restaurant,
        user::repository::{self, Role, User},
    },
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

/// Role first, then approval.
fn check_access(user: &User, requested_role: Option<Role>) -> Result<(), response::Error> {
    if requested_role.is_some_and(|role| role != user.role) {
        tracing::warn!(
            "Login for {} asked for role {:?} but the account is {}",
            user.id,
            requested_role,
            user.role
        );
        return Err(response::Error::InvalidCredentials);
    }

    if !user.is_approved {
        return Err(response::Error::PendingApproval);
    }

    Ok(())
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let user = repository::find_by_email(&ctx.db_conn.pool, payload.body.email)
        .await
        .map_err(|_| response::Error::UnexpectedError)?
        .ok_or(response::Error::InvalidCredentials)?;

    if !password::verify(payload.body.password, user.password_hash.clone()).await {
        return Err(response::Error::InvalidCredentials);
    }

    check_access(&user, payload.body.role)?;

    let restaurant_id = match user.role {
        Role::RestaurantOwner => {
            restaurant::repository::find_by_owner_id(&ctx.db_conn.pool, user.id.clone())
                .await
                .map_err(|_| response::Error::UnexpectedError)?
                .map(|restaurant| restaurant.id)
        }
        _ => None,
    };

    let access_token = token::issue_for_user(&ctx.auth, &user, restaurant_id.as_deref())
        .map_err(|_| response::Error::UnexpectedError)?;

    Ok(response::Success::LoggedIn(Session {
        user,
        access_token,
        ttl: ctx.auth.jwt_ttl,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role, is_approved: bool) -> User {
        User {
            id: "01HUSER".to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password_hash: String::new(),
            phone: "+919876543210".to_string(),
            role,
            profile_photo: None,
            id_photo: None,
            is_approved,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
        }
    }

    #[test]
    fn missing_role_is_not_checked() {
        assert_eq!(check_access(&user(Role::DeliveryAgent, true), None), Ok(()));
    }

    #[test]
    fn matching_role_passes() {
        assert_eq!(
            check_access(&user(Role::Admin, true), Some(Role::Admin)),
            Ok(())
        );
    }

    #[test]
    fn mismatched_role_looks_like_bad_credentials() {
        assert_eq!(
            check_access(&user(Role::User, true), Some(Role::Admin)),
            Err(response::Error::InvalidCredentials)
        );
    }

    #[test]
    fn role_is_checked_before_approval() {
        assert_eq!(
            check_access(&user(Role::RestaurantOwner, false), Some(Role::User)),
            Err(response::Error::InvalidCredentials)
        );
        assert_eq!(
            check_access(&user(Role::RestaurantOwner, false), Some(Role::RestaurantOwner)),
            Err(response::Error::PendingApproval)
        );
    }
}
