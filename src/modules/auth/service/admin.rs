use super::password;
use crate::{
    modules::user::repository::{self, Role},
    types::AdminConfig,
};
use sqlx::PgPool;

#[derive(Debug)]
pub enum Error {
    HashFailed,
    UnexpectedError,
}

/// Creates the configured administrator unless the email is already taken.
pub async fn ensure(pool: &PgPool, admin: AdminConfig) -> Result<(), Error> {
    let existing = repository::find_by_email(pool, admin.email.clone())
        .await
        .map_err(|_| Error::UnexpectedError)?;

    if let Some(user) = existing {
        match repository::is_admin(&user) {
            true => tracing::debug!("Administrator {} already exists", user.email),
            false => tracing::warn!(
                "{} is registered as {}, not promoting it to administrator",
                user.email,
                user.role
            ),
        }
        return Ok(());
    }

    let password_hash = password::hash(admin.password)
        .await
        .map_err(|_| Error::HashFailed)?;

    let user = repository::create(
        pool,
        repository::CreateUserPayload {
            name: admin.name,
            email: admin.email,
            password_hash,
            phone: admin.phone,
            role: Role::Admin,
            is_approved: true,
        },
    )
    .await
    .map_err(|_| Error::UnexpectedError)?;

    tracing::info!("Created administrator {}", user.email);

    Ok(())
}
