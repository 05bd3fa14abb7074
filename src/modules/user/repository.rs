use crate::{
    modules::storage::UploadedMedia,
    utils::{database, pagination::Pagination},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, PgExecutor, PgPool};
use std::{fmt, str::FromStr};
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    RestaurantOwner,
    DeliveryAgent,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::RestaurantOwner => "restaurant_owner",
            Role::DeliveryAgent => "delivery_agent",
            Role::Admin => "admin",
        }
    }

    /// Owners and delivery agents stay locked out until an admin approves them.
    pub fn requires_approval(&self) -> bool {
        matches!(self, Role::RestaurantOwner | Role::DeliveryAgent)
    }
}

#[derive(Debug, PartialEq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid user role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "user" => Ok(Role::User),
            "restaurant_owner" => Ok(Role::RestaurantOwner),
            "delivery_agent" => Ok(Role::DeliveryAgent),
            "admin" => Ok(Role::Admin),
            role => Err(UnknownRole(role.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(sqlx::FromRow, Serialize, Clone, Debug)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub profile_photo: Option<Json<UploadedMedia>>,
    pub id_photo: Option<Json<UploadedMedia>>,
    pub is_approved: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl User {
    pub fn uploaded_media(&self) -> Vec<UploadedMedia> {
        [&self.profile_photo, &self.id_photo]
            .into_iter()
            .flatten()
            .map(|media| media.0.clone())
            .collect()
    }
}

#[derive(Debug, PartialEq)]
pub enum Error {
    EmailAlreadyInUse,
    UnexpectedError,
}

pub struct CreateUserPayload {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub role: Role,
    pub is_approved: bool,
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateUserPayload) -> Result<User> {
    sqlx::query_as::<_, User>(
        "
        INSERT INTO users (id, name, email, password_hash, phone, role, is_approved)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.name)
    .bind(payload.email)
    .bind(payload.password_hash)
    .bind(payload.phone)
    .bind(payload.role.as_str())
    .bind(payload.is_approved)
    .fetch_one(e)
    .await
    .map_err(|err| {
        if database::is_unique_violation(&err) {
            return Error::EmailAlreadyInUse;
        }

        tracing::error!("Error occured while creating a user account: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching user with id {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_by_email<'e, E: PgExecutor<'e>>(e: E, email: String) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred in find_by_email: {}", err);
            Error::UnexpectedError
        })
}

pub struct UpdateUserPayload {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub profile_photo: Option<UploadedMedia>,
    pub id_photo: Option<UploadedMedia>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateUserPayload,
) -> Result<User> {
    sqlx::query_as::<_, User>(
        "
        UPDATE users SET
            name = COALESCE($1, name),
            phone = COALESCE($2, phone),
            profile_photo = COALESCE($3, profile_photo),
            id_photo = COALESCE($4, id_photo),
            updated_at = NOW()
        WHERE
            id = $5
        RETURNING *
        ",
    )
    .bind(payload.name)
    .bind(payload.phone)
    .bind(payload.profile_photo.map(Json))
    .bind(payload.id_photo.map(Json))
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update a user by id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

/// Approves an account still waiting for review. Already approved or missing
/// accounts yield `None`.
pub async fn approve_pending<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "
        UPDATE users SET
            is_approved = true,
            updated_at = NOW()
        WHERE
            id = $1
            AND is_approved = false
        RETURNING *
        ",
    )
    .bind(id.clone())
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while approving user {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn delete_pending<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("DELETE FROM users WHERE id = $1 AND is_approved = false RETURNING *")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while rejecting user {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub struct FindManyFilters {
    pub role: Role,
    pub is_approved: bool,
}

pub async fn find_many(
    pool: &PgPool,
    pagination: &Pagination,
    filters: FindManyFilters,
) -> Result<(Vec<User>, u32)> {
    let users = sqlx::query_as::<_, User>(
        "
        SELECT * FROM users
        WHERE role = $1 AND is_approved = $2
        ORDER BY created_at DESC
        LIMIT $3 OFFSET $4
        ",
    )
    .bind(filters.role.as_str())
    .bind(filters.is_approved)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while listing {} users: {}", filters.role, err);
        Error::UnexpectedError
    })?;

    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM users WHERE role = $1 AND is_approved = $2",
    )
    .bind(filters.role.as_str())
    .bind(filters.is_approved)
    .fetch_one(pool)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while counting {} users: {}", filters.role, err);
        Error::UnexpectedError
    })?;

    Ok((users, total as u32))
}

pub fn is_admin(user: &User) -> bool {
    user.role == Role::Admin
}
