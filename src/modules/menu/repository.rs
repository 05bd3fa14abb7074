use crate::{modules::storage::UploadedMedia, utils::database};
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{types::Json, PgExecutor};
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

#[derive(sqlx::FromRow, Serialize, Clone, Debug)]
pub struct MenuCategory {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(sqlx::FromRow, Serialize, Clone, Debug)]
pub struct MenuItem {
    pub id: String,
    pub restaurant_id: String,
    pub category_id: String,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub image: Option<Json<UploadedMedia>>,
    pub is_available: bool,
    pub is_featured: bool,
    pub is_vegetarian: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, PartialEq)]
pub enum Error {
    NameTaken,
    CategoryInUse,
    UnexpectedError,
}

fn map_write_error(err: sqlx::Error, action: &str) -> Error {
    if database::is_unique_violation(&err) {
        return Error::NameTaken;
    }

    if database::is_foreign_key_violation(&err) {
        return Error::CategoryInUse;
    }

    tracing::error!("Error occurred while trying to {}: {}", action, err);
    Error::UnexpectedError
}

pub struct CreateCategoryPayload {
    pub restaurant_id: String,
    pub name: String,
    pub description: Option<String>,
}

pub async fn create_category<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateCategoryPayload,
) -> Result<MenuCategory> {
    sqlx::query_as::<_, MenuCategory>(
        "
        INSERT INTO menu_categories (id, restaurant_id, name, description)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.restaurant_id)
    .bind(payload.name)
    .bind(payload.description)
    .fetch_one(e)
    .await
    .map_err(|err| map_write_error(err, "create a menu category"))
}

pub async fn find_category<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
    id: String,
) -> Result<Option<MenuCategory>> {
    sqlx::query_as::<_, MenuCategory>(
        "SELECT * FROM menu_categories WHERE id = $1 AND restaurant_id = $2",
    )
    .bind(id.clone())
    .bind(restaurant_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching menu category {}: {}", id, err);
        Error::UnexpectedError
    })
}

/// Case-insensitive lookup, optionally skipping the category being renamed.
pub async fn find_category_by_name<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
    name: String,
    excluding_id: Option<String>,
) -> Result<Option<MenuCategory>> {
    sqlx::query_as::<_, MenuCategory>(
        "
        SELECT * FROM menu_categories
        WHERE
            restaurant_id = $1
            AND LOWER(name) = LOWER($2)
            AND ($3::VARCHAR IS NULL OR id <> $3)
        ",
    )
    .bind(restaurant_id)
    .bind(name)
    .bind(excluding_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while looking up a menu category: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_categories<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
) -> Result<Vec<MenuCategory>> {
    sqlx::query_as::<_, MenuCategory>(
        "SELECT * FROM menu_categories WHERE restaurant_id = $1 ORDER BY name",
    )
    .bind(restaurant_id.clone())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while listing categories of restaurant {}: {}",
            restaurant_id,
            err
        );
        Error::UnexpectedError
    })
}

pub struct UpdateCategoryPayload {
    pub name: Option<String>,
    pub description: Option<String>,
}

pub async fn update_category<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
    id: String,
    payload: UpdateCategoryPayload,
) -> Result<Option<MenuCategory>> {
    sqlx::query_as::<_, MenuCategory>(
        "
        UPDATE menu_categories SET
            name = COALESCE($1, name),
            description = COALESCE($2, description),
            updated_at = NOW()
        WHERE
            id = $3
            AND restaurant_id = $4
        RETURNING *
        ",
    )
    .bind(payload.name)
    .bind(payload.description)
    .bind(id)
    .bind(restaurant_id)
    .fetch_optional(e)
    .await
    .map_err(|err| map_write_error(err, "update a menu category"))
}

pub async fn count_items_by_category<'e, E: PgExecutor<'e>>(
    e: E,
    category_id: String,
) -> Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM menu_items WHERE category_id = $1")
        .bind(category_id.clone())
        .fetch_one(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while counting items of category {}: {}",
                category_id,
                err
            );
            Error::UnexpectedError
        })
}

/// Fails with [`Error::CategoryInUse`] while items still reference the category.
pub async fn delete_category<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
    id: String,
) -> Result<Option<MenuCategory>> {
    sqlx::query_as::<_, MenuCategory>(
        "DELETE FROM menu_categories WHERE id = $1 AND restaurant_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(restaurant_id)
    .fetch_optional(e)
    .await
    .map_err(|err| map_write_error(err, "delete a menu category"))
}

pub struct CreateItemPayload {
    pub restaurant_id: String,
    pub category_id: String,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub image: Option<UploadedMedia>,
    pub is_available: bool,
    pub is_featured: bool,
    pub is_vegetarian: bool,
}

pub async fn create_item<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateItemPayload,
) -> Result<MenuItem> {
    sqlx::query_as::<_, MenuItem>(
        "
        INSERT INTO menu_items (
            id,
            restaurant_id,
            category_id,
            name,
            description,
            price,
            image,
            is_available,
            is_featured,
            is_vegetarian
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.restaurant_id)
    .bind(payload.category_id)
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.price)
    .bind(payload.image.map(Json))
    .bind(payload.is_available)
    .bind(payload.is_featured)
    .bind(payload.is_vegetarian)
    .fetch_one(e)
    .await
    .map_err(|err| map_write_error(err, "create a menu item"))
}

pub async fn find_item<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
    id: String,
) -> Result<Option<MenuItem>> {
    sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_items WHERE id = $1 AND restaurant_id = $2")
        .bind(id.clone())
        .bind(restaurant_id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching menu item {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_item_by_name<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
    category_id: String,
    name: String,
    excluding_id: Option<String>,
) -> Result<Option<MenuItem>> {
    sqlx::query_as::<_, MenuItem>(
        "
        SELECT * FROM menu_items
        WHERE
            restaurant_id = $1
            AND category_id = $2
            AND LOWER(name) = LOWER($3)
            AND ($4::VARCHAR IS NULL OR id <> $4)
        ",
    )
    .bind(restaurant_id)
    .bind(category_id)
    .bind(name)
    .bind(excluding_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while looking up a menu item: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_items<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
) -> Result<Vec<MenuItem>> {
    sqlx::query_as::<_, MenuItem>(
        "SELECT * FROM menu_items WHERE restaurant_id = $1 ORDER BY name",
    )
    .bind(restaurant_id.clone())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while listing items of restaurant {}: {}",
            restaurant_id,
            err
        );
        Error::UnexpectedError
    })
}

pub struct UpdateItemPayload {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub image: Option<UploadedMedia>,
    pub is_available: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_vegetarian: Option<bool>,
}

pub async fn update_item<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
    id: String,
    payload: UpdateItemPayload,
) -> Result<Option<MenuItem>> {
    sqlx::query_as::<_, MenuItem>(
        "
        UPDATE menu_items SET
            category_id = COALESCE($1, category_id),
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            price = COALESCE($4, price),
            image = COALESCE($5, image),
            is_available = COALESCE($6, is_available),
            is_featured = COALESCE($7, is_featured),
            is_vegetarian = COALESCE($8, is_vegetarian),
            updated_at = NOW()
        WHERE
            id = $9
            AND restaurant_id = $10
        RETURNING *
        ",
    )
    .bind(payload.category_id)
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.price)
    .bind(payload.image.map(Json))
    .bind(payload.is_available)
    .bind(payload.is_featured)
    .bind(payload.is_vegetarian)
    .bind(id)
    .bind(restaurant_id)
    .fetch_optional(e)
    .await
    .map_err(|err| map_write_error(err, "update a menu item"))
}

pub async fn delete_item<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
    id: String,
) -> Result<Option<MenuItem>> {
    sqlx::query_as::<_, MenuItem>(
        "DELETE FROM menu_items WHERE id = $1 AND restaurant_id = $2 RETURNING *",
    )
    .bind(id.clone())
    .bind(restaurant_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while deleting menu item {}: {}", id, err);
        Error::UnexpectedError
    })
}
