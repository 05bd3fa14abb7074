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

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RestaurantType {
    FastFood,
    CasualDining,
    FineDining,
    Cafe,
    FoodTruck,
}

impl RestaurantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FastFood => "fast-food",
            Self::CasualDining => "casual-dining",
            Self::FineDining => "fine-dining",
            Self::Cafe => "cafe",
            Self::FoodTruck => "food-truck",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    American,
    Italian,
    Chinese,
    Indian,
    Mexican,
    Japanese,
    Thai,
    Mediterranean,
}

impl FoodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::American => "american",
            Self::Italian => "italian",
            Self::Chinese => "chinese",
            Self::Indian => "indian",
            Self::Mexican => "mexican",
            Self::Japanese => "japanese",
            Self::Thai => "thai",
            Self::Mediterranean => "mediterranean",
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown value: {}", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for RestaurantType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "fast-food" => Ok(Self::FastFood),
            "casual-dining" => Ok(Self::CasualDining),
            "fine-dining" => Ok(Self::FineDining),
            "cafe" => Ok(Self::Cafe),
            "food-truck" => Ok(Self::FoodTruck),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl TryFrom<String> for RestaurantType {
    type Error = UnknownVariant;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for FoodCategory {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "american" => Ok(Self::American),
            "italian" => Ok(Self::Italian),
            "chinese" => Ok(Self::Chinese),
            "indian" => Ok(Self::Indian),
            "mexican" => Ok(Self::Mexican),
            "japanese" => Ok(Self::Japanese),
            "thai" => Ok(Self::Thai),
            "mediterranean" => Ok(Self::Mediterranean),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl TryFrom<String> for FoodCategory {
    type Error = UnknownVariant;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(sqlx::FromRow, Serialize, Clone, Debug)]
pub struct Restaurant {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub restaurant_type: RestaurantType,
    #[sqlx(try_from = "String")]
    pub food_category: FoodCategory,
    pub description: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub branch_number: Option<String>,
    pub logo: Json<UploadedMedia>,
    pub images: Json<Vec<UploadedMedia>>,
    pub opening_time: String,
    pub closing_time: String,
    pub is_approved: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl Restaurant {
    pub fn is_owner(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

#[derive(Debug, PartialEq)]
pub enum Error {
    AlreadyOwnsRestaurant,
    UnexpectedError,
}

pub struct CreateRestaurantPayload {
    pub owner_id: String,
    pub name: String,
    pub restaurant_type: RestaurantType,
    pub food_category: FoodCategory,
    pub description: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub branch_number: Option<String>,
    pub logo: UploadedMedia,
    pub images: Vec<UploadedMedia>,
    pub opening_time: String,
    pub closing_time: String,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateRestaurantPayload,
) -> Result<Restaurant> {
    sqlx::query_as::<_, Restaurant>(
        "
        INSERT INTO restaurants (
            id,
            owner_id,
            name,
            restaurant_type,
            food_category,
            description,
            address,
            city,
            pincode,
            branch_number,
            logo,
            images,
            opening_time,
            closing_time
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.owner_id)
    .bind(payload.name)
    .bind(payload.restaurant_type.as_str())
    .bind(payload.food_category.as_str())
    .bind(payload.description)
    .bind(payload.address)
    .bind(payload.city)
    .bind(payload.pincode)
    .bind(payload.branch_number)
    .bind(Json(payload.logo))
    .bind(Json(payload.images))
    .bind(payload.opening_time)
    .bind(payload.closing_time)
    .fetch_one(e)
    .await
    .map_err(|err| {
        if database::is_unique_violation(&err) {
            return Error::AlreadyOwnsRestaurant;
        }

        tracing::error!("Error occurred while creating a restaurant: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Restaurant>> {
    sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE id = $1")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching restaurant with id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_by_owner_id<'e, E: PgExecutor<'e>>(
    e: E,
    owner_id: String,
) -> Result<Option<Restaurant>> {
    sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE owner_id = $1")
        .bind(owner_id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching the restaurant of owner {}: {}",
                owner_id,
                err
            );
            Error::UnexpectedError
        })
}

pub struct UpdateRestaurantPayload {
    pub name: String,
    pub restaurant_type: RestaurantType,
    pub food_category: FoodCategory,
    pub description: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub branch_number: Option<String>,
    pub opening_time: String,
    pub closing_time: String,
    pub logo: Option<UploadedMedia>,
    pub images: Option<Vec<UploadedMedia>>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateRestaurantPayload,
) -> Result<Restaurant> {
    sqlx::query_as::<_, Restaurant>(
        "
        UPDATE restaurants SET
            name = $1,
            restaurant_type = $2,
            food_category = $3,
            description = $4,
            address = $5,
            city = $6,
            pincode = $7,
            branch_number = $8,
            opening_time = $9,
            closing_time = $10,
            logo = COALESCE($11, logo),
            images = COALESCE($12, images),
            updated_at = NOW()
        WHERE
            id = $13
        RETURNING *
        ",
    )
    .bind(payload.name)
    .bind(payload.restaurant_type.as_str())
    .bind(payload.food_category.as_str())
    .bind(payload.description)
    .bind(payload.address)
    .bind(payload.city)
    .bind(payload.pincode)
    .bind(payload.branch_number)
    .bind(payload.opening_time)
    .bind(payload.closing_time)
    .bind(payload.logo.map(Json))
    .bind(payload.images.map(Json))
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update restaurant {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn approve<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Restaurant>> {
    sqlx::query_as::<_, Restaurant>(
        "
        UPDATE restaurants SET
            is_approved = true,
            updated_at = NOW()
        WHERE
            id = $1
        RETURNING *
        ",
    )
    .bind(id.clone())
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while approving restaurant {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn find_many_approved(
    pool: &PgPool,
    pagination: &Pagination,
) -> Result<(Vec<Restaurant>, u32)> {
    let restaurants = sqlx::query_as::<_, Restaurant>(
        "
        SELECT * FROM restaurants
        WHERE is_approved = true
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        ",
    )
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while listing restaurants: {}", err);
        Error::UnexpectedError
    })?;

    let total =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM restaurants WHERE is_approved = true")
            .fetch_one(pool)
            .await
            .map_err(|err| {
                tracing::error!("Error occurred while counting restaurants: {}", err);
                Error::UnexpectedError
            })?;

    Ok((restaurants, total as u32))
}
