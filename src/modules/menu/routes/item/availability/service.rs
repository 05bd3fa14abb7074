use super::types::{request, response};
use crate::{modules::menu::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::update_item(
        &ctx.db_conn.pool,
        payload.auth.restaurant_id,
        payload.id,
        repository::UpdateItemPayload {
            category_id: None,
            name: None,
            description: None,
            price: None,
            image: None,
            is_available: Some(payload.body.is_available),
            is_featured: None,
            is_vegetarian: None,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateItem)?
    .ok_or(response::Error::ItemNotFound)
    .map(response::Success::AvailabilityUpdated)
}
