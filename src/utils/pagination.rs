use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json, RequestPartsExt,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

const MAX_PER_PAGE: u32 = 100;

#[derive(Serialize, Debug)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: PaginatedMeta,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PaginatedMeta {
    pub total: u32,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u32, pagination: &Pagination) -> Paginated<T> {
        Self {
            items,
            meta: PaginatedMeta {
                total,
                page: pagination.page,
                per_page: pagination.per_page,
            },
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Pagination {
    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }

    pub fn offset(&self) -> i64 {
        (self.page.saturating_sub(1) as i64) * self.per_page as i64
    }
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    10
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Pagination {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extract::<Query<Pagination>>().await {
            Ok(Query(pagination))
                if pagination.page >= 1
                    && pagination.per_page >= 1
                    && pagination.per_page <= MAX_PER_PAGE =>
            {
                Ok(pagination)
            }
            _ => Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Invalid pagination options"})),
            )
                .into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        let pagination = Pagination {
            page: 1,
            per_page: 10,
        };
        assert_eq!(pagination.offset(), 0);
        assert_eq!(pagination.limit(), 10);
    }

    #[test]
    fn later_pages_skip_previous_items() {
        let pagination = Pagination {
            page: 3,
            per_page: 25,
        };
        assert_eq!(pagination.offset(), 50);
    }

    #[test]
    fn meta_mirrors_the_request() {
        let pagination = Pagination {
            page: 2,
            per_page: 5,
        };
        let page = Paginated::new(vec!["a", "b"], 7, &pagination);
        assert_eq!(
            page.meta,
            PaginatedMeta {
                total: 7,
                page: 2,
                per_page: 5
            }
        );
    }
}
