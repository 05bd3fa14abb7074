use super::{
    guard::{self, Denial, OwnershipGuard, Pipeline},
    service::token::{self, Claims},
};
use crate::{modules::user::repository::Role, types::Context};
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

pub const TOKEN_COOKIE: &str = "token";

/// Requests that never need a token.
const PUBLIC_ROUTES: &[(&str, &str)] = &[
    ("POST", "/auth/register/user"),
    ("POST", "/auth/register/restaurant"),
    ("POST", "/auth/register/delivery"),
    ("POST", "/auth/login"),
];

/// The verified identity of the caller. Inserted once by [`authenticate`] and
/// only read afterwards.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Auth {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub restaurant_id: Option<String>,
}

impl From<Claims> for Auth {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
            restaurant_id: claims.restaurant_id,
        }
    }
}

pub fn is_public(method: &Method, path: &str) -> bool {
    if method == Method::OPTIONS {
        return true;
    }

    let path = match path.len() > 1 {
        true => path.trim_end_matches('/'),
        false => path,
    };

    PUBLIC_ROUTES
        .iter()
        .any(|(public_method, public_path)| method.as_str() == *public_method && path == *public_path)
}

#[derive(Debug, PartialEq)]
pub enum TokenError {
    Missing,
    MalformedHeader,
}

/// The bearer header wins over the cookie whenever it is present.
pub fn extract_token(headers: &HeaderMap) -> Result<String, TokenError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        return value
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or(TokenError::MalformedHeader);
    }

    CookieJar::from_headers(headers)
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(TokenError::Missing)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Unauthorized" })),
    )
        .into_response()
}

fn forbidden(denial: Denial) -> Response {
    let message = match denial {
        Denial::RoleNotAllowed => "You are not allowed to access this resource",
        Denial::NotOwner => "You do not own this restaurant",
        Denial::RestaurantNotApproved => "Your restaurant has not been approved yet",
    };

    (StatusCode::FORBIDDEN, Json(json!({ "message": message }))).into_response()
}

pub async fn authenticate(
    State(ctx): State<Arc<Context>>,
    mut req: Request,
    next: Next,
) -> Response {
    if is_public(req.method(), req.uri().path()) {
        return next.run(req).await;
    }

    let claims = match extract_token(req.headers()) {
        Ok(raw) => token::verify(&raw, &ctx.auth.jwt_secret).map_err(|err| format!("{:?}", err)),
        Err(err) => Err(format!("{:?}", err)),
    };

    match claims {
        Ok(claims) => {
            req.extensions_mut().insert(Auth::from(claims));
            next.run(req).await
        }
        Err(reason) => {
            tracing::warn!(
                "Rejected unauthenticated request to {} ({})",
                req.uri().path(),
                reason
            );
            unauthorized()
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<Context>> for Auth {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        _: &Arc<Context>,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Auth>()
            .cloned()
            .ok_or_else(unauthorized)
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct AdminAuth(pub Auth);

#[async_trait]
impl FromRequestParts<Arc<Context>> for AdminAuth {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &Arc<Context>,
    ) -> Result<Self, Self::Rejection> {
        let auth = Auth::from_request_parts(parts, ctx).await?;

        Pipeline::new(guard::ADMINS)
            .run(auth)
            .await
            .map(Self)
            .map_err(forbidden)
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct OwnerAuth(pub Auth);

#[async_trait]
impl FromRequestParts<Arc<Context>> for OwnerAuth {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &Arc<Context>,
    ) -> Result<Self, Self::Rejection> {
        let auth = Auth::from_request_parts(parts, ctx).await?;

        Pipeline::new(guard::RESTAURANT_OWNERS)
            .run(auth)
            .await
            .map(Self)
            .map_err(forbidden)
    }
}

/// An owner acting on the restaurant their token is linked to.
#[derive(Serialize, Clone, Debug)]
pub struct RestaurantAuth {
    pub auth: Auth,
    pub restaurant_id: String,
}

#[async_trait]
impl FromRequestParts<Arc<Context>> for RestaurantAuth {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &Arc<Context>,
    ) -> Result<Self, Self::Rejection> {
        let auth = Auth::from_request_parts(parts, ctx).await?;
        let ownership = OwnershipGuard::of_token_restaurant(&ctx.db_conn.pool, &auth);

        let auth = Pipeline::new(guard::RESTAURANT_OWNERS)
            .then_ownership(ownership)
            .run(auth)
            .await
            .map_err(forbidden)?;

        match auth.restaurant_id.clone() {
            Some(restaurant_id) => Ok(Self {
                auth,
                restaurant_id,
            }),
            None => Err(forbidden(Denial::NotOwner)),
        }
    }
}
