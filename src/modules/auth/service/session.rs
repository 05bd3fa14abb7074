use super::super::middleware::TOKEN_COOKIE;
use crate::modules::user::repository::User;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Duration;
use serde_json::json;

/// A freshly issued access token, handed out both in the body and as a cookie.
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub ttl: Duration,
}

impl Session {
    pub fn cookie(&self) -> String {
        let cookie = Cookie::build((TOKEN_COOKIE, self.access_token.clone()))
            .http_only(true)
            .path("/")
            .same_site(SameSite::Lax)
            .build();

        format!("{}; Max-Age={}", cookie, self.ttl.num_seconds().max(0))
    }

    pub fn into_response_with(self, status: StatusCode, message: &str) -> Response {
        let cookie = self.cookie();
        let mut res = (
            status,
            Json(json!({
                "message": message,
                "user": self.user,
                "access_token": self.access_token,
            })),
        )
            .into_response();

        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                res.headers_mut().insert(header::SET_COOKIE, value);
            }
            Err(err) => tracing::error!("Failed to encode the session cookie: {}", err),
        }

        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::user::repository::Role;

    fn session() -> Session {
        Session {
            user: User {
                id: "01HUSER".to_string(),
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                password_hash: "$argon2id$hash".to_string(),
                phone: "+919876543210".to_string(),
                role: Role::User,
                profile_photo: None,
                id_photo: None,
                is_approved: true,
                created_at: chrono::Utc::now().naive_utc(),
                updated_at: None,
            },
            access_token: "abc.def.ghi".to_string(),
            ttl: Duration::days(1),
        }
    }

    #[test]
    fn cookie_is_http_only_and_lives_as_long_as_the_token() {
        let cookie = session().cookie();

        assert!(cookie.starts_with("token=abc.def.ghi"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.ends_with("Max-Age=86400"));
    }

    #[test]
    fn response_carries_the_token_twice() {
        let res = session().into_response_with(StatusCode::OK, "Login successful");

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("token=abc.def.ghi")));
    }
}
