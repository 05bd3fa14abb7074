//! Signed, time-bound access tokens.
//!
//! Tokens are HS256 JWTs carrying the user id (`sub`), email and role. Owners
//! also carry the id of the restaurant they owned when the token was issued.

use crate::{
    modules::user::repository::{Role, User},
    types::AuthContext,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, PartialEq)]
pub enum Error {
    IssueFailed,
    InvalidSignature,
    Expired,
    Malformed,
}

pub struct Subject<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub role: Role,
    pub restaurant_id: Option<&'a str>,
}

impl<'a> Subject<'a> {
    /// The restaurant id is dropped for anyone who is not a restaurant owner.
    pub fn from_user(user: &'a User, restaurant_id: Option<&'a str>) -> Self {
        Self {
            id: &user.id,
            email: &user.email,
            role: user.role,
            restaurant_id: match user.role {
                Role::RestaurantOwner => restaurant_id,
                _ => None,
            },
        }
    }
}

pub fn issue(subject: Subject, secret: &str, ttl: Duration) -> Result<String, Error> {
    let now = Utc::now();

    let claims = Claims {
        sub: subject.id.to_string(),
        email: subject.email.to_string(),
        role: subject.role,
        restaurant_id: subject.restaurant_id.map(str::to_string),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| {
        tracing::error!("Failed to sign access token: {}", err);
        Error::IssueFailed
    })
}

pub fn verify(token: &str, secret: &str) -> Result<Claims, Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["sub", "exp"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => Error::Expired,
        ErrorKind::InvalidSignature => Error::InvalidSignature,
        _ => Error::Malformed,
    })
}

pub fn issue_for_user(
    cfg: &AuthContext,
    user: &User,
    restaurant_id: Option<&str>,
) -> Result<String, Error> {
    issue(
        Subject::from_user(user, restaurant_id),
        &cfg.jwt_secret,
        cfg.jwt_ttl,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "a-test-secret-that-is-long-enough";

    fn subject(role: Role, restaurant_id: Option<&'static str>) -> Subject<'static> {
        Subject {
            id: "01HUSER",
            email: "owner@example.com",
            role,
            restaurant_id,
        }
    }

    #[test]
    fn issued_tokens_verify_with_the_same_secret() {
        let token = issue(
            subject(Role::RestaurantOwner, Some("01HREST")),
            SECRET,
            Duration::days(1),
        )
        .unwrap();

        let claims = verify(&token, SECRET).unwrap();

        assert_eq!(claims.sub, "01HUSER");
        assert_eq!(claims.email, "owner@example.com");
        assert_eq!(claims.role, Role::RestaurantOwner);
        assert_eq!(claims.restaurant_id.as_deref(), Some("01HREST"));
        assert_eq!(claims.exp - claims.iat, Duration::days(1).num_seconds());
    }

    #[test]
    fn restaurant_id_is_omitted_when_absent() {
        let token = issue(subject(Role::User, None), SECRET, Duration::hours(1)).unwrap();

        assert_eq!(verify(&token, SECRET).unwrap().restaurant_id, None);
    }

    #[test]
    fn wrong_secret_is_an_invalid_signature() {
        let token = issue(subject(Role::User, None), SECRET, Duration::hours(1)).unwrap();

        assert_eq!(
            verify(&token, "some-other-secret"),
            Err(Error::InvalidSignature)
        );
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let token = issue(subject(Role::Admin, None), SECRET, Duration::hours(-1)).unwrap();

        assert_eq!(verify(&token, SECRET), Err(Error::Expired));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(verify("not.a.token", SECRET), Err(Error::Malformed));
        assert_eq!(verify("", SECRET), Err(Error::Malformed));
    }

    #[test]
    fn only_owners_get_a_restaurant_claim() {
        let user = User {
            id: "01HAGENT".to_string(),
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            password_hash: String::new(),
            phone: "+919876543210".to_string(),
            role: Role::DeliveryAgent,
            profile_photo: None,
            id_photo: None,
            is_approved: true,
            created_at: Utc::now().naive_utc(),
            updated_at: None,
        };

        assert_eq!(Subject::from_user(&user, Some("01HREST")).restaurant_id, None);

        let owner = User {
            role: Role::RestaurantOwner,
            ..user
        };

        assert_eq!(
            Subject::from_user(&owner, Some("01HREST")).restaurant_id,
            Some("01HREST")
        );
    }
}
