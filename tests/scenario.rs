//! End-to-end flows against a real database.
//!
//! Run with `DATABASE_URL` pointing at a disposable PostgreSQL server and
//! `cargo test -- --ignored`.

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use common::{context_with, FakeStorage, SECRET};
use cravings_backend_rs::{
    app,
    modules::{auth::service::{admin, token}, user::repository::Role},
    types::AdminConfig,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "cravings-test-boundary";

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str),
}

fn multipart(parts: &[Part]) -> Body {
    let mut body = String::new();
    for part in parts {
        body.push_str(&format!("--{}\r\n", BOUNDARY));
        match part {
            Part::Text(name, value) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                name, value
            )),
            Part::File(name, filename) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\nfake-image-bytes\r\n",
                name, filename
            )),
        }
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));
    Body::from(body)
}

struct Client {
    router: Router,
    storage: Arc<FakeStorage>,
}

impl Client {
    fn new(pool: PgPool) -> Self {
        Self::with_storage(pool, FakeStorage::default())
    }

    fn with_storage(pool: PgPool, storage: FakeStorage) -> Self {
        let storage = Arc::new(storage);
        Self {
            router: app::router(context_with(pool, storage.clone())),
            storage,
        }
    }

    async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn json(&self, method: Method, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(request.body(Body::from(body.to_string())).unwrap()).await
    }

    async fn form(&self, method: Method, uri: &str, token: Option<&str>, parts: &[Part<'_>]) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(request.body(multipart(parts)).unwrap()).await
    }

    async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.json(
            Method::POST,
            "/auth/login",
            None,
            json!({ "email": email, "password": password }),
        )
        .await
    }
}

fn access_token(body: &Value) -> String {
    body["access_token"].as_str().unwrap().to_string()
}

async fn admin_token(client: &Client, pool: &PgPool) -> String {
    admin::ensure(
        pool,
        AdminConfig {
            name: "Admin".to_string(),
            email: "admin@cravings.test".to_string(),
            password: "admin-password".to_string(),
            phone: "+910000000000".to_string(),
        },
    )
    .await
    .unwrap();

    let (status, body) = client.login("admin@cravings.test", "admin-password").await;
    assert_eq!(status, StatusCode::OK);
    access_token(&body)
}

async fn register_owner(client: &Client, email: &str) -> (StatusCode, Value) {
    client
        .form(
            Method::POST,
            "/auth/register/restaurant",
            None,
            &[
                Part::Text("name", "Asha"),
                Part::Text("email", email),
                Part::Text("password", "owner-password"),
                Part::Text("phone", "+919876543210"),
                Part::File("profile_photo", "me.png"),
                Part::File("id_card", "id.png"),
            ],
        )
        .await
}

fn restaurant_parts<'a>(name: &'a str) -> Vec<Part<'a>> {
    vec![
        Part::Text("name", name),
        Part::Text("restaurant_type", "fine-dining"),
        Part::Text("food_category", "indian"),
        Part::Text("description", "Curries and breads"),
        Part::Text("address", "12 MG Road"),
        Part::Text("city", "Pune"),
        Part::Text("pincode", "411001"),
        Part::Text("opening_time", "09:00"),
        Part::Text("closing_time", "23:00"),
        Part::File("logo", "logo.png"),
        Part::File("images", "one.png"),
        Part::File("images", "two.png"),
    ]
}

/// Registers, approves and sets up an owner. Returns a token that carries the
/// new, still unapproved restaurant along with the restaurant itself.
async fn owner_with_restaurant(
    client: &Client,
    pool: &PgPool,
    email: &str,
    name: &str,
) -> (String, Value) {
    let admin = admin_token(client, pool).await;
    let (_, body) = register_owner(client, email).await;
    let id = body["user"]["id"].as_str().unwrap().to_string();

    client
        .json(Method::PATCH, &format!("/restaurants/{}/approve", id), Some(&admin), json!({}))
        .await;

    let (_, body) = client.login(email, "owner-password").await;
    let (status, body) = client
        .form(
            Method::POST,
            "/restaurants/setup/details",
            Some(&access_token(&body)),
            &restaurant_parts(name),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    (access_token(&body), body["restaurant"].clone())
}

async fn approve_restaurant(client: &Client, pool: &PgPool, restaurant: &Value) {
    let admin = admin_token(client, pool).await;
    let (status, body) = client
        .json(
            Method::PATCH,
            &format!("/restaurants/setup/details/{}/approve", restaurant["id"].as_str().unwrap()),
            Some(&admin),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["restaurant"]["is_approved"], true);
}

#[sqlx::test]
#[ignore]
async fn owner_onboarding(pool: PgPool) {
    let client = Client::new(pool.clone());
    let admin = admin_token(&client, &pool).await;

    let (status, body) = register_owner(&client, "asha@cravings.test").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["is_approved"], false);
    let claims = token::verify(&access_token(&body), SECRET).unwrap();
    assert_eq!(claims.role, Role::RestaurantOwner);
    assert_eq!(claims.restaurant_id, None);
    let owner_id = body["user"]["id"].as_str().unwrap().to_string();

    let (status, body) = register_owner(&client, "asha@cravings.test").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.get("access_token").is_none());

    let (status, body) = client.login("asha@cravings.test", "owner-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Account pending approval");

    let (status, body) = client
        .json(Method::PATCH, &format!("/restaurants/{}/approve", owner_id), Some(&admin), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["is_approved"], true);

    let (status, _) = client.login("asha@cravings.test", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = client.login("asha@cravings.test", "owner-password").await;
    assert_eq!(status, StatusCode::OK);
    let owner = access_token(&body);

    let (status, body) = client
        .form(Method::POST, "/restaurants/setup/details", Some(&owner), &restaurant_parts("Spice Route"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["restaurant"]["is_approved"], false);
    assert_eq!(body["restaurant"]["images"].as_array().unwrap().len(), 2);
    let restaurant_id = body["restaurant"]["id"].as_str().unwrap().to_string();

    let (status, _) = client
        .form(Method::POST, "/restaurants/setup/details", Some(&owner), &restaurant_parts("Second Branch"))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = client.login("asha@cravings.test", "owner-password").await;
    let claims = token::verify(&access_token(&body), SECRET).unwrap();
    assert_eq!(claims.restaurant_id, Some(restaurant_id));
}

#[sqlx::test]
#[ignore]
async fn login_role_must_match_when_given(pool: PgPool) {
    let client = Client::new(pool);

    let (status, _) = client
        .json(
            Method::POST,
            "/auth/register/user",
            None,
            json!({
                "name": "Ravi",
                "email": "ravi@cravings.test",
                "password": "secret-pass",
                "phone": "+919812345678",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = client
        .json(
            Method::POST,
            "/auth/login",
            None,
            json!({ "email": "ravi@cravings.test", "password": "secret-pass", "role": "admin" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = client
        .json(
            Method::POST,
            "/auth/login",
            None,
            json!({ "email": "ravi@cravings.test", "password": "secret-pass", "role": "user" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(token::verify(&access_token(&body), SECRET).unwrap().role, Role::User);
}

#[sqlx::test]
#[ignore]
async fn categories_in_use_cannot_be_deleted(pool: PgPool) {
    let client = Client::new(pool.clone());
    let (owner, restaurant) =
        owner_with_restaurant(&client, &pool, "menu@cravings.test", "Spice Route").await;
    approve_restaurant(&client, &pool, &restaurant).await;

    let (status, body) = client
        .json(Method::POST, "/menu/category", Some(&owner), json!({ "name": "Starters" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let category_id = body["category"]["id"].as_str().unwrap().to_string();

    let (status, _) = client
        .json(Method::POST, "/menu/category", Some(&owner), json!({ "name": "starters" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = client
        .form(
            Method::POST,
            "/menu/item",
            Some(&owner),
            &[
                Part::Text("name", "Paneer Tikka"),
                Part::Text("price", "249.50"),
                Part::Text("category_id", &category_id),
                Part::File("image", "tikka.png"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["item"]["is_vegetarian"], true);
    assert_eq!(body["item"]["is_available"], false);
    let item_id = body["item"]["id"].as_str().unwrap().to_string();
    let first_url = body["item"]["image"]["url"].as_str().unwrap().to_string();

    let (status, body) = client.get(&format!("/menu/item/{}", item_id), &owner).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["image"]["url"], first_url.as_str());

    let (status, body) = client
        .form(
            Method::PUT,
            &format!("/menu/item/{}", item_id),
            Some(&owner),
            &[Part::File("image", "tikka-v2.png")],
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["item"]["image"]["url"], first_url.as_str());
    assert_eq!(client.storage.deleted_urls(), vec![first_url.clone()]);

    let (status, body) = client
        .json(
            Method::PUT,
            &format!("/menu/item/available/{}", item_id),
            Some(&owner),
            json!({ "is_available": true }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"]["is_available"], true);

    let category = format!("/menu/category/{}", category_id);
    let (status, _) = client.json(Method::DELETE, &category, Some(&owner), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = client
        .json(Method::DELETE, &format!("/menu/item/{}", item_id), Some(&owner), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = client.json(Method::DELETE, &category, Some(&owner), json!({})).await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test]
#[ignore]
async fn menus_stay_closed_until_the_restaurant_is_approved(pool: PgPool) {
    let client = Client::new(pool.clone());
    let (owner, restaurant) =
        owner_with_restaurant(&client, &pool, "early@cravings.test", "Early Bird").await;

    let (status, body) = client.get("/menu/categories", &owner).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Your restaurant has not been approved yet");

    let (status, _) = client
        .json(Method::POST, "/menu/category", Some(&owner), json!({ "name": "Starters" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    approve_restaurant(&client, &pool, &restaurant).await;

    let (status, _) = client
        .json(Method::POST, "/menu/category", Some(&owner), json!({ "name": "Starters" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

fn restaurant_update_parts(files: Vec<Part<'static>>) -> Vec<Part<'static>> {
    let mut parts = vec![
        Part::Text("name", "Spice Route Express"),
        Part::Text("restaurant_type", "fine-dining"),
        Part::Text("food_category", "indian"),
        Part::Text("description", "Now with tandoor"),
        Part::Text("address", "14 MG Road"),
        Part::Text("city", "Pune"),
        Part::Text("pincode", "411001"),
        Part::Text("opening_time", "10:00"),
        Part::Text("closing_time", "22:00"),
    ];
    parts.extend(files);
    parts
}

fn urls(media: &Value) -> Vec<String> {
    media
        .as_array()
        .unwrap()
        .iter()
        .map(|media| media["url"].as_str().unwrap().to_string())
        .collect()
}

#[sqlx::test]
#[ignore]
async fn restaurant_details_update(pool: PgPool) {
    let client = Client::new(pool.clone());
    let (owner, restaurant) =
        owner_with_restaurant(&client, &pool, "asha@cravings.test", "Spice Route").await;
    let (stranger, _) =
        owner_with_restaurant(&client, &pool, "vikram@cravings.test", "Tandoor House").await;
    let details = format!("/restaurants/setup/details/{}", restaurant["id"].as_str().unwrap());
    let old_logo = restaurant["logo"]["url"].as_str().unwrap().to_string();
    let old_images = urls(&restaurant["images"]);

    let (status, _) = client
        .form(
            Method::PUT,
            "/restaurants/setup/details/01HNOSUCHRESTAURANT",
            Some(&owner),
            &restaurant_update_parts(vec![]),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = client
        .form(Method::PUT, &details, Some(&stranger), &restaurant_update_parts(vec![]))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "You can only update your own restaurant");

    let (status, body) = client
        .form(Method::PUT, &details, Some(&owner), &restaurant_update_parts(vec![]))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["restaurant"]["name"], "Spice Route Express");
    assert_eq!(body["restaurant"]["logo"]["url"], old_logo.as_str());
    assert_eq!(urls(&body["restaurant"]["images"]), old_images);
    assert!(client.storage.deleted_urls().is_empty());

    let (status, body) = client
        .form(
            Method::PUT,
            &details,
            Some(&owner),
            &restaurant_update_parts(vec![
                Part::File("logo", "logo-v2.png"),
                Part::File("images", "three.png"),
            ]),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let new_logo = body["restaurant"]["logo"]["url"].as_str().unwrap().to_string();
    assert_ne!(new_logo, old_logo);
    assert_eq!(urls(&body["restaurant"]["images"]).len(), 1);

    let mut deleted = client.storage.deleted_urls();
    deleted.sort();
    let mut superseded = old_images.clone();
    superseded.push(old_logo);
    superseded.sort();
    assert_eq!(deleted, superseded);
}

#[sqlx::test]
#[ignore]
async fn failed_image_uploads_leave_the_restaurant_untouched(pool: PgPool) {
    let client = Client::new(pool.clone());
    let (owner, restaurant) =
        owner_with_restaurant(&client, &pool, "asha@cravings.test", "Spice Route").await;
    let id = restaurant["id"].as_str().unwrap();
    let old_logo = restaurant["logo"]["url"].as_str().unwrap().to_string();

    let broken = Client::with_storage(pool.clone(), FakeStorage::failing_uploads_to("/images"));
    let (status, _) = broken
        .form(
            Method::PUT,
            &format!("/restaurants/setup/details/{}", id),
            Some(&owner),
            &restaurant_update_parts(vec![
                Part::File("logo", "logo-v2.png"),
                Part::File("images", "three.png"),
            ]),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = client.get(&format!("/restaurants/{}", id), &owner).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Spice Route");
    assert_eq!(body["logo"]["url"], old_logo.as_str());
    assert!(!broken.storage.deleted_urls().contains(&old_logo));
    assert!(client.storage.deleted_urls().is_empty());
}

#[sqlx::test]
#[ignore]
async fn rejecting_an_account_removes_it_and_its_documents(pool: PgPool) {
    let client = Client::new(pool.clone());
    let admin = admin_token(&client, &pool).await;
    let (status, body) = register_owner(&client, "asha@cravings.test").await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["user"]["id"].as_str().unwrap().to_string();
    let mut documents = vec![
        body["user"]["profile_photo"]["url"].as_str().unwrap().to_string(),
        body["user"]["id_photo"]["url"].as_str().unwrap().to_string(),
    ];
    documents.sort();

    let reject = format!("/restaurants/{}/reject", id);
    let (status, body) = client.json(Method::PATCH, &reject, Some(&admin), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Account rejected");

    let mut deleted = client.storage.deleted_urls();
    deleted.sort();
    assert_eq!(deleted, documents);

    let (status, _) = client.json(Method::PATCH, &reject, Some(&admin), json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = register_owner(&client, "asha@cravings.test").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[sqlx::test]
#[ignore]
async fn rejecting_survives_an_unreachable_image_store(pool: PgPool) {
    let client = Client::with_storage(pool.clone(), FakeStorage::failing_deletes());
    let admin = admin_token(&client, &pool).await;
    let (_, body) = register_owner(&client, "asha@cravings.test").await;
    let id = body["user"]["id"].as_str().unwrap();

    let reject = format!("/restaurants/{}/reject", id);
    let (status, _) = client.json(Method::PATCH, &reject, Some(&admin), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = client.json(Method::PATCH, &reject, Some(&admin), json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[ignore]
async fn failed_document_uploads_do_not_hold_the_email(pool: PgPool) {
    let broken = Client::with_storage(pool.clone(), FakeStorage::failing_uploads_to("/id_card"));
    let (status, body) = register_owner(&broken, "asha@cravings.test").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("access_token").is_none());

    let client = Client::new(pool);
    let (status, body) = register_owner(&client, "asha@cravings.test").await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["user"]["id_photo"]["url"].is_string());
}
