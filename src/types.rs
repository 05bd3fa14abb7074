pub use crate::utils::database;
use crate::{
    modules::storage::{cloudinary::Cloudinary, Storage},
    utils::config,
};
use async_trait::async_trait;
use chrono::Duration;
use std::env;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct AuthContext {
    pub jwt_secret: String,
    pub jwt_ttl: Duration,
}

#[derive(Clone)]
pub struct StorageContext {
    pub api_key: String,
    pub api_secret: String,
    pub upload_endpoint: String,
    pub delete_endpoint: String,
    pub upload_preset: String,
}

/// Destination folders inside the image store.
#[derive(Clone)]
pub struct FoldersContext {
    pub profile_photos: String,
    pub id_cards: String,
    pub restaurants: String,
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub auth: AuthContext,
    pub db_conn: database::DatabaseConnection,
    pub storage: Arc<dyn Storage>,
    pub folders: FoldersContext,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expires_in: String,
}

#[derive(Clone)]
pub struct StorageConfig {
    pub api_key: String,
    pub api_secret: String,
    pub upload_endpoint: String,
    pub delete_endpoint: String,
    pub upload_preset: String,
}

#[derive(Clone)]
pub struct FoldersConfig {
    pub profile_photos: String,
    pub id_cards: String,
    pub restaurants: String,
}

#[derive(Clone)]
pub struct AdminConfig {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

#[derive(Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub folders: FoldersConfig,
    pub admin: Option<AdminConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL not set");
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u32>()
            .expect("Invalid PORT number");
        let url = env::var("URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET not set");
        let jwt_expires_in = env::var("JWT_EXPIRES_IN").unwrap_or_else(|_| "1d".to_string());
        let storage_api_key = env::var("CLOUDINARY_API_KEY").expect("CLOUDINARY_API_KEY not set");
        let storage_api_secret =
            env::var("CLOUDINARY_API_SECRET").expect("CLOUDINARY_API_SECRET not set");
        let storage_upload_endpoint =
            env::var("CLOUDINARY_UPLOAD_ENDPOINT").expect("CLOUDINARY_UPLOAD_ENDPOINT not set");
        let storage_delete_endpoint =
            env::var("CLOUDINARY_DELETE_ENDPOINT").expect("CLOUDINARY_DELETE_ENDPOINT not set");
        let storage_upload_preset =
            env::var("CLOUDINARY_UPLOAD_PRESET").expect("CLOUDINARY_UPLOAD_PRESET not set");
        let profile_photos_folder = env::var("CRAVINGS_PROFILE_PIC_FOLDER")
            .unwrap_or_else(|_| "cravings/profile_photos".to_string());
        let id_cards_folder =
            env::var("CRAVINGS_IDCARD_FOLDER").unwrap_or_else(|_| "cravings/id_cards".to_string());
        let restaurants_folder = env::var("CRAVINGS_RESTAURANT_FOLDER")
            .unwrap_or_else(|_| "cravings/restaurants".to_string());

        let admin = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(AdminConfig {
                name: env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string()),
                phone: env::var("ADMIN_PHONE").unwrap_or_default(),
                email,
                password,
            }),
            _ => None,
        };

        Self {
            database: DatabaseConfig { url: database_url },
            app: AppConfig {
                host,
                environment: AppEnvironment::from(environment),
                port,
                url,
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_expires_in,
            },
            storage: StorageConfig {
                api_key: storage_api_key,
                api_secret: storage_api_secret,
                upload_endpoint: storage_upload_endpoint,
                delete_endpoint: storage_delete_endpoint,
                upload_preset: storage_upload_preset,
            },
            folders: FoldersConfig {
                profile_photos: profile_photos_folder,
                id_cards: id_cards_folder,
                restaurants: restaurants_folder,
            },
            admin,
        }
    }
}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Context;
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Context {
        let db_conn = database::connect(self.database.url.as_str()).await;
        database::migrate(db_conn.clone()).await;

        let jwt_ttl = config::parse_duration(&self.auth.jwt_expires_in)
            .expect("Invalid JWT_EXPIRES_IN value");

        let storage = StorageContext {
            api_key: self.storage.api_key,
            api_secret: self.storage.api_secret,
            upload_endpoint: self.storage.upload_endpoint,
            delete_endpoint: self.storage.delete_endpoint,
            upload_preset: self.storage.upload_preset,
        };

        Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
                url: self.app.url,
            },
            auth: AuthContext {
                jwt_secret: self.auth.jwt_secret,
                jwt_ttl,
            },
            db_conn,
            storage: Arc::new(Cloudinary::new(storage)),
            folders: FoldersContext {
                profile_photos: self.folders.profile_photos,
                id_cards: self.folders.id_cards,
                restaurants: self.folders.restaurants,
            },
        }
    }
}
