/// VidTube Service Library
///
/// REST backend for a video sharing platform: users, videos, comments, likes,
/// playlists, subscriptions, tweets and a channel dashboard.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers, one module per resource
/// - `db`: PostgreSQL repositories and embedded migrations
/// - `models`: Row and request types
/// - `upload`: multipart collection into temp files
/// - `response`: success, error and paginated envelopes
/// - `middleware`: CORS and the authenticated caller extractor
/// - `error`: `AppError` and its HTTP rendering
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors and `/metrics`
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod security;
pub mod upload;

pub use config::Config;
pub use error::{AppError, Result};

use actix_middleware::JwtKeys;
use config::{AuthConfig, UploadConfig};
use media_store::MediaStore;
use sqlx::PgPool;
use std::sync::Arc;

/// Name used for metrics labels and pool identification
pub const SERVICE_NAME: &str = "vidtube-service";

/// Access token settings handed to the auth handlers
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub keys: Arc<JwtKeys>,
    pub access_token_ttl_secs: i64,
    pub cookie_secure: bool,
}

impl AuthSettings {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            keys: Arc::new(JwtKeys::from_secret(config.access_token_secret.as_bytes())),
            access_token_ttl_secs: config.access_token_ttl_secs,
            cookie_secure: config.cookie_secure,
        }
    }
}

/// Shared, immutable per-process state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub media: Arc<dyn MediaStore>,
    pub uploads: UploadConfig,
    pub auth: AuthSettings,
}
