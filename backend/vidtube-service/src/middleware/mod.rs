/// HTTP middleware glue for VidTube Service
///
/// Token decoding itself lives in the `actix-middleware` library; this module
/// turns its outcome into an extractor and builds the CORS policy.
use crate::config::CorsConfig;
use crate::error::AppError;
use actix_cors::Cors;
use actix_middleware::{authenticated_user, CORRELATION_ID_HEADER};
use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

/// The caller of a protected route.
///
/// Extraction fails with 401 when no valid access token was presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0
    }
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            authenticated_user(req)
                .map(|user| AuthUser(user.0))
                .map_err(|failure| AppError::Unauthorized(failure.to_string())),
        )
    }
}

/// CORS policy from configuration. Credentials are allowed so the access
/// token cookie works cross-origin.
pub fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static(CORRELATION_ID_HEADER),
        ])
        .expose_headers(vec![header::HeaderName::from_static(CORRELATION_ID_HEADER)])
        .supports_credentials()
        .max_age(3600);

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
