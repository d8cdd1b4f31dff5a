//! # Actix Middleware Library
//!
//! Shared middleware for the VidTube Actix services
//!
//! ## Modules
//! - `jwt_auth`: access token issuing and decoding
//! - `correlation_id`: `x-correlation-id` propagation

pub mod correlation_id;
pub mod jwt_auth;

pub use correlation_id::{CorrelationId, CorrelationIdMiddleware, CORRELATION_ID_HEADER};
pub use jwt_auth::{
    authenticated_user, AuthFailure, Claims, JwtAuthMiddleware, JwtKeys, TokenRejection, UserId,
    ACCESS_TOKEN_COOKIE,
};
