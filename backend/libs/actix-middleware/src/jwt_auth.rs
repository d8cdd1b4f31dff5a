use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpRequest,
};
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use uuid::Uuid;

/// Cookie carrying the access token for browser clients
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// User ID extracted from a valid access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub Uuid);

/// A token was presented but could not be accepted
#[derive(Debug, Clone)]
pub struct TokenRejection(pub String);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub user_name: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 signing and verification keys
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys").field("secret", &"[REDACTED]").finish()
    }
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue an access token valid for `ttl_secs`
    pub fn issue(
        &self,
        user_id: Uuid,
        user_name: &str,
        ttl_secs: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            user_name: user_name.to_string(),
            iat: now,
            exp: now + ttl_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding, &self.validation).map(|data| data.claims)
    }
}

/// Why a request has no authenticated user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// Neither an Authorization header nor an access token cookie
    MissingToken,
    /// A token was presented but failed verification
    InvalidToken(String),
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFailure::MissingToken => write!(f, "Unauthorized request"),
            AuthFailure::InvalidToken(reason) => write!(f, "Invalid access token: {}", reason),
        }
    }
}

/// Read the outcome [`JwtAuthMiddleware`] stored on the request
pub fn authenticated_user(req: &HttpRequest) -> Result<UserId, AuthFailure> {
    let extensions = req.extensions();
    if let Some(user_id) = extensions.get::<UserId>() {
        return Ok(*user_id);
    }
    match extensions.get::<TokenRejection>() {
        Some(rejection) => Err(AuthFailure::InvalidToken(rejection.0.clone())),
        None => Err(AuthFailure::MissingToken),
    }
}

/// JWT decoding middleware
///
/// Never rejects a request by itself. A valid token puts a [`UserId`] in the
/// request extensions and an invalid one a [`TokenRejection`]; routes that
/// need a caller check for them through [`authenticated_user`].
pub struct JwtAuthMiddleware {
    keys: Arc<JwtKeys>,
}

impl JwtAuthMiddleware {
    pub fn new(keys: Arc<JwtKeys>) -> Self {
        Self { keys }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
            keys: self.keys.clone(),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
    keys: Arc<JwtKeys>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let keys = self.keys.clone();

        Box::pin(async move {
            if let Some(token) = extract_token(&req) {
                match verify_user(&keys, &token) {
                    Ok(user_id) => {
                        req.extensions_mut().insert(user_id);
                    }
                    Err(reason) => {
                        tracing::debug!(reason = %reason, "Access token rejected");
                        req.extensions_mut().insert(TokenRejection(reason));
                    }
                }
            }

            service.call(req).await
        })
    }
}

/// Bearer header first, then the cookie
fn extract_token(req: &ServiceRequest) -> Option<String> {
    let from_header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());

    from_header
        .or_else(|| req.cookie(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_string()))
        .filter(|t| !t.is_empty())
}

fn verify_user(keys: &JwtKeys, token: &str) -> Result<UserId, String> {
    let claims = keys.verify(token).map_err(|e| e.to_string())?;
    Uuid::parse_str(&claims.sub)
        .map(UserId)
        .map_err(|_| "malformed subject".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify() {
        let keys = JwtKeys::from_secret(b"test-secret");
        let user_id = Uuid::new_v4();

        let token = keys.issue(user_id, "alice", 3600).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.user_name, "alice");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtKeys::from_secret(b"secret-a")
            .issue(Uuid::new_v4(), "alice", 3600)
            .unwrap();
        assert!(JwtKeys::from_secret(b"secret-b").verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let keys = JwtKeys::from_secret(b"test-secret");
        let token = keys.issue(Uuid::new_v4(), "alice", -3600).unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_malformed_subject() {
        let keys = JwtKeys::from_secret(b"test-secret");
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            user_name: "alice".to_string(),
            iat: chrono::Utc::now().timestamp(),
            exp: chrono::Utc::now().timestamp() + 60,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).unwrap();
        assert_eq!(verify_user(&keys, &token), Err("malformed subject".to_string()));
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", JwtKeys::from_secret(b"super-secret"));
        assert!(!rendered.contains("super-secret"));
    }
}
