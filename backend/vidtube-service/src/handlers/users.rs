/// User handlers - registration, login, logout and the caller's profile
use super::{discard_media, optional_text, require_text, store_upload};
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{LoginRequest, NewUser, RegisterInput};
use crate::response::{empty_object, ApiResponse};
use crate::security::{hash_password, verify_password};
use crate::upload::{collect_multipart, FileSpec};
use crate::AppState;
use actix_middleware::ACCESS_TOKEN_COOKIE;
use actix_multipart::Multipart;
use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use media_store::MediaKind;
use serde_json::json;
use validator::Validate;

const REGISTER_FILES: &[FileSpec] = &[FileSpec::single("avatar"), FileSpec::single("coverImage")];

/// Register a user from a multipart form with avatar and optional cover image
pub async fn register(state: web::Data<AppState>, payload: Multipart) -> Result<HttpResponse> {
    let mut form = collect_multipart(payload, REGISTER_FILES, &state.uploads).await?;

    let required = "All fields are required";
    let input = RegisterInput {
        user_name: require_text(form.text("userName"), required)?,
        email: require_text(form.text("email"), required)?,
        full_name: require_text(form.text("fullName"), required)?,
        password: require_text(form.text("password"), required)?,
    };
    input.validate()?;

    let user_name = input.user_name.to_lowercase();
    let email = input.email.to_lowercase();

    if user_repo::user_name_or_email_taken(&state.db, &user_name, &email).await? {
        return Err(AppError::Conflict(
            "User with email or userName already exists".to_string(),
        ));
    }

    let avatar = form
        .take_file("avatar")
        .ok_or_else(|| AppError::BadRequest("Avatar file is required".to_string()))?;
    let cover_image = form.take_file("coverImage");

    let password = input.password;
    let password_hash = web::block(move || hash_password(&password)).await??;

    let avatar = store_upload(&state, &avatar, MediaKind::Image).await?;
    let cover_image_url = match &cover_image {
        Some(file) => match store_upload(&state, file, MediaKind::Image).await {
            Ok(stored) => stored.url,
            Err(e) => {
                tracing::warn!(error = %e, "Cover image upload failed, continuing without it");
                String::new()
            }
        },
        None => String::new(),
    };

    let new_user = NewUser {
        user_name,
        email,
        full_name: input.full_name,
        password_hash,
        avatar: avatar.url,
        cover_image: cover_image_url,
    };

    let user_id = match user_repo::create_user(&state.db, &new_user).await {
        Ok(id) => id,
        Err(e) => {
            discard_media(&state, &new_user.avatar, MediaKind::Image).await;
            discard_media(&state, &new_user.cover_image, MediaKind::Image).await;
            return Err(e.into());
        }
    };

    let user = user_repo::find_user_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Internal("Registered user could not be read back".to_string())
        })?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok(ApiResponse::new(StatusCode::CREATED, user, "User registered successfully").respond())
}

/// Exchange email or userName plus password for an access token
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    let email = optional_text(req.email.as_deref()).map(|e| e.to_lowercase());
    let user_name = optional_text(req.user_name.as_deref()).map(|u| u.to_lowercase());
    if email.is_none() && user_name.is_none() {
        return Err(AppError::BadRequest(
            "userName or email is required".to_string(),
        ));
    }
    let password = require_text(req.password.as_deref(), "Password is required")?;

    let invalid = || AppError::Unauthorized("Invalid user credentials".to_string());

    let credentials =
        user_repo::find_credentials(&state.db, email.as_deref(), user_name.as_deref())
            .await?
            .ok_or_else(invalid)?;

    let hash = credentials.password_hash.clone();
    let matches = web::block(move || verify_password(&password, &hash)).await??;
    if !matches {
        tracing::debug!(user_id = %credentials.id, "Password mismatch");
        return Err(invalid());
    }

    let user = user_repo::find_user_by_id(&state.db, credentials.id)
        .await?
        .ok_or_else(invalid)?;

    let ttl = state.auth.access_token_ttl_secs;
    let access_token = state
        .auth
        .keys
        .issue(user.id, &user.user_name, ttl)
        .map_err(|e| AppError::Internal(format!("Failed to issue access token: {}", e)))?;

    let cookie = Cookie::build(ACCESS_TOKEN_COOKIE, access_token.clone())
        .path("/")
        .http_only(true)
        .secure(state.auth.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(ttl))
        .finish();

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(HttpResponse::Ok().cookie(cookie).json(ApiResponse::new(
        StatusCode::OK,
        json!({ "user": user, "accessToken": access_token }),
        "User logged in successfully",
    )))
}

/// Clear the access token cookie
pub async fn logout(state: web::Data<AppState>, user: AuthUser) -> Result<HttpResponse> {
    let mut cookie = Cookie::build(ACCESS_TOKEN_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(state.auth.cookie_secure)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();

    tracing::info!(user_id = %user.id(), "User logged out");
    Ok(HttpResponse::Ok().cookie(cookie).json(ApiResponse::new(
        StatusCode::OK,
        empty_object(),
        "User logged out successfully",
    )))
}

pub async fn current_user(state: web::Data<AppState>, user: AuthUser) -> Result<HttpResponse> {
    let user = user_repo::find_user_by_id(&state.db, user.id())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(ApiResponse::new(StatusCode::OK, user, "Current user fetched successfully").respond())
}
