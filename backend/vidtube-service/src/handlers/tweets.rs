/// Tweet handlers - short text posts on a user's channel
use super::{ensure_owner, parse_id, require_text};
use crate::db::tweet_repo;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{ContentRequest, Tweet};
use crate::response::ApiResponse;
use crate::AppState;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use uuid::Uuid;

pub async fn create_tweet(
    state: web::Data<AppState>,
    user: AuthUser,
    req: web::Json<ContentRequest>,
) -> Result<HttpResponse> {
    let content = require_text(req.content.as_deref(), "Content is required")?;
    let tweet = tweet_repo::create_tweet(&state.db, user.id(), &content).await?;

    tracing::info!(tweet_id = %tweet.id, "Tweet created");
    Ok(ApiResponse::new(StatusCode::CREATED, tweet, "Tweet created successfully").respond())
}

pub async fn get_user_tweets(
    state: web::Data<AppState>,
    _user: AuthUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse> {
    let user_id = parse_id(&user_id, "user")?;
    let tweets = tweet_repo::list_tweets_by_owner(&state.db, user_id).await?;
    if tweets.is_empty() {
        return Err(AppError::NotFound("No tweets found".to_string()));
    }

    Ok(ApiResponse::new(StatusCode::OK, tweets, "Tweets fetched successfully").respond())
}

pub async fn update_tweet(
    state: web::Data<AppState>,
    user: AuthUser,
    tweet_id: web::Path<String>,
    req: web::Json<ContentRequest>,
) -> Result<HttpResponse> {
    let tweet_id = parse_id(&tweet_id, "tweet")?;
    let content = require_text(req.content.as_deref(), "Content is required")?;

    let existing = find_tweet(&state, tweet_id).await?;
    ensure_owner(existing.owner, user.id(), "tweet")?;

    let tweet = tweet_repo::update_tweet(&state.db, tweet_id, &content)
        .await?
        .ok_or_else(|| AppError::NotFound("Tweet not found".to_string()))?;

    Ok(ApiResponse::new(StatusCode::OK, tweet, "Tweet updated successfully").respond())
}

pub async fn delete_tweet(
    state: web::Data<AppState>,
    user: AuthUser,
    tweet_id: web::Path<String>,
) -> Result<HttpResponse> {
    let tweet_id = parse_id(&tweet_id, "tweet")?;
    let existing = find_tweet(&state, tweet_id).await?;
    ensure_owner(existing.owner, user.id(), "tweet")?;

    let deleted = tweet_repo::delete_tweet(&state.db, tweet_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tweet not found".to_string()))?;

    tracing::info!(tweet_id = %tweet_id, "Tweet deleted");
    Ok(ApiResponse::new(StatusCode::OK, deleted, "Tweet deleted successfully").respond())
}

async fn find_tweet(state: &AppState, tweet_id: Uuid) -> Result<Tweet> {
    tweet_repo::find_tweet_by_id(&state.db, tweet_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tweet not found".to_string()))
}
