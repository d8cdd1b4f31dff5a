/// Like handlers
///
/// A toggle either removes the caller's existing like (200, `{}`) or creates
/// one (201). Concurrent toggles are settled by the partial unique indexes.
use super::parse_id;
use crate::db::like_repo;
use crate::error::{AppError, Result};
use crate::metrics;
use crate::middleware::AuthUser;
use crate::models::{LikeTarget, Toggle};
use crate::response::{empty_object, ApiResponse};
use crate::AppState;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

pub async fn toggle_video_like(
    state: web::Data<AppState>,
    user: AuthUser,
    video_id: web::Path<String>,
) -> Result<HttpResponse> {
    let target = LikeTarget::Video(parse_id(&video_id, "video")?);
    toggle(&state, user, target).await
}

pub async fn toggle_comment_like(
    state: web::Data<AppState>,
    user: AuthUser,
    comment_id: web::Path<String>,
) -> Result<HttpResponse> {
    let target = LikeTarget::Comment(parse_id(&comment_id, "comment")?);
    toggle(&state, user, target).await
}

pub async fn toggle_tweet_like(
    state: web::Data<AppState>,
    user: AuthUser,
    tweet_id: web::Path<String>,
) -> Result<HttpResponse> {
    let target = LikeTarget::Tweet(parse_id(&tweet_id, "tweet")?);
    toggle(&state, user, target).await
}

async fn toggle(state: &AppState, user: AuthUser, target: LikeTarget) -> Result<HttpResponse> {
    if !like_repo::target_exists(&state.db, target).await? {
        return Err(AppError::NotFound(format!("{} not found", target.label())));
    }

    let entity = target.label().to_lowercase();
    match like_repo::toggle_like(&state.db, target, user.id()).await? {
        Toggle::Added(like) => {
            metrics::record_toggle(&format!("{}_like", entity), true);
            tracing::debug!(like_id = %like.id, target_id = %target.id(), "Like added");
            Ok(ApiResponse::new(
                StatusCode::CREATED,
                like,
                format!("{} liked successfully", target.label()),
            )
            .respond())
        }
        Toggle::Removed => {
            metrics::record_toggle(&format!("{}_like", entity), false);
            tracing::debug!(target_id = %target.id(), "Like removed");
            Ok(ApiResponse::new(
                StatusCode::OK,
                empty_object(),
                format!("{} unliked successfully", target.label()),
            )
            .respond())
        }
    }
}

/// Videos the caller liked, most recent like first
pub async fn get_liked_videos(state: web::Data<AppState>, user: AuthUser) -> Result<HttpResponse> {
    let videos = like_repo::liked_videos(&state.db, user.id()).await?;
    if videos.is_empty() {
        return Err(AppError::NotFound("No liked videos found".to_string()));
    }

    Ok(ApiResponse::new(StatusCode::OK, videos, "Liked videos fetched successfully").respond())
}
