/// Comment handlers - HTTP endpoints for comment operations
use super::{ensure_owner, parse_id, require_text};
use crate::db::{comment_repo, video_repo};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::ContentRequest;
use crate::pagination::{PageQuery, PageRequest};
use crate::response::{ApiResponse, Paginated};
use crate::AppState;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

/// Get comments for a video, newest first
pub async fn get_video_comments(
    state: web::Data<AppState>,
    _user: AuthUser,
    video_id: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&video_id, "video")?;
    let page = PageRequest::try_from(&*query)?;

    let (comments, total) = comment_repo::list_comments_for_video(&state.db, video_id, page).await?;
    if comments.is_empty() {
        return Err(AppError::NotFound("No comments found".to_string()));
    }

    Ok(ApiResponse::new(
        StatusCode::OK,
        Paginated::comments(comments, total, page),
        "Comments fetched successfully",
    )
    .respond())
}

/// Create a new comment
pub async fn add_comment(
    state: web::Data<AppState>,
    user: AuthUser,
    video_id: web::Path<String>,
    req: web::Json<ContentRequest>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&video_id, "video")?;
    let content = require_text(req.content.as_deref(), "Content is required")?;

    if !video_repo::video_exists(&state.db, video_id).await? {
        return Err(AppError::NotFound("Video not found".to_string()));
    }

    let comment = comment_repo::create_comment(&state.db, video_id, user.id(), &content).await?;

    tracing::info!(comment_id = %comment.id, video_id = %video_id, "Comment added");
    Ok(ApiResponse::new(StatusCode::CREATED, comment, "Comment added successfully").respond())
}

/// Update a comment
pub async fn update_comment(
    state: web::Data<AppState>,
    user: AuthUser,
    comment_id: web::Path<String>,
    req: web::Json<ContentRequest>,
) -> Result<HttpResponse> {
    let comment_id = parse_id(&comment_id, "comment")?;
    let content = require_text(req.content.as_deref(), "Content is required")?;

    let existing = comment_repo::find_comment_by_id(&state.db, comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;
    ensure_owner(existing.owner, user.id(), "comment")?;

    let comment = comment_repo::update_comment(&state.db, comment_id, &content)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

    Ok(ApiResponse::new(StatusCode::OK, comment, "Comment updated successfully").respond())
}

/// Delete a comment
pub async fn delete_comment(
    state: web::Data<AppState>,
    user: AuthUser,
    comment_id: web::Path<String>,
) -> Result<HttpResponse> {
    let comment_id = parse_id(&comment_id, "comment")?;

    let existing = comment_repo::find_comment_by_id(&state.db, comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;
    ensure_owner(existing.owner, user.id(), "comment")?;

    let deleted = comment_repo::delete_comment(&state.db, comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

    tracing::info!(comment_id = %comment_id, "Comment deleted");
    Ok(ApiResponse::new(StatusCode::OK, deleted, "Comment deleted successfully").respond())
}
