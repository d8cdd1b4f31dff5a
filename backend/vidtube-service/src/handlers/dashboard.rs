/// Channel dashboard for the caller
use crate::db::dashboard_repo;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::pagination::{PageQuery, PageRequest};
use crate::response::{ApiResponse, Paginated};
use crate::AppState;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

pub async fn get_channel_stats(state: web::Data<AppState>, user: AuthUser) -> Result<HttpResponse> {
    let stats = dashboard_repo::channel_stats(&state.db, user.id()).await?;

    Ok(ApiResponse::new(StatusCode::OK, stats, "Channel stats fetched successfully").respond())
}

pub async fn get_channel_videos(
    state: web::Data<AppState>,
    user: AuthUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let page = PageRequest::try_from(&*query)?;
    let (videos, total) = dashboard_repo::channel_videos(&state.db, user.id(), page).await?;
    if videos.is_empty() {
        return Err(AppError::NotFound("No videos found for this channel".to_string()));
    }

    Ok(ApiResponse::new(
        StatusCode::OK,
        Paginated::videos(videos, total, page),
        "Channel videos fetched successfully",
    )
    .respond())
}
