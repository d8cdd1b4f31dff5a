/// Playlist handlers
use super::{ensure_owner, optional_text, parse_id, require_text};
use crate::db::{playlist_repo, video_repo};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{Playlist, PlaylistRequest};
use crate::response::{empty_object, ApiResponse};
use crate::AppState;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use uuid::Uuid;

pub async fn create_playlist(
    state: web::Data<AppState>,
    user: AuthUser,
    req: web::Json<PlaylistRequest>,
) -> Result<HttpResponse> {
    let required = "Name and description are required";
    let name = require_text(req.name.as_deref(), required)?;
    let description = require_text(req.description.as_deref(), required)?;

    let playlist = playlist_repo::create_playlist(&state.db, user.id(), &name, &description).await?;

    tracing::info!(playlist_id = %playlist.id, "Playlist created");
    Ok(ApiResponse::new(StatusCode::CREATED, playlist, "Playlist created successfully").respond())
}

pub async fn get_playlist(
    state: web::Data<AppState>,
    _user: AuthUser,
    playlist_id: web::Path<String>,
) -> Result<HttpResponse> {
    let playlist_id = parse_id(&playlist_id, "playlist")?;
    let playlist = find_playlist(&state, playlist_id).await?;

    Ok(ApiResponse::new(StatusCode::OK, playlist, "Playlist fetched successfully").respond())
}

/// Rename and/or re-describe a playlist
pub async fn update_playlist(
    state: web::Data<AppState>,
    user: AuthUser,
    playlist_id: web::Path<String>,
    req: web::Json<PlaylistRequest>,
) -> Result<HttpResponse> {
    let playlist_id = parse_id(&playlist_id, "playlist")?;
    let name = optional_text(req.name.as_deref());
    let description = optional_text(req.description.as_deref());
    if name.is_none() && description.is_none() {
        return Err(AppError::BadRequest(
            "Name or description is required".to_string(),
        ));
    }

    let existing = find_playlist(&state, playlist_id).await?;
    ensure_owner(existing.owner, user.id(), "playlist")?;

    let playlist = playlist_repo::update_playlist(
        &state.db,
        playlist_id,
        name.as_deref(),
        description.as_deref(),
    )
    .await?
    .ok_or_else(playlist_not_found)?;

    Ok(ApiResponse::new(StatusCode::OK, playlist, "Playlist updated successfully").respond())
}

pub async fn delete_playlist(
    state: web::Data<AppState>,
    user: AuthUser,
    playlist_id: web::Path<String>,
) -> Result<HttpResponse> {
    let playlist_id = parse_id(&playlist_id, "playlist")?;
    let existing = find_playlist(&state, playlist_id).await?;
    ensure_owner(existing.owner, user.id(), "playlist")?;

    let deleted = playlist_repo::delete_playlist(&state.db, playlist_id)
        .await?
        .ok_or_else(playlist_not_found)?;

    tracing::info!(playlist_id = %playlist_id, "Playlist deleted");
    Ok(ApiResponse::new(StatusCode::OK, deleted, "Playlist deleted successfully").respond())
}

/// Append a video. A duplicate is answered with a 400 envelope and leaves
/// the playlist untouched.
pub async fn add_video_to_playlist(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (video_id, playlist_id) = parse_pair(&path)?;
    let playlist = owned_playlist_for_video(&state, user, video_id, playlist_id).await?;

    if playlist.videos.contains(&video_id) {
        return Ok(already_present());
    }

    match playlist_repo::add_video(&state.db, playlist_id, video_id).await? {
        Some(updated) => Ok(ApiResponse::new(
            StatusCode::OK,
            updated,
            "Video added to playlist successfully",
        )
        .respond()),
        // Lost a race with a concurrent add of the same video
        None => Ok(already_present()),
    }
}

pub async fn remove_video_from_playlist(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (video_id, playlist_id) = parse_pair(&path)?;
    let playlist = owned_playlist_for_video(&state, user, video_id, playlist_id).await?;

    if !playlist.videos.contains(&video_id) {
        return Ok(not_in_playlist());
    }

    match playlist_repo::remove_video(&state.db, playlist_id, video_id).await? {
        Some(updated) => Ok(ApiResponse::new(
            StatusCode::OK,
            updated,
            "Video removed from playlist successfully",
        )
        .respond()),
        None => Ok(not_in_playlist()),
    }
}

pub async fn get_user_playlists(
    state: web::Data<AppState>,
    _user: AuthUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse> {
    let user_id = parse_id(&user_id, "user")?;
    let playlists = playlist_repo::list_playlists_by_owner(&state.db, user_id).await?;
    if playlists.is_empty() {
        return Err(AppError::NotFound("No playlists found".to_string()));
    }

    Ok(ApiResponse::new(StatusCode::OK, playlists, "Playlists fetched successfully").respond())
}

fn parse_pair(path: &(String, String)) -> Result<(Uuid, Uuid)> {
    Ok((parse_id(&path.0, "video")?, parse_id(&path.1, "playlist")?))
}

/// Video must exist, playlist must exist and belong to the caller
async fn owned_playlist_for_video(
    state: &AppState,
    user: AuthUser,
    video_id: Uuid,
    playlist_id: Uuid,
) -> Result<Playlist> {
    if !video_repo::video_exists(&state.db, video_id).await? {
        return Err(AppError::NotFound("Video not found".to_string()));
    }
    let playlist = find_playlist(state, playlist_id).await?;
    ensure_owner(playlist.owner, user.id(), "playlist")?;
    Ok(playlist)
}

async fn find_playlist(state: &AppState, playlist_id: Uuid) -> Result<Playlist> {
    playlist_repo::find_playlist_by_id(&state.db, playlist_id)
        .await?
        .ok_or_else(playlist_not_found)
}

fn playlist_not_found() -> AppError {
    AppError::NotFound("Playlist not found".to_string())
}

fn already_present() -> HttpResponse {
    ApiResponse::new(
        StatusCode::BAD_REQUEST,
        empty_object(),
        "Video already present in playlist",
    )
    .respond()
}

fn not_in_playlist() -> HttpResponse {
    ApiResponse::new(
        StatusCode::BAD_REQUEST,
        empty_object(),
        "Video not in the playlist",
    )
    .respond()
}
