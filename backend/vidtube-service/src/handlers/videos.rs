/// Video handlers - listing, publishing and owner-only mutations
use super::{discard_media, ensure_owner, optional_text, parse_id, require_text, store_upload};
use crate::db::video_repo;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{NewVideo, Video, VideoFilter, VideoListQuery, VideoSortField, VideoUpdate, VideoWithOwner};
use crate::pagination::{PageRequest, SortDirection};
use crate::response::{ApiResponse, Paginated};
use crate::upload::{collect_multipart, FileSpec};
use crate::AppState;
use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use media_store::MediaKind;
use uuid::Uuid;

const PUBLISH_FILES: &[FileSpec] = &[FileSpec::single("videoFile"), FileSpec::single("thumbnail")];
const UPDATE_FILES: &[FileSpec] = &[FileSpec::single("thumbnail")];

impl TryFrom<&VideoListQuery> for VideoFilter {
    type Error = AppError;

    fn try_from(query: &VideoListQuery) -> std::result::Result<Self, Self::Error> {
        let owner = match optional_text(query.user_id.as_deref()) {
            Some(raw) => Some(parse_id(&raw, "user")?),
            None => None,
        };

        Ok(VideoFilter {
            search: optional_text(query.query.as_deref()),
            owner,
            sort: VideoSortField::parse(query.sort_by.as_deref())?,
            direction: SortDirection::parse(query.sort_type.as_deref())?,
            page: PageRequest::parse(query.page.as_deref(), query.limit.as_deref())?,
        })
    }
}

/// Paginated, searchable, sortable listing with owner summaries
pub async fn list_videos(
    state: web::Data<AppState>,
    _user: AuthUser,
    query: web::Query<VideoListQuery>,
) -> Result<HttpResponse> {
    let filter = VideoFilter::try_from(&*query)?;
    let (videos, total) = video_repo::list_videos(&state.db, &filter).await?;

    if filter.owner.is_some() && videos.is_empty() {
        return Ok(ApiResponse::new(
            StatusCode::OK,
            Vec::<VideoWithOwner>::new(),
            "No videos found",
        )
        .respond());
    }

    Ok(ApiResponse::new(
        StatusCode::OK,
        Paginated::videos(videos, total, filter.page),
        "Videos fetched successfully",
    )
    .respond())
}

/// Upload a video and its thumbnail, then persist the row
pub async fn publish_video(
    state: web::Data<AppState>,
    user: AuthUser,
    payload: Multipart,
) -> Result<HttpResponse> {
    let mut form = collect_multipart(payload, PUBLISH_FILES, &state.uploads).await?;

    let required = "Title and description are required";
    let title = require_text(form.text("title"), required)?;
    let description = require_text(form.text("description"), required)?;

    let video_file = form
        .take_file("videoFile")
        .ok_or_else(|| AppError::BadRequest("Video file is required".to_string()))?;
    let thumbnail = form
        .take_file("thumbnail")
        .ok_or_else(|| AppError::BadRequest("Thumbnail is required".to_string()))?;

    if video_repo::title_or_description_taken(&state.db, &title, &description).await? {
        return Err(AppError::Conflict(
            "Video with this title or description already exists".to_string(),
        ));
    }

    let stored_video = store_upload(&state, &video_file, MediaKind::Video).await?;
    let stored_thumbnail = match store_upload(&state, &thumbnail, MediaKind::Image).await {
        Ok(stored) => stored,
        Err(e) => {
            discard_media(&state, &stored_video.url, MediaKind::Video).await;
            return Err(e);
        }
    };

    let new_video = NewVideo {
        owner: user.id(),
        title,
        description,
        video_file: stored_video.url,
        thumbnail: stored_thumbnail.url,
        duration: stored_video.duration.unwrap_or(0.0),
    };

    let video = match video_repo::create_video(&state.db, &new_video).await {
        Ok(video) => video,
        Err(e) => {
            discard_media(&state, &new_video.video_file, MediaKind::Video).await;
            discard_media(&state, &new_video.thumbnail, MediaKind::Image).await;
            return Err(e.into());
        }
    };

    tracing::info!(video_id = %video.id, owner_id = %video.owner, "Video published");
    Ok(ApiResponse::new(StatusCode::CREATED, video, "Video published successfully").respond())
}

pub async fn get_video(
    state: web::Data<AppState>,
    _user: AuthUser,
    video_id: web::Path<String>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&video_id, "video")?;
    let video = find_video(&state, video_id).await?;

    Ok(ApiResponse::new(StatusCode::OK, video, "Video fetched successfully").respond())
}

/// Partial update of title, description and thumbnail
pub async fn update_video(
    state: web::Data<AppState>,
    user: AuthUser,
    video_id: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let video_id = parse_id(&video_id, "video")?;
    let mut form = collect_multipart(payload, UPDATE_FILES, &state.uploads).await?;

    let title = form.text("title").map(str::to_string);
    let description = form.text("description").map(str::to_string);
    let thumbnail = form.take_file("thumbnail");
    if title.is_none() && description.is_none() && thumbnail.is_none() {
        return Err(AppError::BadRequest("Nothing to update".to_string()));
    }

    let existing = find_video(&state, video_id).await?;
    ensure_owner(existing.owner, user.id(), "video")?;

    let new_thumbnail = match &thumbnail {
        Some(file) => Some(store_upload(&state, file, MediaKind::Image).await?.url),
        None => None,
    };

    let update = VideoUpdate {
        title,
        description,
        thumbnail: new_thumbnail.clone(),
    };

    let updated = match video_repo::update_video(&state.db, video_id, &update).await {
        Ok(Some(video)) => video,
        Ok(None) => {
            if let Some(url) = &new_thumbnail {
                discard_media(&state, url, MediaKind::Image).await;
            }
            return Err(AppError::NotFound("Video not found".to_string()));
        }
        Err(e) => {
            if let Some(url) = &new_thumbnail {
                discard_media(&state, url, MediaKind::Image).await;
            }
            return Err(e.into());
        }
    };

    if new_thumbnail.is_some() && existing.thumbnail != updated.thumbnail {
        discard_media(&state, &existing.thumbnail, MediaKind::Image).await;
    }

    tracing::info!(video_id = %video_id, "Video updated");
    Ok(ApiResponse::new(StatusCode::OK, updated, "Video updated successfully").respond())
}

/// Remove the row, then its stored media
pub async fn delete_video(
    state: web::Data<AppState>,
    user: AuthUser,
    video_id: web::Path<String>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&video_id, "video")?;
    let existing = find_video(&state, video_id).await?;
    ensure_owner(existing.owner, user.id(), "video")?;

    let deleted = video_repo::delete_video(&state.db, video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    discard_media(&state, &deleted.video_file, MediaKind::Video).await;
    discard_media(&state, &deleted.thumbnail, MediaKind::Image).await;

    tracing::info!(video_id = %video_id, "Video deleted");
    Ok(ApiResponse::new(StatusCode::OK, deleted, "Video deleted successfully").respond())
}

pub async fn toggle_publish_status(
    state: web::Data<AppState>,
    user: AuthUser,
    video_id: web::Path<String>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&video_id, "video")?;
    let existing = find_video(&state, video_id).await?;
    ensure_owner(existing.owner, user.id(), "video")?;

    let video = video_repo::toggle_publish(&state.db, video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    tracing::info!(video_id = %video_id, is_published = video.is_published, "Publish status toggled");
    Ok(ApiResponse::new(StatusCode::OK, video, "Publish status toggled successfully").respond())
}

pub async fn increment_views(
    state: web::Data<AppState>,
    _user: AuthUser,
    video_id: web::Path<String>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&video_id, "video")?;
    let video = video_repo::increment_views(&state.db, video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    Ok(ApiResponse::new(StatusCode::OK, video, "Video views incremented").respond())
}

async fn find_video(state: &AppState, video_id: Uuid) -> Result<Video> {
    video_repo::find_video_by_id(&state.db, video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_query_defaults() {
        let filter = VideoFilter::try_from(&VideoListQuery::default()).unwrap();
        assert_eq!(filter.page, PageRequest::default());
        assert_eq!(filter.sort, VideoSortField::CreatedAt);
        assert_eq!(filter.direction, SortDirection::Asc);
        assert!(filter.owner.is_none());
        assert!(filter.search.is_none());
    }

    #[test]
    fn test_filter_from_query_values() {
        let owner = Uuid::new_v4();
        let query = VideoListQuery {
            page: Some("2".into()),
            limit: Some("5".into()),
            query: Some("  rust ".into()),
            sort_by: Some("views".into()),
            sort_type: Some("-1".into()),
            user_id: Some(owner.to_string()),
        };
        let filter = VideoFilter::try_from(&query).unwrap();
        assert_eq!(filter.page, PageRequest { page: 2, limit: 5 });
        assert_eq!(filter.search.as_deref(), Some("rust"));
        assert_eq!(filter.sort, VideoSortField::Views);
        assert_eq!(filter.direction, SortDirection::Desc);
        assert_eq!(filter.owner, Some(owner));
    }

    #[test]
    fn test_filter_rejects_bad_owner() {
        let query = VideoListQuery {
            user_id: Some("nope".into()),
            ..VideoListQuery::default()
        };
        match VideoFilter::try_from(&query) {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Invalid user id"),
            other => panic!("unexpected: {:?}", other.map(|f| f.page)),
        }
    }
}
