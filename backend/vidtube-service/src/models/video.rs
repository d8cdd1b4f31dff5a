use super::OwnerSummary;
use crate::error::AppError;
use crate::pagination::{PageRequest, SortDirection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: Uuid,
    #[sqlx(rename = "owner_id")]
    pub owner: Uuid,
    pub title: String,
    pub description: String,
    pub video_file: String,
    pub thumbnail: String,
    /// Seconds
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Video row joined with its owner's public profile
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VideoWithOwner {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub video: Video,
    #[sqlx(flatten)]
    pub owner_details: OwnerSummary,
}

#[derive(Debug, Clone)]
pub struct NewVideo {
    pub owner: Uuid,
    pub title: String,
    pub description: String,
    pub video_file: String,
    pub thumbnail: String,
    pub duration: f64,
}

/// Partial update, `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct VideoUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

/// Columns a video listing may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Views,
    Duration,
    Title,
}

impl VideoSortField {
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some("createdAt") => Ok(Self::CreatedAt),
            Some("updatedAt") => Ok(Self::UpdatedAt),
            Some("views") => Ok(Self::Views),
            Some("duration") => Ok(Self::Duration),
            Some("title") => Ok(Self::Title),
            Some(other) => Err(AppError::BadRequest(format!(
                "Invalid sortBy '{}', expected one of createdAt, updatedAt, views, duration, title",
                other
            ))),
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "v.created_at",
            Self::UpdatedAt => "v.updated_at",
            Self::Views => "v.views",
            Self::Duration => "v.duration",
            Self::Title => "v.title",
        }
    }
}

/// Raw `GET /videos` query string
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub query: Option<String>,
    pub sort_by: Option<String>,
    pub sort_type: Option<String>,
    pub user_id: Option<String>,
}

/// Validated listing parameters
#[derive(Debug, Clone, Default)]
pub struct VideoFilter {
    /// Case-insensitive substring matched against title or description
    pub search: Option<String>,
    pub owner: Option<Uuid>,
    pub sort: VideoSortField,
    pub direction: SortDirection,
    pub page: PageRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_whitelist() {
        assert_eq!(VideoSortField::parse(None).unwrap(), VideoSortField::CreatedAt);
        assert_eq!(
            VideoSortField::parse(Some("views")).unwrap().column(),
            "v.views"
        );
        assert!(VideoSortField::parse(Some("password_hash")).is_err());
        assert!(VideoSortField::parse(Some("views; DROP TABLE videos")).is_err());
    }

    #[test]
    fn test_video_with_owner_shape() {
        let owner = Uuid::new_v4();
        let row = VideoWithOwner {
            video: Video {
                id: Uuid::new_v4(),
                owner,
                title: "t".into(),
                description: "d".into(),
                video_file: "v".into(),
                thumbnail: "th".into(),
                duration: 1.5,
                views: 3,
                is_published: true,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            owner_details: OwnerSummary {
                id: owner,
                user_name: "alice".into(),
                full_name: "Alice".into(),
                avatar: "a".into(),
            },
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["title"], "t");
        assert_eq!(value["isPublished"], true);
        assert_eq!(value["ownerDetails"]["userName"], "alice");
        assert_eq!(value["owner"], owner.to_string());
    }
}
