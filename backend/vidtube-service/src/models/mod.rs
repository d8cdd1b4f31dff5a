/// Data models for VidTube Service
///
/// Row types map 1:1 to the tables in `migrations/`. JSON is camelCase.
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub mod comment;
pub mod dashboard;
pub mod like;
pub mod playlist;
pub mod subscription;
pub mod tweet;
pub mod user;
pub mod video;

pub use comment::{Comment, CommentWithOwner};
pub use dashboard::ChannelStats;
pub use like::{Like, LikeRow, LikeTarget};
pub use playlist::{Playlist, PlaylistRequest};
pub use subscription::Subscription;
pub use tweet::Tweet;
pub use user::{ChannelProfile, LoginRequest, NewUser, RegisterInput, User, UserCredentials};
pub use video::{NewVideo, Video, VideoFilter, VideoListQuery, VideoSortField, VideoUpdate, VideoWithOwner};

/// Outcome of a create-if-absent / delete-if-present operation
#[derive(Debug, Clone, PartialEq)]
pub enum Toggle<T> {
    Added(T),
    Removed,
}

/// Public projection of a user embedded in video and comment listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    #[sqlx(rename = "owner_id")]
    pub id: Uuid,
    #[sqlx(rename = "owner_user_name")]
    pub user_name: String,
    #[sqlx(rename = "owner_full_name")]
    pub full_name: String,
    #[sqlx(rename = "owner_avatar")]
    pub avatar: String,
}

/// `{content}` body shared by comments and tweets
#[derive(Debug, Default, Deserialize)]
pub struct ContentRequest {
    pub content: Option<String>,
}
