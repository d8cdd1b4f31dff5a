use serde::Serialize;
use sqlx::FromRow;

/// Aggregates for the caller's channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub total_views: i64,
    pub total_subscribers: i64,
    pub total_videos: i64,
    /// Likes on the channel's videos
    pub total_likes: i64,
}
