use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// The single entity a like points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeTarget {
    Video(Uuid),
    Comment(Uuid),
    Tweet(Uuid),
}

impl LikeTarget {
    pub fn id(&self) -> Uuid {
        match self {
            LikeTarget::Video(id) | LikeTarget::Comment(id) | LikeTarget::Tweet(id) => *id,
        }
    }

    /// Column of `likes` holding this target
    pub fn column(&self) -> &'static str {
        match self {
            LikeTarget::Video(_) => "video_id",
            LikeTarget::Comment(_) => "comment_id",
            LikeTarget::Tweet(_) => "tweet_id",
        }
    }

    /// Table the target row lives in
    pub fn table(&self) -> &'static str {
        match self {
            LikeTarget::Video(_) => "videos",
            LikeTarget::Comment(_) => "comments",
            LikeTarget::Tweet(_) => "tweets",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LikeTarget::Video(_) => "Video",
            LikeTarget::Comment(_) => "Comment",
            LikeTarget::Tweet(_) => "Tweet",
        }
    }
}

/// Raw `likes` row with its three nullable target columns
#[derive(Debug, Clone, FromRow)]
pub struct LikeRow {
    pub id: Uuid,
    pub video_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
    pub tweet_id: Option<Uuid>,
    pub liked_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: Uuid,
    #[serde(flatten)]
    pub target: LikeTarget,
    pub liked_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<LikeRow> for Like {
    type Error = String;

    fn try_from(row: LikeRow) -> Result<Self, Self::Error> {
        let target = match (row.video_id, row.comment_id, row.tweet_id) {
            (Some(id), None, None) => LikeTarget::Video(id),
            (None, Some(id), None) => LikeTarget::Comment(id),
            (None, None, Some(id)) => LikeTarget::Tweet(id),
            _ => return Err(format!("like {} does not have exactly one target", row.id)),
        };

        Ok(Like {
            id: row.id,
            target,
            liked_by: row.liked_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(video: Option<Uuid>, comment: Option<Uuid>, tweet: Option<Uuid>) -> LikeRow {
        LikeRow {
            id: Uuid::new_v4(),
            video_id: video,
            comment_id: comment,
            tweet_id: tweet,
            liked_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_single_target_converts() {
        let id = Uuid::new_v4();
        let like = Like::try_from(row(None, Some(id), None)).unwrap();
        assert_eq!(like.target, LikeTarget::Comment(id));
        assert_eq!(like.target.column(), "comment_id");
    }

    #[test]
    fn test_zero_or_many_targets_rejected() {
        let a = Some(Uuid::new_v4());
        assert!(Like::try_from(row(None, None, None)).is_err());
        assert!(Like::try_from(row(a, a, None)).is_err());
    }

    #[test]
    fn test_like_serializes_target_key() {
        let id = Uuid::new_v4();
        let like = Like::try_from(row(None, None, Some(id))).unwrap();
        let value = serde_json::to_value(&like).unwrap();
        assert_eq!(value["tweet"], id.to_string());
        assert!(value.get("video").is_none());
        assert!(value.get("likedBy").is_some());
    }
}
