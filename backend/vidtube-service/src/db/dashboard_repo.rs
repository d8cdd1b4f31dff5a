use crate::db::video_repo::VIDEO_COLUMNS;
use crate::models::{ChannelStats, Video};
use crate::pagination::PageRequest;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn channel_stats(pool: &PgPool, channel_id: Uuid) -> Result<ChannelStats, sqlx::Error> {
    sqlx::query_as::<_, ChannelStats>(
        r#"
        SELECT
            (SELECT COALESCE(SUM(views), 0)::BIGINT FROM videos WHERE owner_id = $1) AS total_views,
            (SELECT COUNT(*) FROM subscriptions WHERE channel_id = $1) AS total_subscribers,
            (SELECT COUNT(*) FROM videos WHERE owner_id = $1) AS total_videos,
            (SELECT COUNT(*)
               FROM likes l
               JOIN videos v ON v.id = l.video_id
              WHERE v.owner_id = $1) AS total_likes
        "#,
    )
    .bind(channel_id)
    .fetch_one(pool)
    .await
}

/// Newest-first page of the channel's own videos, published or not
pub async fn channel_videos(
    pool: &PgPool,
    channel_id: Uuid,
    page: PageRequest,
) -> Result<(Vec<Video>, i64), sqlx::Error> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM videos WHERE owner_id = $1")
        .bind(channel_id)
        .fetch_one(pool)
        .await?;

    let videos = sqlx::query_as::<_, Video>(&format!(
        r#"
        SELECT {}
        FROM videos
        WHERE owner_id = $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
        VIDEO_COLUMNS
    ))
    .bind(channel_id)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    Ok((videos, total))
}
