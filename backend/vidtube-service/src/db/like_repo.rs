use crate::db::video_repo::VIDEO_WITH_OWNER_COLUMNS;
use crate::models::{Like, LikeRow, LikeTarget, Toggle, VideoWithOwner};
use sqlx::PgPool;
use uuid::Uuid;

const LIKE_COLUMNS: &str = "id, video_id, comment_id, tweet_id, liked_by, created_at, updated_at";

/// Whether the liked entity exists
pub async fn target_exists(pool: &PgPool, target: LikeTarget) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(&format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)",
        target.table()
    ))
    .bind(target.id())
    .fetch_one(pool)
    .await
}

fn into_like(row: LikeRow) -> Result<Like, sqlx::Error> {
    Like::try_from(row).map_err(sqlx::Error::Protocol)
}

/// Remove the caller's like on `target` if present, otherwise add one.
///
/// Delete-returning first, then insert-on-conflict against the partial unique
/// indexes, so two concurrent toggles never leave a duplicate row.
pub async fn toggle_like(
    pool: &PgPool,
    target: LikeTarget,
    user_id: Uuid,
) -> Result<Toggle<Like>, sqlx::Error> {
    let column = target.column();

    let removed = sqlx::query_scalar::<_, Uuid>(&format!(
        "DELETE FROM likes WHERE {} = $1 AND liked_by = $2 RETURNING id",
        column
    ))
    .bind(target.id())
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    if removed.is_some() {
        return Ok(Toggle::Removed);
    }

    let inserted = sqlx::query_as::<_, LikeRow>(&format!(
        r#"
        INSERT INTO likes (id, {}, liked_by)
        VALUES ($1, $2, $3)
        ON CONFLICT DO NOTHING
        RETURNING {}
        "#,
        column, LIKE_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(target.id())
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    let row = match inserted {
        Some(row) => row,
        // A concurrent toggle inserted first, report the row it created
        None => {
            sqlx::query_as::<_, LikeRow>(&format!(
                "SELECT {} FROM likes WHERE {} = $1 AND liked_by = $2",
                LIKE_COLUMNS, column
            ))
            .bind(target.id())
            .bind(user_id)
            .fetch_one(pool)
            .await?
        }
    };

    Ok(Toggle::Added(into_like(row)?))
}

/// Videos liked by the user, most recent like first
pub async fn liked_videos(pool: &PgPool, user_id: Uuid) -> Result<Vec<VideoWithOwner>, sqlx::Error> {
    sqlx::query_as::<_, VideoWithOwner>(&format!(
        r#"
        SELECT {}
        FROM likes l
        JOIN videos v ON v.id = l.video_id
        JOIN users u ON u.id = v.owner_id
        WHERE l.liked_by = $1 AND l.video_id IS NOT NULL
        ORDER BY l.created_at DESC, l.id DESC
        "#,
        VIDEO_WITH_OWNER_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}
