use crate::models::{Comment, CommentWithOwner};
use crate::pagination::PageRequest;
use sqlx::PgPool;
use uuid::Uuid;

const COMMENT_COLUMNS: &str = "id, content, video_id, owner_id, created_at, updated_at";

/// Newest-first page of a video's comments with their authors
pub async fn list_comments_for_video(
    pool: &PgPool,
    video_id: Uuid,
    page: PageRequest,
) -> Result<(Vec<CommentWithOwner>, i64), sqlx::Error> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE video_id = $1")
        .bind(video_id)
        .fetch_one(pool)
        .await?;

    let comments = sqlx::query_as::<_, CommentWithOwner>(
        r#"
        SELECT c.id, c.content, c.video_id, c.owner_id, c.created_at, c.updated_at,
               u.user_name AS owner_user_name,
               u.full_name AS owner_full_name,
               u.avatar AS owner_avatar
        FROM comments c
        JOIN users u ON u.id = c.owner_id
        WHERE c.video_id = $1
        ORDER BY c.created_at DESC, c.id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(video_id)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    Ok((comments, total))
}

pub async fn create_comment(
    pool: &PgPool,
    video_id: Uuid,
    owner_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!(
        r#"
        INSERT INTO comments (id, content, video_id, owner_id)
        VALUES ($1, $2, $3, $4)
        RETURNING {}
        "#,
        COMMENT_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(content)
    .bind(video_id)
    .bind(owner_id)
    .fetch_one(pool)
    .await
}

pub async fn find_comment_by_id(
    pool: &PgPool,
    comment_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!(
        "SELECT {} FROM comments WHERE id = $1",
        COMMENT_COLUMNS
    ))
    .bind(comment_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_comment(
    pool: &PgPool,
    comment_id: Uuid,
    content: &str,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!(
        r#"
        UPDATE comments
        SET content = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        COMMENT_COLUMNS
    ))
    .bind(comment_id)
    .bind(content)
    .fetch_optional(pool)
    .await
}

pub async fn delete_comment(
    pool: &PgPool,
    comment_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!(
        "DELETE FROM comments WHERE id = $1 RETURNING {}",
        COMMENT_COLUMNS
    ))
    .bind(comment_id)
    .fetch_optional(pool)
    .await
}
