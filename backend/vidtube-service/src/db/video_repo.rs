use crate::models::{NewVideo, Video, VideoFilter, VideoUpdate, VideoWithOwner};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

pub(crate) const VIDEO_COLUMNS: &str = "id, owner_id, title, description, video_file, thumbnail, \
     duration, views, is_published, created_at, updated_at";

/// Video columns under alias `v` plus the owner summary from alias `u`
pub(crate) const VIDEO_WITH_OWNER_COLUMNS: &str = "v.id, v.owner_id, v.title, v.description, \
     v.video_file, v.thumbnail, v.duration, v.views, v.is_published, v.created_at, v.updated_at, \
     u.user_name AS owner_user_name, u.full_name AS owner_full_name, u.avatar AS owner_avatar";

/// Escape LIKE wildcards so user input matches literally
pub(crate) fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &VideoFilter) {
    qb.push(" WHERE TRUE");

    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        qb.push(" AND (v.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR v.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(owner) = filter.owner {
        qb.push(" AND v.owner_id = ").push_bind(owner);
    }
}

/// One page of videos matching `filter`, with the total match count
pub async fn list_videos(
    pool: &PgPool,
    filter: &VideoFilter,
) -> Result<(Vec<VideoWithOwner>, i64), sqlx::Error> {
    let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM videos v");
    push_filters(&mut count_qb, filter);
    let total = count_qb
        .build_query_scalar::<i64>()
        .fetch_one(pool)
        .await?;

    let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
    qb.push(VIDEO_WITH_OWNER_COLUMNS)
        .push(" FROM videos v JOIN users u ON u.id = v.owner_id");
    push_filters(&mut qb, filter);

    // Column and direction come from whitelisted enums
    let direction = filter.direction.as_sql();
    qb.push(format!(
        " ORDER BY {} {}, v.id {}",
        filter.sort.column(),
        direction,
        direction
    ));
    qb.push(" LIMIT ")
        .push_bind(filter.page.limit)
        .push(" OFFSET ")
        .push_bind(filter.page.offset());

    let videos = qb
        .build_query_as::<VideoWithOwner>()
        .fetch_all(pool)
        .await?;

    Ok((videos, total))
}

/// True when another video already uses this title or description
pub async fn title_or_description_taken(
    pool: &PgPool,
    title: &str,
    description: &str,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM videos WHERE title = $1 OR description = $2)",
    )
    .bind(title)
    .bind(description)
    .fetch_one(pool)
    .await
}

pub async fn create_video(pool: &PgPool, video: &NewVideo) -> Result<Video, sqlx::Error> {
    sqlx::query_as::<_, Video>(&format!(
        r#"
        INSERT INTO videos (id, owner_id, title, description, video_file, thumbnail, duration)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {}
        "#,
        VIDEO_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(video.owner)
    .bind(&video.title)
    .bind(&video.description)
    .bind(&video.video_file)
    .bind(&video.thumbnail)
    .bind(video.duration)
    .fetch_one(pool)
    .await
}

pub async fn find_video_by_id(pool: &PgPool, video_id: Uuid) -> Result<Option<Video>, sqlx::Error> {
    sqlx::query_as::<_, Video>(&format!(
        "SELECT {} FROM videos WHERE id = $1",
        VIDEO_COLUMNS
    ))
    .bind(video_id)
    .fetch_optional(pool)
    .await
}

pub async fn video_exists(pool: &PgPool, video_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM videos WHERE id = $1)")
        .bind(video_id)
        .fetch_one(pool)
        .await
}

/// Apply the supplied fields, leaving the others untouched
pub async fn update_video(
    pool: &PgPool,
    video_id: Uuid,
    update: &VideoUpdate,
) -> Result<Option<Video>, sqlx::Error> {
    sqlx::query_as::<_, Video>(&format!(
        r#"
        UPDATE videos
        SET title = COALESCE($2, title),
            description = COALESCE($3, description),
            thumbnail = COALESCE($4, thumbnail),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        VIDEO_COLUMNS
    ))
    .bind(video_id)
    .bind(update.title.as_deref())
    .bind(update.description.as_deref())
    .bind(update.thumbnail.as_deref())
    .fetch_optional(pool)
    .await
}

/// Delete a video and scrub it from every playlist.
///
/// Comments and likes go with it through `ON DELETE CASCADE`.
pub async fn delete_video(pool: &PgPool, video_id: Uuid) -> Result<Option<Video>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        UPDATE playlists
        SET video_ids = array_remove(video_ids, $1), updated_at = NOW()
        WHERE $1 = ANY(video_ids)
        "#,
    )
    .bind(video_id)
    .execute(&mut *tx)
    .await?;

    let deleted = sqlx::query_as::<_, Video>(&format!(
        "DELETE FROM videos WHERE id = $1 RETURNING {}",
        VIDEO_COLUMNS
    ))
    .bind(video_id)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(deleted)
}

pub async fn toggle_publish(pool: &PgPool, video_id: Uuid) -> Result<Option<Video>, sqlx::Error> {
    sqlx::query_as::<_, Video>(&format!(
        r#"
        UPDATE videos
        SET is_published = NOT is_published, updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        VIDEO_COLUMNS
    ))
    .bind(video_id)
    .fetch_optional(pool)
    .await
}

/// Atomic `views + 1`
pub async fn increment_views(pool: &PgPool, video_id: Uuid) -> Result<Option<Video>, sqlx::Error> {
    sqlx::query_as::<_, Video>(&format!(
        "UPDATE videos SET views = views + 1 WHERE id = $1 RETURNING {}",
        VIDEO_COLUMNS
    ))
    .bind(video_id)
    .fetch_optional(pool)
    .await
}
