use crate::models::Playlist;
use sqlx::PgPool;
use uuid::Uuid;

const PLAYLIST_COLUMNS: &str = "id, name, description, video_ids, owner_id, created_at, updated_at";

pub async fn create_playlist(
    pool: &PgPool,
    owner_id: Uuid,
    name: &str,
    description: &str,
) -> Result<Playlist, sqlx::Error> {
    sqlx::query_as::<_, Playlist>(&format!(
        r#"
        INSERT INTO playlists (id, name, description, owner_id)
        VALUES ($1, $2, $3, $4)
        RETURNING {}
        "#,
        PLAYLIST_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(description)
    .bind(owner_id)
    .fetch_one(pool)
    .await
}

pub async fn find_playlist_by_id(
    pool: &PgPool,
    playlist_id: Uuid,
) -> Result<Option<Playlist>, sqlx::Error> {
    sqlx::query_as::<_, Playlist>(&format!(
        "SELECT {} FROM playlists WHERE id = $1",
        PLAYLIST_COLUMNS
    ))
    .bind(playlist_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_playlists_by_owner(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Vec<Playlist>, sqlx::Error> {
    sqlx::query_as::<_, Playlist>(&format!(
        "SELECT {} FROM playlists WHERE owner_id = $1 ORDER BY created_at, id",
        PLAYLIST_COLUMNS
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// Partial update of name and description
pub async fn update_playlist(
    pool: &PgPool,
    playlist_id: Uuid,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<Option<Playlist>, sqlx::Error> {
    sqlx::query_as::<_, Playlist>(&format!(
        r#"
        UPDATE playlists
        SET name = COALESCE($2, name),
            description = COALESCE($3, description),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        PLAYLIST_COLUMNS
    ))
    .bind(playlist_id)
    .bind(name)
    .bind(description)
    .fetch_optional(pool)
    .await
}

pub async fn delete_playlist(
    pool: &PgPool,
    playlist_id: Uuid,
) -> Result<Option<Playlist>, sqlx::Error> {
    sqlx::query_as::<_, Playlist>(&format!(
        "DELETE FROM playlists WHERE id = $1 RETURNING {}",
        PLAYLIST_COLUMNS
    ))
    .bind(playlist_id)
    .fetch_optional(pool)
    .await
}

/// Append a video unless already present. `None` means nothing changed.
pub async fn add_video(
    pool: &PgPool,
    playlist_id: Uuid,
    video_id: Uuid,
) -> Result<Option<Playlist>, sqlx::Error> {
    sqlx::query_as::<_, Playlist>(&format!(
        r#"
        UPDATE playlists
        SET video_ids = array_append(video_ids, $2), updated_at = NOW()
        WHERE id = $1 AND NOT ($2 = ANY(video_ids))
        RETURNING {}
        "#,
        PLAYLIST_COLUMNS
    ))
    .bind(playlist_id)
    .bind(video_id)
    .fetch_optional(pool)
    .await
}

/// Remove a video if present. `None` means nothing changed.
pub async fn remove_video(
    pool: &PgPool,
    playlist_id: Uuid,
    video_id: Uuid,
) -> Result<Option<Playlist>, sqlx::Error> {
    sqlx::query_as::<_, Playlist>(&format!(
        r#"
        UPDATE playlists
        SET video_ids = array_remove(video_ids, $2), updated_at = NOW()
        WHERE id = $1 AND $2 = ANY(video_ids)
        RETURNING {}
        "#,
        PLAYLIST_COLUMNS
    ))
    .bind(playlist_id)
    .bind(video_id)
    .fetch_optional(pool)
    .await
}
