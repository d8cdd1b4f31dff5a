use crate::models::Tweet;
use sqlx::PgPool;
use uuid::Uuid;

const TWEET_COLUMNS: &str = "id, content, owner_id, created_at, updated_at";

pub async fn create_tweet(pool: &PgPool, owner_id: Uuid, content: &str) -> Result<Tweet, sqlx::Error> {
    sqlx::query_as::<_, Tweet>(&format!(
        "INSERT INTO tweets (id, content, owner_id) VALUES ($1, $2, $3) RETURNING {}",
        TWEET_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(content)
    .bind(owner_id)
    .fetch_one(pool)
    .await
}

/// All tweets of a user, newest first
pub async fn list_tweets_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Tweet>, sqlx::Error> {
    sqlx::query_as::<_, Tweet>(&format!(
        "SELECT {} FROM tweets WHERE owner_id = $1 ORDER BY created_at DESC, id DESC",
        TWEET_COLUMNS
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

pub async fn find_tweet_by_id(pool: &PgPool, tweet_id: Uuid) -> Result<Option<Tweet>, sqlx::Error> {
    sqlx::query_as::<_, Tweet>(&format!(
        "SELECT {} FROM tweets WHERE id = $1",
        TWEET_COLUMNS
    ))
    .bind(tweet_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_tweet(
    pool: &PgPool,
    tweet_id: Uuid,
    content: &str,
) -> Result<Option<Tweet>, sqlx::Error> {
    sqlx::query_as::<_, Tweet>(&format!(
        "UPDATE tweets SET content = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
        TWEET_COLUMNS
    ))
    .bind(tweet_id)
    .bind(content)
    .fetch_optional(pool)
    .await
}

pub async fn delete_tweet(pool: &PgPool, tweet_id: Uuid) -> Result<Option<Tweet>, sqlx::Error> {
    sqlx::query_as::<_, Tweet>(&format!(
        "DELETE FROM tweets WHERE id = $1 RETURNING {}",
        TWEET_COLUMNS
    ))
    .bind(tweet_id)
    .fetch_optional(pool)
    .await
}
