use crate::models::{ChannelProfile, Subscription, Toggle};
use sqlx::PgPool;
use uuid::Uuid;

const SUBSCRIPTION_COLUMNS: &str = "id, subscriber_id, channel_id, created_at, updated_at";

/// Unsubscribe if subscribed, subscribe otherwise
pub async fn toggle_subscription(
    pool: &PgPool,
    subscriber_id: Uuid,
    channel_id: Uuid,
) -> Result<Toggle<Subscription>, sqlx::Error> {
    let removed = sqlx::query_scalar::<_, Uuid>(
        "DELETE FROM subscriptions WHERE subscriber_id = $1 AND channel_id = $2 RETURNING id",
    )
    .bind(subscriber_id)
    .bind(channel_id)
    .fetch_optional(pool)
    .await?;

    if removed.is_some() {
        return Ok(Toggle::Removed);
    }

    let inserted = sqlx::query_as::<_, Subscription>(&format!(
        r#"
        INSERT INTO subscriptions (id, subscriber_id, channel_id)
        VALUES ($1, $2, $3)
        ON CONFLICT (subscriber_id, channel_id) DO NOTHING
        RETURNING {}
        "#,
        SUBSCRIPTION_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(subscriber_id)
    .bind(channel_id)
    .fetch_optional(pool)
    .await?;

    let subscription = match inserted {
        Some(subscription) => subscription,
        None => {
            sqlx::query_as::<_, Subscription>(&format!(
                "SELECT {} FROM subscriptions WHERE subscriber_id = $1 AND channel_id = $2",
                SUBSCRIPTION_COLUMNS
            ))
            .bind(subscriber_id)
            .bind(channel_id)
            .fetch_one(pool)
            .await?
        }
    };

    Ok(Toggle::Added(subscription))
}

/// Profiles of the users subscribed to a channel
pub async fn list_subscribers(
    pool: &PgPool,
    channel_id: Uuid,
) -> Result<Vec<ChannelProfile>, sqlx::Error> {
    sqlx::query_as::<_, ChannelProfile>(
        r#"
        SELECT u.id, u.user_name, u.full_name, u.email, u.avatar, u.cover_image
        FROM subscriptions s
        JOIN users u ON u.id = s.subscriber_id
        WHERE s.channel_id = $1
        ORDER BY s.created_at, s.id
        "#,
    )
    .bind(channel_id)
    .fetch_all(pool)
    .await
}

/// Profiles of the channels a user is subscribed to
pub async fn list_subscribed_channels(
    pool: &PgPool,
    subscriber_id: Uuid,
) -> Result<Vec<ChannelProfile>, sqlx::Error> {
    sqlx::query_as::<_, ChannelProfile>(
        r#"
        SELECT u.id, u.user_name, u.full_name, u.email, u.avatar, u.cover_image
        FROM subscriptions s
        JOIN users u ON u.id = s.channel_id
        WHERE s.subscriber_id = $1
        ORDER BY s.created_at, s.id
        "#,
    )
    .bind(subscriber_id)
    .fetch_all(pool)
    .await
}
