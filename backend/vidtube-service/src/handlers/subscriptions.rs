/// Subscription handlers
use super::parse_id;
use crate::db::{subscription_repo, user_repo};
use crate::error::{AppError, Result};
use crate::metrics;
use crate::middleware::AuthUser;
use crate::models::Toggle;
use crate::response::{empty_object, ApiResponse};
use crate::AppState;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

/// Subscribe the caller to a channel, or unsubscribe if already subscribed
pub async fn toggle_subscription(
    state: web::Data<AppState>,
    user: AuthUser,
    channel_id: web::Path<String>,
) -> Result<HttpResponse> {
    let channel_id = parse_id(&channel_id, "channel")?;
    if !user_repo::user_exists(&state.db, channel_id).await? {
        return Err(AppError::NotFound("Channel not found".to_string()));
    }

    match subscription_repo::toggle_subscription(&state.db, user.id(), channel_id).await? {
        Toggle::Added(subscription) => {
            metrics::record_toggle("subscription", true);
            tracing::debug!(channel_id = %channel_id, subscriber_id = %user.id(), "Subscribed");
            Ok(ApiResponse::new(
                StatusCode::CREATED,
                subscription,
                "Subscribed successfully",
            )
            .respond())
        }
        Toggle::Removed => {
            metrics::record_toggle("subscription", false);
            tracing::debug!(channel_id = %channel_id, subscriber_id = %user.id(), "Unsubscribed");
            Ok(ApiResponse::new(
                StatusCode::OK,
                empty_object(),
                "Subscription removed successfully",
            )
            .respond())
        }
    }
}

pub async fn get_channel_subscribers(
    state: web::Data<AppState>,
    _user: AuthUser,
    channel_id: web::Path<String>,
) -> Result<HttpResponse> {
    let channel_id = parse_id(&channel_id, "channel")?;
    let subscribers = subscription_repo::list_subscribers(&state.db, channel_id).await?;
    if subscribers.is_empty() {
        return Err(AppError::NotFound("No subscribers found".to_string()));
    }

    Ok(ApiResponse::new(
        StatusCode::OK,
        subscribers,
        "Subscribers fetched successfully",
    )
    .respond())
}

pub async fn get_subscribed_channels(
    state: web::Data<AppState>,
    _user: AuthUser,
    subscriber_id: web::Path<String>,
) -> Result<HttpResponse> {
    let subscriber_id = parse_id(&subscriber_id, "subscriber")?;
    let channels = subscription_repo::list_subscribed_channels(&state.db, subscriber_id).await?;
    if channels.is_empty() {
        return Err(AppError::NotFound("No subscribed channels found".to_string()));
    }

    Ok(ApiResponse::new(
        StatusCode::OK,
        channels,
        "Subscribed channels fetched successfully",
    )
    .respond())
}
