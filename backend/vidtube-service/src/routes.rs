//! Route configuration
//!
//! Every route lives under `/api/v1` except `/metrics` and the static
//! `/public` directory. Extractor failures and unknown routes are turned into
//! `AppError` so they render through the same envelope as handler errors.

use crate::config::HttpConfig;
use crate::error::AppError;
use crate::handlers;
use crate::metrics::serve_metrics;
use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{web, HttpRequest, HttpResponse};

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig, http: &HttpConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(http.json_body_limit)
            .error_handler(json_error),
    )
    .app_data(web::QueryConfig::default().error_handler(query_error))
    .app_data(web::PathConfig::default().error_handler(path_error))
    .route("/metrics", web::get().to(serve_metrics))
    .service(
        web::scope("/api/v1")
            .configure(users)
            .configure(videos)
            .configure(comments)
            .configure(likes)
            .configure(playlists)
            .configure(subscriptions)
            .configure(tweets)
            .configure(dashboard)
            .configure(health),
    )
    .service(actix_files::Files::new("/public", &http.public_dir))
    .default_service(web::to(route_not_found));
}

fn users(cfg: &mut web::ServiceConfig) {
    use handlers::users::*;
    cfg.service(
        web::scope("/users")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/current-user", web::get().to(current_user)),
    );
}

fn videos(cfg: &mut web::ServiceConfig) {
    use handlers::videos::*;
    cfg.service(
        web::scope("/videos")
            .route("", web::get().to(list_videos))
            .route("", web::post().to(publish_video))
            .route("/toggle/publish/{videoId}", web::patch().to(toggle_publish_status))
            .route("/{videoId}/views", web::patch().to(increment_views))
            .route("/{videoId}", web::get().to(get_video))
            .route("/{videoId}", web::patch().to(update_video))
            .route("/{videoId}", web::delete().to(delete_video)),
    );
}

fn comments(cfg: &mut web::ServiceConfig) {
    use handlers::comments::*;
    cfg.service(
        web::scope("/comments")
            .route("/c/{commentId}", web::patch().to(update_comment))
            .route("/c/{commentId}", web::delete().to(delete_comment))
            .route("/{videoId}", web::get().to(get_video_comments))
            .route("/{videoId}", web::post().to(add_comment)),
    );
}

fn likes(cfg: &mut web::ServiceConfig) {
    use handlers::likes::*;
    cfg.service(
        web::scope("/likes")
            .route("/toggle/v/{videoId}", web::post().to(toggle_video_like))
            .route("/toggle/c/{commentId}", web::post().to(toggle_comment_like))
            .route("/toggle/t/{tweetId}", web::post().to(toggle_tweet_like))
            .route("/videos", web::get().to(get_liked_videos)),
    );
}

fn playlists(cfg: &mut web::ServiceConfig) {
    use handlers::playlists::*;
    cfg.service(
        web::scope("/playlist")
            .route("", web::post().to(create_playlist))
            .route("/add/{videoId}/{playlistId}", web::patch().to(add_video_to_playlist))
            .route(
                "/remove/{videoId}/{playlistId}",
                web::patch().to(remove_video_from_playlist),
            )
            .route("/user/{userId}", web::get().to(get_user_playlists))
            .route("/{playlistId}", web::get().to(get_playlist))
            .route("/{playlistId}", web::patch().to(update_playlist))
            .route("/{playlistId}", web::delete().to(delete_playlist)),
    );
}

fn subscriptions(cfg: &mut web::ServiceConfig) {
    use handlers::subscriptions::*;
    cfg.service(
        web::scope("/subscriptions")
            .route("/c/{channelId}", web::post().to(toggle_subscription))
            .route("/c/{channelId}", web::get().to(get_channel_subscribers))
            .route("/u/{subscriberId}", web::get().to(get_subscribed_channels)),
    );
}

fn tweets(cfg: &mut web::ServiceConfig) {
    use handlers::tweets::*;
    cfg.service(
        web::scope("/tweets")
            .route("", web::post().to(create_tweet))
            .route("/user/{userId}", web::get().to(get_user_tweets))
            .route("/{tweetId}", web::patch().to(update_tweet))
            .route("/{tweetId}", web::delete().to(delete_tweet)),
    );
}

fn dashboard(cfg: &mut web::ServiceConfig) {
    use handlers::dashboard::*;
    cfg.service(
        web::scope("/dashboard")
            .route("/stats", web::get().to(get_channel_stats))
            .route("/videos", web::get().to(get_channel_videos)),
    );
}

fn health(cfg: &mut web::ServiceConfig) {
    use handlers::health::*;
    cfg.route("/healthcheck", web::get().to(healthcheck))
        .route("/healthcheck/ready", web::get().to(readiness));
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    match err {
        JsonPayloadError::Overflow { limit } | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            AppError::PayloadTooLarge(format!("JSON body exceeds {} bytes", limit)).into()
        }
        JsonPayloadError::ContentType => {
            AppError::BadRequest("Expected Content-Type: application/json".to_string()).into()
        }
        other => AppError::BadRequest(format!("Invalid JSON body: {}", other)).into(),
    }
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid query string: {}", err)).into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid path parameter: {}", err)).into()
}

async fn route_not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound(format!(
        "Route {} {} not found",
        req.method(),
        req.path()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_unknown_route_renders_envelope() {
        let http = HttpConfig::default();
        let app = test::init_service(App::new().configure(|cfg| configure_routes(cfg, &http))).await;

        let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["statusCode"], 404);
    }

    #[actix_web::test]
    async fn test_healthcheck_route() {
        let http = HttpConfig::default();
        let app = test::init_service(App::new().configure(|cfg| configure_routes(cfg, &http))).await;

        let req = test::TestRequest::get().uri("/api/v1/healthcheck").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
