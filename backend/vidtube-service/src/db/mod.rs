/// Database access layer
///
/// One module of free functions per table, each taking `&PgPool` and
/// returning `sqlx::Error` so handlers can `?` into `AppError`.
use sqlx::migrate::Migrator;

pub mod comment_repo;
pub mod dashboard_repo;
pub mod like_repo;
pub mod playlist_repo;
pub mod subscription_repo;
pub mod tweet_repo;
pub mod user_repo;
pub mod video_repo;

/// Embedded schema migrations
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
