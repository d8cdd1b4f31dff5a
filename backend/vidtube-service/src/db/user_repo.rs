use crate::models::{NewUser, User, UserCredentials};
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str =
    "id, user_name, email, full_name, avatar, cover_image, created_at, updated_at";

/// True when either the user name or the email is already registered
pub async fn user_name_or_email_taken(
    pool: &PgPool,
    user_name: &str,
    email: &str,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE user_name = $1 OR email = $2)",
    )
    .bind(user_name)
    .bind(email)
    .fetch_one(pool)
    .await
}

/// Insert a user. Name and email are expected lower-cased already.
pub async fn create_user(pool: &PgPool, user: &NewUser) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO users (id, user_name, email, full_name, password_hash, avatar, cover_image)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&user.user_name)
    .bind(&user.email)
    .bind(&user.full_name)
    .bind(&user.password_hash)
    .bind(&user.avatar)
    .bind(&user.cover_image)
    .fetch_one(pool)
    .await
}

pub async fn find_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn user_exists(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// Login lookup by email or user name, whichever is given
pub async fn find_credentials(
    pool: &PgPool,
    email: Option<&str>,
    user_name: Option<&str>,
) -> Result<Option<UserCredentials>, sqlx::Error> {
    sqlx::query_as::<_, UserCredentials>(
        r#"
        SELECT id, user_name, password_hash
        FROM users
        WHERE ($1::TEXT IS NOT NULL AND email = $1)
           OR ($2::TEXT IS NOT NULL AND user_name = $2)
        LIMIT 1
        "#,
    )
    .bind(email)
    .bind(user_name)
    .fetch_optional(pool)
    .await
}
