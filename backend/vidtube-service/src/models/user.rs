use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Public user projection, the password hash never leaves the repository
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Login lookup row
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: Uuid,
    pub user_name: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: String,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub avatar: String,
    pub cover_image: String,
}

/// Subscriber / channel listing entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfile {
    pub id: Uuid,
    pub user_name: String,
    pub full_name: String,
    pub email: String,
    pub avatar: String,
    pub cover_image: String,
}

/// Text fields of the registration form, already trimmed
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterInput {
    #[serde(rename = "userName")]
    #[validate(length(min = 3, max = 50, message = "must be between 3 and 50 characters"))]
    pub user_name: String,

    #[validate(
        email(message = "must be a valid email address"),
        length(max = 254, message = "must be at most 254 characters")
    )]
    pub email: String,

    #[serde(rename = "fullName")]
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub full_name: String,

    #[validate(length(min = 8, max = 128, message = "must be between 8 and 128 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub user_name: Option<String>,
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> RegisterInput {
        RegisterInput {
            user_name: "alice".into(),
            email: "alice@example.com".into(),
            full_name: "Alice Liddell".into(),
            password: "wonderland".into(),
        }
    }

    #[test]
    fn test_valid_register_input() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_invalid_email_and_short_password() {
        let mut bad = input();
        bad.email = "not-an-email".into();
        bad.password = "short".into();

        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User {
            id: Uuid::nil(),
            user_name: "alice".into(),
            email: "alice@example.com".into(),
            full_name: "Alice".into(),
            avatar: "http://media/a.png".into(),
            cover_image: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("userName").is_some());
        assert!(value.get("coverImage").is_some());
        assert!(value.get("password").is_none());
        assert!(value.get("passwordHash").is_none());
    }
}
