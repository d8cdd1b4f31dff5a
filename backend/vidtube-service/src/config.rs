/// Configuration management for VidTube Service
///
/// Everything is read from environment variables once at startup (a `.env`
/// file is loaded by `main` when present) and passed into app construction.
use db_pool::env_utils::{non_empty_env, parse_env_bool, parse_env_with_default};
use db_pool::DbConfig;
use media_store::MediaStoreConfig;
use std::fmt;
use std::path::PathBuf;

const DEV_ACCESS_TOKEN_SECRET: &str = "vidtube-dev-access-token-secret-change-me";
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub http: HttpConfig,
    pub uploads: UploadConfig,
    pub auth: AuthConfig,
    pub media: MediaStoreConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// development, staging, production
    pub env: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        matches!(self.env.as_str(), "production" | "prod")
    }
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// `*` allows any origin (rejected in production)
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub pool: DbConfig,
    pub run_migrations: bool,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Max JSON / urlencoded body size in bytes
    pub json_body_limit: usize,
    /// Directory served read-only under `/public`
    pub public_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub temp_dir: PathBuf,
    pub max_file_bytes: u64,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub access_token_secret: String,
    pub access_token_ttl_secs: i64,
    pub cookie_secure: bool,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_token_secret", &"[REDACTED]")
            .field("access_token_ttl_secs", &self.access_token_ttl_secs)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            json_body_limit: 16 * 1024,
            public_dir: PathBuf::from("./public"),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            temp_dir: PathBuf::from("./public/temp"),
            max_file_bytes: 100 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env_with_default("APP_PORT", 8000),
        };

        let cors_raw = non_empty_env("CORS_ORIGIN");
        if app.is_production() && cors_raw.is_none() {
            return Err("CORS_ORIGIN must be set in production".to_string());
        }
        let allowed_origins: Vec<String> = cors_raw
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        if app.is_production() && allowed_origins.iter().any(|o| o == "*") {
            return Err("CORS_ORIGIN cannot be '*' in production".to_string());
        }

        let database = DatabaseConfig {
            pool: DbConfig::from_env("vidtube-service")?,
            run_migrations: parse_env_bool("DATABASE_RUN_MIGRATIONS", true),
        };

        let http_defaults = HttpConfig::default();
        let http = HttpConfig {
            json_body_limit: parse_env_with_default(
                "JSON_BODY_LIMIT_BYTES",
                http_defaults.json_body_limit,
            ),
            public_dir: non_empty_env("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(http_defaults.public_dir),
        };

        let upload_defaults = UploadConfig::default();
        let uploads = UploadConfig {
            temp_dir: non_empty_env("UPLOAD_TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or(upload_defaults.temp_dir),
            max_file_bytes: parse_env_with_default(
                "UPLOAD_MAX_FILE_BYTES",
                upload_defaults.max_file_bytes,
            ),
        };

        let auth = AuthConfig {
            access_token_secret: non_empty_env("ACCESS_TOKEN_SECRET")
                .unwrap_or_else(|| DEV_ACCESS_TOKEN_SECRET.to_string()),
            access_token_ttl_secs: parse_env_with_default("ACCESS_TOKEN_TTL_SECS", 86_400),
            cookie_secure: parse_env_bool("COOKIE_SECURE", app.is_production()),
        };
        if app.is_production() {
            if auth.access_token_secret == DEV_ACCESS_TOKEN_SECRET {
                return Err("ACCESS_TOKEN_SECRET must be set in production".to_string());
            }
            if auth.access_token_secret.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(format!(
                    "ACCESS_TOKEN_SECRET must be at least {} characters in production",
                    MIN_PRODUCTION_SECRET_LEN
                ));
            }
        }
        if auth.access_token_ttl_secs <= 0 {
            return Err("ACCESS_TOKEN_TTL_SECS must be positive".to_string());
        }

        let media = MediaStoreConfig::from_env()?;

        Ok(Config {
            app,
            cors: CorsConfig { allowed_origins },
            database,
            http,
            uploads,
            auth,
            media,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "APP_ENV",
        "APP_PORT",
        "CORS_ORIGIN",
        "DATABASE_RUN_MIGRATIONS",
        "JSON_BODY_LIMIT_BYTES",
        "UPLOAD_MAX_FILE_BYTES",
        "ACCESS_TOKEN_SECRET",
        "ACCESS_TOKEN_TTL_SECS",
        "COOKIE_SECURE",
        "MEDIA_BACKEND",
    ];

    fn reset_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
        std::env::set_var("DATABASE_URL", "postgres://localhost/vidtube_test");
    }

    #[test]
    #[serial]
    fn test_development_defaults() {
        reset_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.app.port, 8000);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.http.json_body_limit, 16 * 1024);
        assert_eq!(config.uploads.max_file_bytes, 104_857_600);
        assert_eq!(config.auth.access_token_ttl_secs, 86_400);
        assert!(!config.auth.cookie_secure);
        assert!(config.database.run_migrations);
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    #[serial]
    fn test_overrides_and_origin_list() {
        reset_env();
        std::env::set_var("APP_PORT", "9100");
        std::env::set_var("CORS_ORIGIN", "https://a.example, https://b.example");
        std::env::set_var("DATABASE_RUN_MIGRATIONS", "false");

        let config = Config::from_env().unwrap();
        assert_eq!(config.app.port, 9100);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert!(!config.database.run_migrations);
        reset_env();
    }

    #[test]
    #[serial]
    fn test_production_requires_cors_and_secret() {
        reset_env();
        std::env::set_var("APP_ENV", "production");
        assert!(Config::from_env().unwrap_err().contains("CORS_ORIGIN"));

        std::env::set_var("CORS_ORIGIN", "*");
        assert!(Config::from_env().unwrap_err().contains("'*'"));

        std::env::set_var("CORS_ORIGIN", "https://vidtube.dev");
        assert!(Config::from_env()
            .unwrap_err()
            .contains("ACCESS_TOKEN_SECRET"));

        std::env::set_var("ACCESS_TOKEN_SECRET", "short");
        assert!(Config::from_env().unwrap_err().contains("at least"));

        std::env::set_var("ACCESS_TOKEN_SECRET", "x".repeat(48));
        let config = Config::from_env().unwrap();
        assert!(config.auth.cookie_secure);
        reset_env();
    }

    #[test]
    fn test_auth_debug_redacts_secret() {
        let auth = AuthConfig {
            access_token_secret: "hunter2-hunter2".to_string(),
            access_token_ttl_secs: 60,
            cookie_secure: false,
        };
        assert!(!format!("{:?}", auth).contains("hunter2"));
    }
}
