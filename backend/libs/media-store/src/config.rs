/// Media store configuration shared by the VidTube services
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Which backend receives uploaded media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaBackend {
    /// Files copied under a local directory served by the app
    Local,
    /// Objects written to an S3 bucket
    S3,
}

impl FromStr for MediaBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "s3" => Ok(Self::S3),
            other => Err(format!(
                "MEDIA_BACKEND must be 'local' or 's3', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Directory the files are written to
    pub root_dir: PathBuf,
    /// URL prefix under which `root_dir` is publicly reachable
    pub public_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// S3 bucket name
    pub bucket: String,
    /// AWS region
    pub region: String,
    /// Base URL for public access (CDN domain or bucket endpoint)
    pub base_url: String,
    /// Whether public URLs carry the bucket as the first path segment
    pub path_style: bool,
    /// Custom endpoint for S3-compatible storage (MinIO, LocalStack)
    pub endpoint: Option<String>,
}

impl S3Config {
    /// Public URL of an object key
    pub fn object_url(&self, key: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.path_style {
            format!("{}/{}/{}", base, self.bucket, key)
        } else {
            format!("{}/{}", base, key)
        }
    }

    /// Object key of a URL produced by [`S3Config::object_url`]
    pub fn key_from_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        let base = self.base_url.trim_end_matches('/');
        let rest = url.strip_prefix(base)?.strip_prefix('/')?;
        let key = if self.path_style {
            rest.strip_prefix(self.bucket.as_str())?.strip_prefix('/')?
        } else {
            rest
        };
        (!key.is_empty()).then_some(key)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Run ffprobe on uploaded videos to derive their duration
    pub enabled: bool,
    /// ffprobe executable
    pub ffprobe_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaStoreConfig {
    pub backend: MediaBackend,
    pub local: LocalConfig,
    pub s3: S3Config,
    pub probe: ProbeConfig,
}

impl MediaStoreConfig {
    /// Load media store configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let backend: MediaBackend = std::env::var("MEDIA_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .parse()?;

        let local = LocalConfig {
            root_dir: PathBuf::from(
                std::env::var("MEDIA_LOCAL_DIR").unwrap_or_else(|_| "./public/media".to_string()),
            ),
            public_base_url: std::env::var("MEDIA_PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/public/media".to_string()),
        };

        let bucket = std::env::var("S3_BUCKET").unwrap_or_default();
        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let base_url = std::env::var("S3_BASE_URL")
            .unwrap_or_else(|_| format!("https://{}.s3.{}.amazonaws.com", bucket, region));
        let s3 = S3Config {
            bucket,
            region,
            base_url,
            path_style: std::env::var("S3_PATH_STYLE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            endpoint: std::env::var("S3_ENDPOINT").ok().filter(|e| !e.is_empty()),
        };

        let probe = ProbeConfig {
            enabled: std::env::var("MEDIA_PROBE_DURATION")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
            ffprobe_path: std::env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string()),
        };

        if backend == MediaBackend::S3 && s3.bucket.is_empty() {
            return Err("S3_BUCKET is required when MEDIA_BACKEND=s3".to_string());
        }

        Ok(Self {
            backend,
            local,
            s3,
            probe,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn s3(path_style: bool) -> S3Config {
        S3Config {
            bucket: "vidtube-media".to_string(),
            region: "us-east-1".to_string(),
            base_url: "https://cdn.vidtube.dev/".to_string(),
            path_style,
            endpoint: None,
        }
    }

    #[test]
    fn test_object_url_virtual_hosted_style() {
        let url = s3(false).object_url("videos/abc.mp4");
        assert_eq!(url, "https://cdn.vidtube.dev/videos/abc.mp4");
    }

    #[test]
    fn test_object_url_path_style() {
        let url = s3(true).object_url("images/abc.png");
        assert_eq!(url, "https://cdn.vidtube.dev/vidtube-media/images/abc.png");
    }

    #[test]
    fn test_key_from_url() {
        let config = s3(true);
        let url = config.object_url("images/abc.png");
        assert_eq!(config.key_from_url(&url), Some("images/abc.png"));
        assert_eq!(
            s3(false).key_from_url("https://cdn.vidtube.dev/videos/x.mp4"),
            Some("videos/x.mp4")
        );
    }

    #[test]
    fn test_key_from_foreign_url() {
        let config = s3(false);
        assert_eq!(config.key_from_url("https://elsewhere.example/videos/x.mp4"), None);
        assert_eq!(config.key_from_url("https://cdn.vidtube.dev/"), None);
        assert_eq!(config.key_from_url(""), None);
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("S3".parse::<MediaBackend>(), Ok(MediaBackend::S3));
        assert_eq!(" local ".parse::<MediaBackend>(), Ok(MediaBackend::Local));
        assert!("cloudinary".parse::<MediaBackend>().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_requires_bucket_for_s3() {
        std::env::set_var("MEDIA_BACKEND", "s3");
        std::env::remove_var("S3_BUCKET");
        assert!(MediaStoreConfig::from_env().is_err());

        std::env::set_var("S3_BUCKET", "vidtube-media");
        let config = MediaStoreConfig::from_env().unwrap();
        assert_eq!(config.backend, MediaBackend::S3);
        assert!(config.s3.base_url.contains("vidtube-media"));

        std::env::remove_var("MEDIA_BACKEND");
        std::env::remove_var("S3_BUCKET");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_to_local() {
        std::env::remove_var("MEDIA_BACKEND");
        std::env::remove_var("MEDIA_PROBE_DURATION");
        let config = MediaStoreConfig::from_env().unwrap();
        assert_eq!(config.backend, MediaBackend::Local);
        assert!(config.probe.enabled);
        assert_eq!(config.local.root_dir, PathBuf::from("./public/media"));
    }
}
