//! Media storage for uploaded videos and images
//!
//! Uploads a temp file to the configured backend and hands back its public
//! URL, plus the duration when the file is a video. Two backends exist:
//! S3 for deployments and a local directory for development.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

pub mod config;
pub mod local;
pub mod probe;
pub mod s3;

pub use config::{LocalConfig, MediaBackend, MediaStoreConfig, ProbeConfig, S3Config};
pub use local::LocalMediaStore;
pub use probe::DurationProbe;
pub use s3::S3MediaStore;

/// Kind of uploaded media, decides key prefix and probing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Directory or key prefix objects of this kind live under
    pub fn prefix(&self) -> &'static str {
        match self {
            MediaKind::Image => "images",
            MediaKind::Video => "videos",
        }
    }
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMedia {
    pub url: String,
    /// Seconds, only known for probed videos
    pub duration: Option<f64>,
    pub bytes: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum MediaStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("delete failed: {0}")]
    Delete(String),

    #[error("url is not managed by this store: {0}")]
    ForeignUrl(String),

    #[error("media store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store the file at `path` and return where it can be fetched from.
    async fn upload(
        &self,
        path: &Path,
        kind: MediaKind,
        content_type: Option<&str>,
    ) -> Result<StoredMedia, MediaStoreError>;

    /// Remove a previously uploaded object by its public URL.
    ///
    /// Deleting an object that no longer exists succeeds.
    async fn delete(&self, url: &str, kind: MediaKind) -> Result<(), MediaStoreError>;

    async fn health_check(&self) -> Result<(), MediaStoreError> {
        Ok(())
    }
}

/// Build the store selected by `config.backend`
pub async fn build_media_store(
    config: &MediaStoreConfig,
) -> Result<Arc<dyn MediaStore>, MediaStoreError> {
    let probe = DurationProbe::new(config.probe.clone());
    let store: Arc<dyn MediaStore> = match config.backend {
        MediaBackend::Local => Arc::new(LocalMediaStore::new(config.local.clone(), probe).await?),
        MediaBackend::S3 => Arc::new(S3MediaStore::new(config.s3.clone(), probe).await),
    };

    tracing::info!(backend = ?config.backend, "Media store initialized");
    Ok(store)
}

/// `{prefix}/{uuid}.{ext}` for a freshly uploaded file
pub(crate) fn object_key(kind: MediaKind, path: &Path) -> String {
    let id = uuid::Uuid::new_v4();
    match path
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
    {
        Some(ext) => format!("{}/{}.{}", kind.prefix(), id, ext.to_ascii_lowercase()),
        None => format!("{}/{}", kind.prefix(), id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_keeps_extension() {
        let key = object_key(MediaKind::Video, Path::new("/tmp/upload-abc.MP4"));
        assert!(key.starts_with("videos/"));
        assert!(key.ends_with(".mp4"));
    }

    #[test]
    fn test_object_key_without_extension() {
        let key = object_key(MediaKind::Image, Path::new("/tmp/upload"));
        assert!(key.starts_with("images/"));
        assert!(!key.contains('.'));
    }

    #[test]
    fn test_object_key_drops_odd_extension() {
        let key = object_key(MediaKind::Image, Path::new("/tmp/upload.p%g"));
        assert!(!key.contains('%'));
    }
}
