//! Filesystem backend used in development

use crate::config::LocalConfig;
use crate::probe::DurationProbe;
use crate::{object_key, MediaKind, MediaStore, MediaStoreError, StoredMedia};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

pub struct LocalMediaStore {
    config: LocalConfig,
    probe: DurationProbe,
}

impl LocalMediaStore {
    /// Create the store, making sure the kind directories exist
    pub async fn new(config: LocalConfig, probe: DurationProbe) -> Result<Self, MediaStoreError> {
        for kind in [MediaKind::Image, MediaKind::Video] {
            tokio::fs::create_dir_all(config.root_dir.join(kind.prefix())).await?;
        }
        Ok(Self { config, probe })
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.config.public_base_url.trim_end_matches('/'), key)
    }

    fn path_for_url(&self, url: &str) -> Option<PathBuf> {
        let base = self.config.public_base_url.trim_end_matches('/');
        let key = url.strip_prefix(base)?.strip_prefix('/')?;
        let relative = Path::new(key);
        let safe = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        safe.then(|| self.config.root_dir.join(relative))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn upload(
        &self,
        path: &Path,
        kind: MediaKind,
        _content_type: Option<&str>,
    ) -> Result<StoredMedia, MediaStoreError> {
        let key = object_key(kind, path);
        let dest = self.config.root_dir.join(&key);

        let bytes = tokio::fs::copy(path, &dest).await?;
        let duration = match kind {
            MediaKind::Video => self.probe.duration(&dest).await,
            MediaKind::Image => None,
        };

        info!(key = %key, bytes, kind = kind.as_str(), "Stored media file locally");

        Ok(StoredMedia {
            url: self.url_for(&key),
            duration,
            bytes,
        })
    }

    async fn delete(&self, url: &str, kind: MediaKind) -> Result<(), MediaStoreError> {
        if url.is_empty() {
            return Ok(());
        }

        let path = self
            .path_for_url(url)
            .ok_or_else(|| MediaStoreError::ForeignUrl(url.to_string()))?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!(path = %path.display(), kind = kind.as_str(), "Deleted local media file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Local media file already gone");
                Ok(())
            }
            Err(e) => Err(MediaStoreError::Delete(e.to_string())),
        }
    }

    async fn health_check(&self) -> Result<(), MediaStoreError> {
        let meta = tokio::fs::metadata(&self.config.root_dir).await?;
        if meta.is_dir() {
            Ok(())
        } else {
            Err(MediaStoreError::Unavailable(format!(
                "{} is not a directory",
                self.config.root_dir.display()
            )))
        }
    }
}
