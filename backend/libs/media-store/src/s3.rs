//! S3 backend

use crate::config::S3Config;
use crate::probe::DurationProbe;
use crate::{object_key, MediaKind, MediaStore, MediaStoreError, StoredMedia};
use async_trait::async_trait;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct S3MediaStore {
    client: Arc<Client>,
    config: S3Config,
    probe: DurationProbe,
}

impl S3MediaStore {
    /// Build a client from the default credential chain
    pub async fn new(config: S3Config, probe: DurationProbe) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.path_style)
            .build();

        Self {
            client: Arc::new(Client::from_conf(s3_config)),
            config,
            probe,
        }
    }

    pub fn config(&self) -> &S3Config {
        &self.config
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn upload(
        &self,
        path: &Path,
        kind: MediaKind,
        content_type: Option<&str>,
    ) -> Result<StoredMedia, MediaStoreError> {
        let key = object_key(kind, path);
        let bytes = tokio::fs::metadata(path).await?.len();

        // Probe before the upload so the temp file is read locally
        let duration = match kind {
            MediaKind::Video => self.probe.duration(path).await,
            MediaKind::Image => None,
        };

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| MediaStoreError::Upload(format!("failed to read upload: {}", e)))?;

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .body(body)
            .content_type(content_type.unwrap_or(mime::APPLICATION_OCTET_STREAM.as_ref()))
            .cache_control("max-age=31536000")
            .send()
            .await
            .map_err(|e| {
                error!(bucket = %self.config.bucket, key = %key, error = %e, "S3 upload failed");
                MediaStoreError::Upload(e.to_string())
            })?;

        info!(key = %key, bytes, kind = kind.as_str(), "Uploaded media to S3");

        Ok(StoredMedia {
            url: self.config.object_url(&key),
            duration,
            bytes,
        })
    }

    async fn delete(&self, url: &str, kind: MediaKind) -> Result<(), MediaStoreError> {
        if url.is_empty() {
            return Ok(());
        }

        let key = self
            .config
            .key_from_url(url)
            .ok_or_else(|| MediaStoreError::ForeignUrl(url.to_string()))?;

        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| MediaStoreError::Delete(e.to_string()))?;

        info!(key = %key, kind = kind.as_str(), "Deleted media from S3");
        Ok(())
    }

    async fn health_check(&self) -> Result<(), MediaStoreError> {
        self.client
            .head_bucket()
            .bucket(&self.config.bucket)
            .send()
            .await
            .map_err(|e| MediaStoreError::Unavailable(e.to_string()))?;

        Ok(())
    }
}
