/// HTTP handlers for VidTube Service
///
/// Path ids arrive as raw strings and are parsed here, so a malformed id is
/// always a 400 with our envelope and never reaches the database.
pub mod comments;
pub mod dashboard;
pub mod health;
pub mod likes;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;
pub mod users;
pub mod videos;

use crate::error::AppError;
use crate::metrics;
use crate::upload::UploadedFile;
use crate::AppState;
use media_store::{MediaKind, StoredMedia};
use uuid::Uuid;

/// Parse a path or query id, `entity` names it in the error message
pub(crate) fn parse_id(raw: &str, entity: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::BadRequest(format!("Invalid {} id", entity)))
}

/// Trimmed, non-blank text or a 400 with `message`
pub(crate) fn require_text(value: Option<&str>, message: &str) -> Result<String, AppError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest(message.to_string()))
}

/// Optional text: `None` when absent or blank
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub(crate) fn ensure_owner(owner: Uuid, caller: Uuid, entity: &str) -> Result<(), AppError> {
    if owner == caller {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "You do not have permission to modify this {}",
            entity
        )))
    }
}

/// Push a buffered upload to the media store, counting the outcome
pub(crate) async fn store_upload(
    state: &AppState,
    file: &UploadedFile,
    kind: MediaKind,
) -> Result<StoredMedia, AppError> {
    let result = state
        .media
        .upload(file.path(), kind, file.content_type.as_deref())
        .await;
    metrics::record_upload(kind.as_str(), result.is_ok());

    let stored = result.map_err(|e| {
        tracing::error!(field = %file.field, error = %e, "Media upload failed");
        AppError::from(e)
    })?;
    tracing::info!(field = %file.field, url = %stored.url, bytes = stored.bytes, "Media uploaded");
    Ok(stored)
}

/// Best-effort removal of a stored object. Failures are logged only.
pub(crate) async fn discard_media(state: &AppState, url: &str, kind: MediaKind) {
    if url.is_empty() {
        return;
    }
    if let Err(e) = state.media.delete(url, kind).await {
        tracing::warn!(url = %url, kind = kind.as_str(), error = %e, "Failed to delete media");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "video").unwrap(), id);

        match parse_id("not-a-uuid", "video") {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Invalid video id"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text(Some("  hi "), "x").unwrap(), "hi");
        assert!(require_text(Some("   "), "Content is required").is_err());
        assert!(require_text(None, "Content is required").is_err());
        assert_eq!(optional_text(Some(" ")), None);
    }

    #[test]
    fn test_ensure_owner() {
        let a = Uuid::new_v4();
        assert!(ensure_owner(a, a, "video").is_ok());
        assert!(matches!(
            ensure_owner(a, Uuid::new_v4(), "video"),
            Err(AppError::Forbidden(_))
        ));
    }
}
