//! `multipart/form-data` collection
//!
//! File parts are streamed into temp files under the upload directory and
//! removed when the returned [`UploadedFile`] is dropped. Text parts are
//! buffered in memory.

use crate::config::UploadConfig;
use crate::error::AppError;
use actix_multipart::Multipart;
use futures_util::StreamExt;
use std::collections::HashMap;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

const MAX_TEXT_FIELD_BYTES: usize = 16 * 1024;

/// A file field the endpoint accepts
#[derive(Debug, Clone, Copy)]
pub struct FileSpec {
    pub name: &'static str,
    pub max_count: usize,
}

impl FileSpec {
    pub const fn single(name: &'static str) -> Self {
        Self { name, max_count: 1 }
    }
}

#[derive(Debug)]
pub struct UploadedFile {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: u64,
    temp: NamedTempFile,
}

impl UploadedFile {
    pub fn path(&self) -> &Path {
        self.temp.path()
    }
}

#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, Vec<UploadedFile>>,
}

impl MultipartForm {
    /// Trimmed text value, `None` when missing or blank
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// First file uploaded under `name`
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        let files = self.files.get_mut(name)?;
        if files.is_empty() {
            None
        } else {
            Some(files.remove(0))
        }
    }
}

/// Drain the multipart stream, enforcing the accepted file fields and limits
pub async fn collect_multipart(
    mut payload: Multipart,
    specs: &[FileSpec],
    config: &UploadConfig,
) -> Result<MultipartForm, AppError> {
    let mut form = MultipartForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item?;

        let (name, file_name) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().unwrap_or_default().to_string(),
                cd.get_filename().map(|f| f.to_string()),
            ),
            None => (String::new(), None),
        };
        if name.is_empty() {
            return Err(AppError::BadRequest(
                "Multipart part without a field name".to_string(),
            ));
        }

        let Some(file_name) = file_name else {
            let mut value = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk?;
                if value.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
                    return Err(AppError::PayloadTooLarge(format!(
                        "Field '{}' exceeds {} bytes",
                        name, MAX_TEXT_FIELD_BYTES
                    )));
                }
                value.extend_from_slice(&chunk);
            }
            let value = String::from_utf8(value).map_err(|_| {
                AppError::BadRequest(format!("Field '{}' is not valid UTF-8", name))
            })?;
            form.fields.insert(name, value);
            continue;
        };

        let spec = specs
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| AppError::BadRequest(format!("Unexpected file field '{}'", name)))?;

        // Browsers send an empty part for an untouched file input
        if file_name.is_empty() {
            while let Some(chunk) = field.next().await {
                chunk?;
            }
            continue;
        }

        let already = form.files.get(&name).map_or(0, Vec::len);
        if already >= spec.max_count {
            return Err(AppError::BadRequest(format!(
                "Too many files for field '{}' (max {})",
                name, spec.max_count
            )));
        }

        tokio::fs::create_dir_all(&config.temp_dir).await?;
        let temp = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&extension_suffix(&file_name))
            .tempfile_in(&config.temp_dir)?;

        let mut out = tokio::fs::File::from_std(temp.reopen()?);
        let mut size: u64 = 0;
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            size += chunk.len() as u64;
            if size > config.max_file_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "File '{}' exceeds {} bytes",
                    name, config.max_file_bytes
                )));
            }
            out.write_all(&chunk).await?;
        }
        out.flush().await?;

        let content_type = field.content_type().map(|m| m.to_string());
        tracing::debug!(field = %name, size, "Buffered multipart file");

        form.files.entry(name.clone()).or_default().push(UploadedFile {
            field: name,
            file_name: Some(file_name),
            content_type,
            size,
            temp,
        });
    }

    Ok(form)
}

/// `.ext` taken from the client file name when it is plain alphanumeric
fn extension_suffix(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 10 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}
