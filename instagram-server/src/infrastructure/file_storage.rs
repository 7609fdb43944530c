use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::data::file_storage::{FileStorage, ImageUpload};
use crate::domain::error::DomainError;

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Stores uploads as `<uuid>.<ext>` inside a single directory.
#[derive(Debug, Clone)]
pub(crate) struct LocalFileStorage {
    root: PathBuf,
    max_bytes: usize,
}

impl LocalFileStorage {
    pub(crate) fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save_file(&self, upload: &ImageUpload) -> Result<String, DomainError> {
        if upload.is_empty() {
            return Err(DomainError::Validation {
                field: "profile_img",
                message: "must not be empty",
            });
        }
        if upload.bytes.len() > self.max_bytes {
            return Err(DomainError::Validation {
                field: "profile_img",
                message: "exceeds the upload size limit",
            });
        }
        let extension = resolve_extension(upload)?;
        let file_name = format!("{}.{extension}", Uuid::new_v4());

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|err| DomainError::Unexpected(format!("create upload dir: {err}")))?;
        tokio::fs::write(self.root.join(&file_name), &upload.bytes)
            .await
            .map_err(|err| DomainError::Unexpected(format!("write upload: {err}")))?;

        debug!(file_name = %file_name, size = upload.bytes.len(), "stored upload");
        Ok(file_name)
    }

    async fn remove_file(&self, file_name: &str) -> Result<(), DomainError> {
        if Path::new(file_name).file_name().and_then(|n| n.to_str()) != Some(file_name) {
            return Err(DomainError::Unexpected(format!(
                "refusing to remove path outside upload dir: {file_name}"
            )));
        }
        match tokio::fs::remove_file(self.root.join(file_name)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(file_name, "upload already removed");
                Ok(())
            }
            Err(err) => Err(DomainError::Unexpected(format!("remove upload: {err}"))),
        }
    }
}

fn resolve_extension(upload: &ImageUpload) -> Result<&'static str, DomainError> {
    let from_name = upload
        .file_name
        .as_deref()
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .and_then(|ext| ALLOWED_EXTENSIONS.into_iter().find(|allowed| *allowed == ext));

    let from_content_type = || match upload.content_type.as_deref() {
        Some("image/jpeg") => Some("jpg"),
        Some("image/png") => Some("png"),
        Some("image/gif") => Some("gif"),
        Some("image/webp") => Some("webp"),
        _ => None,
    };

    from_name
        .or_else(from_content_type)
        .ok_or(DomainError::Validation {
            field: "profile_img",
            message: "must be a jpg, png, gif or webp image",
        })
}
