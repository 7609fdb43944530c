use async_trait::async_trait;

use crate::domain::error::DomainError;

/// URL prefix under which stored files are publicly served.
pub(crate) const PUBLIC_UPLOAD_PREFIX: &str = "/uploads";

/// An uploaded image as received from a multipart form field.
#[derive(Debug, Clone, Default)]
pub(crate) struct ImageUpload {
    pub(crate) file_name: Option<String>,
    pub(crate) content_type: Option<String>,
    pub(crate) bytes: Vec<u8>,
}

impl ImageUpload {
    pub(crate) fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[async_trait]
pub(crate) trait FileStorage: Send + Sync {
    /// Persists a non-empty upload and returns the stored file name.
    async fn save_file(&self, upload: &ImageUpload) -> Result<String, DomainError>;
    async fn remove_file(&self, file_name: &str) -> Result<(), DomainError>;
}
