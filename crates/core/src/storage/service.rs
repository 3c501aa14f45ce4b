//! Storage service implementation using Apache OpenDAL.

use opendal::{Operator, services};
use uuid::Uuid;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Storage service for project documents and payment receipts.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .region(region);

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }

    /// Validate an upload against the document policy.
    ///
    /// # Errors
    ///
    /// Returns an error if file size or MIME type is invalid.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), StorageError> {
        if size > self.config.policy.max_file_size {
            return Err(StorageError::file_too_large(
                size,
                self.config.policy.max_file_size,
            ));
        }

        if !self.config.policy.is_mime_type_allowed(content_type) {
            return Err(StorageError::invalid_mime_type(content_type));
        }

        Ok(())
    }

    /// Storage key for a project document.
    ///
    /// Format: `projects/{project_id}/{sanitized_filename}`
    #[must_use]
    pub fn document_key(project_id: Uuid, filename: &str) -> String {
        format!("projects/{project_id}/{}", sanitize_filename(filename))
    }

    /// Storage key for a payment receipt.
    ///
    /// Format: `receipts/{payment_id}/{sanitized_filename}`
    #[must_use]
    pub fn receipt_key(payment_id: Uuid, filename: &str) -> String {
        format!("receipts/{payment_id}/{}", sanitize_filename(filename))
    }

    /// Validate and write a file to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy check or the storage write fails.
    pub async fn store(
        &self,
        key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<(), StorageError> {
        self.validate_upload(content_type, data.len() as u64)?;
        self.operator.write(key, data).await?;
        Ok(())
    }

    /// Read a file from storage.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the key does not exist.
    pub async fn load(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let buffer = self.operator.read(key).await?;
        Ok(buffer.to_vec())
    }

    /// Delete a file from storage. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        match self.operator.delete(key).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == opendal::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Provider name, for logging.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }
}

/// Replace path separators and control characters in a filename.
fn sanitize_filename(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "unnamed".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DocumentPolicy;

    fn test_service() -> StorageService {
        StorageService::from_config(StorageConfig::new(StorageProvider::local_fs("./test-storage")))
            .unwrap()
    }

    #[test]
    fn test_validate_upload_accepts_small_pdf() {
        let service = test_service();
        assert!(service.validate_upload("application/pdf", 1024).is_ok());
    }

    #[test]
    fn test_validate_upload_rejects_oversize() {
        let service = test_service();
        let result = service.validate_upload("application/pdf", DocumentPolicy::MAX_FILE_SIZE + 1);
        assert!(matches!(result, Err(StorageError::FileTooLarge { .. })));
    }

    #[test]
    fn test_validate_upload_accepts_exact_limit() {
        let service = test_service();
        assert!(
            service
                .validate_upload("application/pdf", DocumentPolicy::MAX_FILE_SIZE)
                .is_ok()
        );
    }

    #[test]
    fn test_validate_upload_rejects_non_pdf() {
        let service = test_service();
        let result = service.validate_upload("image/png", 1024);
        assert!(matches!(result, Err(StorageError::InvalidMimeType { .. })));
    }

    #[test]
    fn test_document_key_sanitizes() {
        let id = Uuid::nil();
        let key = StorageService::document_key(id, "site plan/../final.pdf");
        assert_eq!(
            key,
            format!("projects/{id}/site_plan_.._final.pdf")
        );
    }

    #[test]
    fn test_receipt_key_empty_filename() {
        let id = Uuid::nil();
        assert_eq!(
            StorageService::receipt_key(id, ""),
            format!("receipts/{id}/unnamed")
        );
    }

    #[tokio::test]
    async fn test_store_rejects_before_write() {
        let service = test_service();
        let result = service
            .store("projects/x/bad.png", "image/png", vec![1, 2, 3])
            .await;
        assert!(matches!(result, Err(StorageError::InvalidMimeType { .. })));
    }
}
