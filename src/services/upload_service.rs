use crate::api::error::AppError;
use crate::models::StoredFile;
use crate::services::storage::StorageService;
use crate::utils::validation::{sanitize_filename, validate_file_size};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};

const READ_BUFFER_SIZE: usize = 8192;

pub struct UploadService {
    storage: Arc<dyn StorageService>,
    max_upload_bytes: usize,
}

impl UploadService {
    pub fn new(storage: Arc<dyn StorageService>, max_upload_bytes: usize) -> Self {
        Self {
            storage,
            max_upload_bytes,
        }
    }

    /// Streams one upload into staging, then moves it to `storage/<sanitized name>`.
    ///
    /// An existing file with the same name is replaced. On any error nothing is
    /// left behind in the storage directory.
    pub async fn accept(
        &self,
        mut reader: impl AsyncRead + Unpin + Send,
        original_name: &str,
    ) -> Result<StoredFile, AppError> {
        let filename =
            sanitize_filename(original_name).map_err(|e| AppError::BadRequest(e.to_string()))?;

        let mut staged = self.storage.create_staging().await.map_err(|e| {
            AppError::StorageWriteFailed(format!("could not create staging file: {}", e))
        })?;

        let mut buffer = [0u8; READ_BUFFER_SIZE];
        loop {
            let n = reader
                .read(&mut buffer)
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
            if n == 0 {
                break;
            }

            let total = staged.written() as usize + n;
            if let Err(e) = validate_file_size(total, self.max_upload_bytes) {
                tracing::warn!("Upload of {} aborted: {}", filename, e);
                return Err(AppError::PayloadTooLarge(e.to_string()));
            }

            staged
                .write_chunk(&buffer[..n])
                .await
                .map_err(|e| AppError::StorageWriteFailed(e.to_string()))?;
        }

        let written = staged.written();
        let entry = self
            .storage
            .commit(staged, &filename)
            .await
            .map_err(|e| AppError::StorageWriteFailed(e.to_string()))?;

        tracing::info!("Stored upload {} ({} bytes)", filename, written);

        Ok(StoredFile::new(
            entry.name,
            Some(entry.size),
            entry.last_modified,
        ))
    }
}
