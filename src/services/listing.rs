use crate::api::error::AppError;
use crate::models::{FileListing, StoredFile};
use crate::services::storage::StorageService;
use std::sync::Arc;

/// Scans storage and classifies what it finds. Nothing is cached: every call
/// reflects the directory as it is right now.
pub struct ListingService {
    storage: Arc<dyn StorageService>,
}

impl ListingService {
    pub fn new(storage: Arc<dyn StorageService>) -> Self {
        Self { storage }
    }

    pub async fn list(&self) -> Result<FileListing, AppError> {
        let entries = self
            .storage
            .list_entries()
            .await
            .map_err(|e| AppError::StorageReadFailed(format!("{:#}", e)))?;

        let files: Vec<StoredFile> = entries
            .into_iter()
            .map(|entry| StoredFile::new(entry.name, Some(entry.size), entry.last_modified))
            .collect();

        let listing = FileListing::new(files);
        tracing::debug!(
            total = listing.stats.total,
            images = listing.stats.images,
            pdf = listing.stats.pdf,
            "Scanned storage"
        );
        Ok(listing)
    }
}
