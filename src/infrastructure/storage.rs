use crate::config::AppConfig;
use crate::services::storage::LocalStorageService;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

pub async fn setup_storage(config: &AppConfig) -> Result<Arc<LocalStorageService>> {
    let storage = LocalStorageService::new(&config.storage_dir);
    storage.ensure_layout().await?;

    info!("📁 Local Storage: {}", storage.root().display());
    Ok(Arc::new(storage))
}
