use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

/// Name of the in-flight upload directory inside the storage root.
/// Upload names starting with '.' are rejected, so it can never be overwritten.
pub const STAGING_DIR_NAME: &str = ".staging";

/// A top-level regular file found while scanning storage
#[derive(Debug, Clone)]
pub struct StorageEntry {
    pub name: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// A partially written upload. Dropping it removes the temporary file.
pub struct StagedUpload {
    temp: NamedTempFile,
    file: tokio::fs::File,
    written: u64,
}

impl StagedUpload {
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.file.write_all(chunk).await?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }
}

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Opens a fresh temporary file on the same file system as the final paths.
    async fn create_staging(&self) -> Result<StagedUpload>;

    /// Atomically moves a staged upload to its final name, replacing any existing file.
    async fn commit(&self, staged: StagedUpload, name: &str) -> Result<StorageEntry>;

    /// Lists top-level regular files in enumeration order.
    async fn list_entries(&self) -> Result<Vec<StorageEntry>>;

    /// Final on-disk path for a stored name.
    fn file_path(&self, name: &str) -> PathBuf;

    async fn is_available(&self) -> bool;
}

pub struct LocalStorageService {
    root: PathBuf,
    staging: PathBuf,
}

impl LocalStorageService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let staging = root.join(STAGING_DIR_NAME);
        Self { root, staging }
    }

    /// Creates the storage root and its staging directory if missing.
    pub async fn ensure_layout(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.staging)
            .await
            .with_context(|| format!("creating {}", self.staging.display()))?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging
    }
}

fn modified_utc(metadata: &std::fs::Metadata) -> Option<DateTime<Utc>> {
    metadata.modified().ok().map(DateTime::<Utc>::from)
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn create_staging(&self) -> Result<StagedUpload> {
        // The staging dir may have been removed by hand while the server runs
        tokio::fs::create_dir_all(&self.staging).await?;

        let staging = self.staging.clone();
        let (temp, std_file) = tokio::task::spawn_blocking(move || -> std::io::Result<_> {
            let temp = tempfile::Builder::new()
                .prefix("upload-")
                .tempfile_in(&staging)?;
            let file = temp.reopen()?;
            Ok((temp, file))
        })
        .await??;

        Ok(StagedUpload {
            temp,
            file: tokio::fs::File::from_std(std_file),
            written: 0,
        })
    }

    async fn commit(&self, staged: StagedUpload, name: &str) -> Result<StorageEntry> {
        let StagedUpload {
            temp, mut file, ..
        } = staged;

        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        let final_path = self.file_path(name);
        let target = final_path.clone();
        // On failure the returned PersistError still owns the temp file and removes it on drop
        tokio::task::spawn_blocking(move || temp.persist(&target))
            .await?
            .map_err(|e| e.error)?;

        let metadata = tokio::fs::metadata(&final_path).await?;
        Ok(StorageEntry {
            name: name.to_string(),
            size: metadata.len(),
            last_modified: modified_utc(&metadata),
        })
    }

    async fn list_entries(&self) -> Result<Vec<StorageEntry>> {
        let mut dir = tokio::fs::read_dir(&self.root)
            .await
            .with_context(|| format!("reading {}", self.root.display()))?;
        let mut entries = Vec::new();

        while let Some(entry) = dir.next_entry().await? {
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::warn!("Skipping non UTF-8 entry in storage: {:?}", raw);
                    continue;
                }
            };

            // Follows symlinks; an entry removed mid-scan is simply no longer stored
            let metadata = match tokio::fs::metadata(entry.path()).await {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::debug!("Skipping {} during scan: {}", name, e);
                    continue;
                }
            };

            if !metadata.is_file() {
                continue;
            }

            entries.push(StorageEntry {
                name,
                size: metadata.len(),
                last_modified: modified_utc(&metadata),
            });
        }

        Ok(entries)
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    async fn is_available(&self) -> bool {
        tokio::fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}
