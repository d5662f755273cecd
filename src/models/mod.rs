use crate::services::classifier::{Category, StatsBucket, bucket_for, classify, extension_of};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A file present in the storage directory, identified by its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StoredFile {
    pub name: String,
    pub extension: String,
    pub size_bytes: Option<u64>,
    pub modified: Option<DateTime<Utc>>,
    pub category: Category,
}

impl StoredFile {
    pub fn new(
        name: impl Into<String>,
        size_bytes: Option<u64>,
        modified: Option<DateTime<Utc>>,
    ) -> Self {
        let name = name.into();
        let extension = extension_of(&name);
        let category = classify(&extension);
        Self {
            name,
            extension,
            size_bytes,
            modified,
            category,
        }
    }

    pub fn stats_bucket(&self) -> StatsBucket {
        bucket_for(&self.extension)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatsSummary {
    pub total: usize,
    pub images: usize,
    pub pdf: usize,
    pub word: usize,
    pub ppt: usize,
    pub others: usize,
}

impl StatsSummary {
    pub fn from_files(files: &[StoredFile]) -> Self {
        files.iter().fold(Self::default(), |mut stats, file| {
            stats.record(file.stats_bucket());
            stats
        })
    }

    pub fn record(&mut self, bucket: StatsBucket) {
        self.total += 1;
        match bucket {
            StatsBucket::Images => self.images += 1,
            StatsBucket::Pdf => self.pdf += 1,
            StatsBucket::Word => self.word += 1,
            StatsBucket::Ppt => self.ppt += 1,
            StatsBucket::Others => self.others += 1,
        }
    }

    pub fn count(&self, bucket: StatsBucket) -> usize {
        match bucket {
            StatsBucket::Images => self.images,
            StatsBucket::Pdf => self.pdf,
            StatsBucket::Word => self.word,
            StatsBucket::Ppt => self.ppt,
            StatsBucket::Others => self.others,
        }
    }
}

/// Result of one storage scan.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileListing {
    pub files: Vec<StoredFile>,
    pub stats: StatsSummary,
}

impl FileListing {
    pub fn new(files: Vec<StoredFile>) -> Self {
        let stats = StatsSummary::from_files(&files);
        Self { files, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(names: &[&str]) -> Vec<StoredFile> {
        names.iter().map(|n| StoredFile::new(*n, None, None)).collect()
    }

    #[test]
    fn test_stored_file_derives_extension_and_category() {
        let file = StoredFile::new("Photo.PNG", Some(42), None);
        assert_eq!(file.extension, "png");
        assert_eq!(file.category, Category::Image);
        assert_eq!(file.size_bytes, Some(42));

        let file = StoredFile::new("Makefile", None, None);
        assert_eq!(file.extension, "");
        assert_eq!(file.category, Category::Unknown);
    }

    #[test]
    fn test_reference_listing_stats() {
        let listing = FileListing::new(files(&[
            "report.pdf",
            "photo.png",
            "notes.docx",
            "deck.pptx",
            "archive.zip",
        ]));

        assert_eq!(
            listing.stats,
            StatsSummary {
                total: 5,
                images: 1,
                pdf: 1,
                word: 1,
                ppt: 1,
                others: 1,
            }
        );

        let categories: Vec<_> = listing.files.iter().map(|f| f.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::Pdf,
                Category::Image,
                Category::Document,
                Category::Presentation,
                Category::Zip,
            ]
        );
    }

    #[test]
    fn test_bucket_counts_sum_to_total() {
        let stats = StatsSummary::from_files(&files(&[
            "a.doc", "b.jpeg", "c.exe", "d", "e.ppt", "f.PDF", "g.7z", "h.webp",
        ]));
        let sum: usize = StatsBucket::ALL.iter().map(|b| stats.count(*b)).sum();
        assert_eq!(sum, stats.total);
        assert_eq!(stats.total, 8);
        assert_eq!(stats.word, 1);
        assert_eq!(stats.images, 2);
        assert_eq!(stats.others, 3);
    }

    #[test]
    fn test_empty_listing() {
        let listing = FileListing::new(Vec::new());
        assert_eq!(listing.stats, StatsSummary::default());
    }
}
