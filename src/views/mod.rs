//! HTML view model for the listing page.

use crate::models::{FileListing, StatsSummary, StoredFile};
use crate::services::classifier::StatsBucket;
use askama::Template;
use chrono::NaiveDate;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except unreserved URL characters gets escaped in `/uploads/` links
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

pub fn upload_href(name: &str) -> String {
    format!("/uploads/{}", utf8_percent_encode(name, PATH_SEGMENT))
}

#[derive(Debug, Clone)]
pub struct FileCard {
    pub name: String,
    pub href: String,
    pub label: &'static str,
    pub color: &'static str,
    pub date: String,
}

impl FileCard {
    pub fn new(file: &StoredFile, today: NaiveDate) -> Self {
        let date = file
            .modified
            .map(|m| m.date_naive())
            .unwrap_or(today)
            .format("%Y-%m-%d")
            .to_string();

        Self {
            name: file.name.clone(),
            href: upload_href(&file.name),
            label: file.category.label(),
            color: file.category.color(),
            date,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: &'static str,
    pub color: &'static str,
    pub count: usize,
    pub start_pct: f64,
    pub end_pct: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PieChart {
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// One slice per non-empty bucket, laid out clockwise from 0%.
    pub fn from_stats(stats: &StatsSummary) -> Self {
        if stats.total == 0 {
            return Self::default();
        }

        let total = stats.total as f64;
        let mut cumulative = 0usize;
        let slices = StatsBucket::ALL
            .iter()
            .filter_map(|bucket| {
                let count = stats.count(*bucket);
                if count == 0 {
                    return None;
                }
                let start_pct = cumulative as f64 * 100.0 / total;
                cumulative += count;
                let end_pct = cumulative as f64 * 100.0 / total;
                Some(PieSlice {
                    label: bucket.label(),
                    color: bucket.chart_color(),
                    count,
                    start_pct,
                    end_pct,
                })
            })
            .collect();

        Self { slices }
    }

    /// CSS `background` value rendering the chart
    pub fn gradient(&self) -> String {
        if self.slices.is_empty() {
            return "#3f3f46".to_string();
        }
        let stops: Vec<String> = self
            .slices
            .iter()
            .map(|s| format!("{} {:.2}% {:.2}%", s.color, s.start_pct, s.end_pct))
            .collect();
        format!("conic-gradient({})", stops.join(", "))
    }
}

#[derive(Template)]
#[template(path = "files.html")]
pub struct FilesPage {
    pub title: String,
    pub cards: Vec<FileCard>,
    pub stats: StatsSummary,
    pub pie: PieChart,
}

impl FilesPage {
    pub fn new(listing: &FileListing, title: &str, today: NaiveDate) -> Self {
        Self {
            title: title.to_string(),
            cards: listing
                .files
                .iter()
                .map(|f| FileCard::new(f, today))
                .collect(),
            stats: listing.stats,
            pie: PieChart::from_stats(&listing.stats),
        }
    }
}
