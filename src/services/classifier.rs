//! Extension-based file taxonomies.
//!
//! Two independent tables live here. [`CATEGORY_TABLE`] drives the badge shown on
//! each listing card, [`STATS_BUCKET_TABLE`] drives the coarse counts in the
//! statistics sidebar. They overlap but are not the same: `.doc` counts as
//! [`StatsBucket::Word`] yet renders as [`Category::Unknown`], and `.zip` renders
//! as [`Category::Zip`] yet counts under [`StatsBucket::Others`].
//!
//! Extensions are matched lowercased and without the leading dot.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Image,
    Pdf,
    Spreadsheet,
    Css,
    JavaScript,
    Document,
    Html,
    Zip,
    SevenZip,
    Executable,
    Presentation,
    Cpp,
    Unknown,
}

impl Category {
    /// Badge text shown on a listing card
    pub fn label(self) -> &'static str {
        match self {
            Category::Image => "Image",
            Category::Pdf => "PDF",
            Category::Spreadsheet => "Spreadsheet",
            Category::Css => "CSS",
            Category::JavaScript => "JavaScript",
            Category::Document => "Document",
            Category::Html => "HTML",
            Category::Zip => "ZIP",
            Category::SevenZip => "7z",
            Category::Executable => "EXE",
            Category::Presentation => "PPT",
            Category::Cpp => "CPP",
            Category::Unknown => "Unknown",
        }
    }

    /// Tailwind background class for the badge
    pub fn color(self) -> &'static str {
        match self {
            Category::Image | Category::Document | Category::Cpp => "bg-blue-500",
            Category::Spreadsheet => "bg-green-500",
            Category::Css => "bg-cyan-500",
            Category::JavaScript | Category::Zip => "bg-yellow-500",
            Category::Html => "bg-orange-500",
            Category::Pdf | Category::SevenZip => "bg-red-500",
            Category::Executable | Category::Presentation => "bg-teal-500",
            Category::Unknown => "bg-gray-500",
        }
    }
}

/// Display taxonomy, evaluated top to bottom. First match wins.
pub const CATEGORY_TABLE: &[(&[&str], Category)] = &[
    (&["jpg", "png", "gif", "webp", "jfif"], Category::Image),
    (&["xlsx"], Category::Spreadsheet),
    (&["css"], Category::Css),
    (&["js"], Category::JavaScript),
    (&["docx"], Category::Document),
    (&["html"], Category::Html),
    (&["zip"], Category::Zip),
    (&["pdf"], Category::Pdf),
    (&["7z"], Category::SevenZip),
    (&["exe"], Category::Executable),
    (&["pptx"], Category::Presentation),
    (&["cpp"], Category::Cpp),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatsBucket {
    Images,
    Pdf,
    Word,
    Ppt,
    Others,
}

impl StatsBucket {
    pub const ALL: [StatsBucket; 5] = [
        StatsBucket::Images,
        StatsBucket::Pdf,
        StatsBucket::Word,
        StatsBucket::Ppt,
        StatsBucket::Others,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatsBucket::Images => "Images",
            StatsBucket::Pdf => "PDF",
            StatsBucket::Word => "Word",
            StatsBucket::Ppt => "PowerPoint",
            StatsBucket::Others => "Others",
        }
    }

    /// Slice color in the statistics pie chart
    pub fn chart_color(self) -> &'static str {
        match self {
            StatsBucket::Images => "#3b82f6",
            StatsBucket::Pdf => "#ef4444",
            StatsBucket::Word => "#6366f1",
            StatsBucket::Ppt => "#14b8a6",
            StatsBucket::Others => "#6b7280",
        }
    }
}

/// Statistics taxonomy, evaluated top to bottom. Unmatched extensions are `Others`.
pub const STATS_BUCKET_TABLE: &[(&[&str], StatsBucket)] = &[
    (&["jpg", "jpeg", "png", "gif", "webp", "jfif"], StatsBucket::Images),
    (&["pdf"], StatsBucket::Pdf),
    (&["doc", "docx"], StatsBucket::Word),
    (&["ppt", "pptx"], StatsBucket::Ppt),
];

fn normalize(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}

/// Maps an extension to its display category. Accepts `"PNG"`, `"png"` or `".png"`.
pub fn classify(ext: &str) -> Category {
    let ext = normalize(ext);
    CATEGORY_TABLE
        .iter()
        .find(|(exts, _)| exts.contains(&ext.as_str()))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Unknown)
}

/// Maps an extension to its statistics bucket.
pub fn bucket_for(ext: &str) -> StatsBucket {
    let ext = normalize(ext);
    STATS_BUCKET_TABLE
        .iter()
        .find(|(exts, _)| exts.contains(&ext.as_str()))
        .map(|(_, bucket)| *bucket)
        .unwrap_or(StatsBucket::Others)
}

/// Lowercased extension of a file name, without the dot. Empty when there is none.
pub fn extension_of(name: &str) -> String {
    std::path::Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}
