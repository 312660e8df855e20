use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

pub const DEFAULT_LEVEL: u8 = 5;

/// One article link found on a listing page, annotated with the heading
/// path active when its list item was encountered. Records are immutable
/// once emitted; `hierarchy` is a snapshot, not a live view of the
/// traversal stack. Duplicate titles across pages are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub hierarchy: Vec<String>,
    #[serde(default = "default_level")]
    pub level: u8,
}

fn default_level() -> u8 {
    DEFAULT_LEVEL
}

/// Write the full record set as a pretty JSON array. Key order follows
/// field declaration order, so historical documents diff cleanly.
pub fn save_records(path: &Path, records: &[ArticleRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Load the record set written by the collector. Any read or shape problem
/// is a `MalformedDocument`, raised before the generator produces output.
pub fn load_records(path: &Path) -> Result<Vec<ArticleRecord>, GenerateError> {
    let malformed = |reason: String| GenerateError::MalformedDocument {
        path: path.display().to_string(),
        reason,
    };
    let json = fs::read_to_string(path).map_err(|e| malformed(e.to_string()))?;
    serde_json::from_str(&json).map_err(|e| malformed(e.to_string()))
}
