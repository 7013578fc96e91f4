// ABOUTME: Persistence of scraped article records.
// ABOUTME: Defines the RecordStore trait and a pretty-printed JSON file implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ScrapeError;
use crate::models::ArticleRecord;

/// Default output file name.
pub const DEFAULT_OUTPUT_FILE: &str = "scraped_articles.json";

/// Durable sink for a run's records.
pub trait RecordStore {
    fn save(&self, records: &[ArticleRecord]) -> Result<(), ScrapeError>;
}

/// Writes records as a pretty-printed UTF-8 JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_FILE)
    }
}

impl RecordStore for JsonFileStore {
    fn save(&self, records: &[ArticleRecord]) -> Result<(), ScrapeError> {
        let target = self.path.display().to_string();
        let json = serde_json::to_string_pretty(records).map_err(|e| {
            ScrapeError::storage(&target, "Serialize", Some(anyhow::Error::new(e)))
        })?;
        fs::write(&self.path, json)
            .map_err(|e| ScrapeError::storage(&target, "Write", Some(anyhow::Error::new(e))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleStub;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn record(title: &str) -> ArticleRecord {
        ArticleRecord::from_stub(
            ArticleStub {
                title: title.to_string(),
                url: "https://example.com/blogs/x".to_string(),
                excerpt: String::new(),
                published_date: "2024-01-01".to_string(),
            },
            "Grüße aus Köln — naïve café".to_string(),
            "Blog",
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        )
    }

    #[test]
    fn writes_pretty_json_with_literal_unicode() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("out.json"));
        store.save(&[record("One"), record("Two")]).unwrap();

        let written = fs::read_to_string(store.path()).unwrap();
        assert!(written.starts_with("[\n  {\n    \"title\": \"One\""));
        assert!(written.contains("Grüße aus Köln — naïve café"));
        assert!(!written.contains("\\u"));

        let back: Vec<ArticleRecord> = serde_json::from_str(&written).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[1].title, "Two");
    }

    #[test]
    fn writes_empty_array() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("empty.json"));
        store.save(&[]).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[test]
    fn missing_directory_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope").join("out.json"));
        let err = store.save(&[record("One")]).unwrap_err();
        assert!(err.is_storage());
        assert_eq!(err.op, "Write");
    }
}
