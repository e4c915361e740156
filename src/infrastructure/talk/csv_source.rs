//! CSV-backed talk source

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::{DomainError, Talk, TalkSource};

const TITLE_COLUMN: &str = "title";
const TEXT_COLUMN: &str = "text";

/// Cell values treated as a missing description
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-NaN", "-nan", "<NA>", "N/A", "NA", "NULL", "NaN", "None",
    "n/a", "nan", "null",
];

/// Loads talks from a CSV file with `title` and `text` columns.
///
/// Data rows are numbered from zero in file order and that number becomes
/// the talk id.
#[derive(Debug, Clone)]
pub struct CsvTalkSource {
    path: PathBuf,
}

impl CsvTalkSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, data: &[u8]) -> Result<Vec<Talk>, DomainError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data);

        let headers = reader
            .headers()
            .map_err(|e| self.error(format!("Failed to read header: {}", e)))?
            .clone();

        let title_idx = column_index(&headers, TITLE_COLUMN)
            .ok_or_else(|| self.error(format!("Missing column '{}'", TITLE_COLUMN)))?;
        let text_idx = column_index(&headers, TEXT_COLUMN)
            .ok_or_else(|| self.error(format!("Missing column '{}'", TEXT_COLUMN)))?;

        let mut talks = Vec::new();

        for (row, record) in reader.records().enumerate() {
            let record =
                record.map_err(|e| self.error(format!("Malformed row {}: {}", row, e)))?;
            let id = u32::try_from(row)
                .map_err(|_| self.error(format!("Too many rows ({})", row)))?;

            let title = record.get(title_idx).unwrap_or_default();
            if title.is_empty() {
                warn!("Talk {} in {} has an empty title", id, self.path.display());
            }

            let text = record
                .get(text_idx)
                .filter(|text| !MISSING_MARKERS.contains(text))
                .map(str::to_string);

            talks.push(Talk::new(id, title, text));
        }

        Ok(talks)
    }

    fn error(&self, message: String) -> DomainError {
        DomainError::dataset(format!("{}: {}", self.path.display(), message))
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|header| header.trim() == name)
}

#[async_trait]
impl TalkSource for CsvTalkSource {
    async fn load(&self) -> Result<Vec<Talk>, DomainError> {
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|e| self.error(format!("Failed to read file: {}", e)))?;

        let talks = self.parse(&data)?;

        info!("Loaded {} talks from {}", talks.len(), self.path.display());
        for talk in talks.iter().take(5) {
            debug!("talk {}: {}", talk.id(), talk.title());
        }

        Ok(talks)
    }

    fn source_name(&self) -> &'static str {
        "csv"
    }
}
