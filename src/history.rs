use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::stats::Statistics;

/// One finished chunk, as stored in the history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: String,
    pub file: String,
    pub chunk_id: String,
    pub title: String,
    pub wpm: u32,
    pub accuracy: u32,
    pub errors: usize,
    pub elapsed_secs: f64,
}

impl HistoryRecord {
    pub fn new(file: &str, chunk_id: &str, title: &str, stats: &Statistics) -> Self {
        Self {
            date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            file: file.to_string(),
            chunk_id: chunk_id.to_string(),
            title: title.to_string(),
            wpm: stats.wpm,
            accuracy: stats.accuracy,
            errors: stats.errors,
            elapsed_secs: (stats.elapsed.as_secs_f64() * 100.0).round() / 100.0,
        }
    }
}

/// Append-only CSV log of completed chunks.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &HistoryRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        // the header is written only when the log is created
        let needs_header = !self.path.exists();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| Error::io(&self.path, e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush().map_err(|e| Error::io(&self.path, e))?;
        Ok(())
    }

    /// All records in file order. A missing log is empty.
    pub fn read_all(&self) -> Result<Vec<HistoryRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let records = reader.deserialize().collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }
}
