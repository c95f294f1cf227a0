//! Turns raw file text into typing material: line endings are normalized,
//! comments stripped, and the result split into chunks.

pub mod chunk;
pub mod describe;
pub mod strip;

pub use chunk::{segment, Chunk, TARGET_CHUNK_LINES};
pub use describe::{chunk_title, describe};
pub use strip::{strip_comments, strip_with_profile};

use crate::language::LanguageId;

/// Normalized text of one file and its chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedSource {
    pub content: String,
    pub chunks: Vec<Chunk>,
}

/// Convert `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Run the full pipeline for one file. Pure, so many files can be
/// processed in parallel.
pub fn process(raw: &str, language: LanguageId) -> ProcessedSource {
    let normalized = normalize_line_endings(raw);
    let stripped = strip_comments(&normalized, language);
    let content = stripped.trim_end().to_string();
    let chunks = segment(&content, language);

    log::debug!(
        "processed {} source: {} -> {} bytes, {} chunks",
        language,
        raw.len(),
        content.len(),
        chunks.len()
    );

    ProcessedSource { content, chunks }
}
