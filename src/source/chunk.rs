use serde::Serialize;

use super::describe::{chunk_title, describe};
use crate::language::{patterns::DECLARATION, LanguageId};

/// Preferred number of lines per chunk.
pub const TARGET_CHUNK_LINES: usize = 40;

/// Minimum distance between two declaration breakpoints.
const MIN_BREAK_GAP: usize = TARGET_CHUNK_LINES.div_ceil(3);

/// A chunk is emitted once it spans at least this many lines.
const MIN_CHUNK_SPAN: usize = TARGET_CHUNK_LINES / 2;

/// A slice of one file's normalized text, the unit a user types against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub id: String,
    /// Exact characters to type. Every chunk except the last ends with the
    /// newline that separates it from the next one.
    pub content: String,
    /// 1-based, inclusive line range in the normalized file.
    pub start_line: usize,
    pub end_line: usize,
    pub title: String,
    pub description: String,
}

impl Chunk {
    pub fn line_count(&self) -> usize {
        self.end_line + 1 - self.start_line
    }
}

/// Split normalized text into logically aligned chunks.
///
/// Output is fully determined by `text` and `language`.
pub fn segment(text: &str, language: LanguageId) -> Vec<Chunk> {
    let lines: Vec<&str> = text.split('\n').collect();

    if lines.len() <= TARGET_CHUNK_LINES {
        return vec![Chunk {
            id: chunk_id(0),
            content: text.to_string(),
            start_line: 1,
            end_line: lines.len(),
            title: "Complete File".to_string(),
            description: describe(text, language),
        }];
    }

    let breakpoints = find_breakpoints(&lines);
    let last_idx = breakpoints.len() - 1;
    let mut chunks = Vec::new();
    let mut start = 0;

    for (i, &breakpoint) in breakpoints.iter().enumerate() {
        if breakpoint.saturating_sub(start) >= MIN_CHUNK_SPAN || i == last_idx {
            chunks.push(build_chunk(&lines, start, breakpoint, chunks.len(), language));
            start = breakpoint + 1;
        }
    }

    if start < lines.len() {
        chunks.push(build_chunk(
            &lines,
            start,
            lines.len() - 1,
            chunks.len(),
            language,
        ));
    }

    log::debug!(
        "segmented {} lines of {} into {} chunks",
        lines.len(),
        language,
        chunks.len()
    );
    chunks
}

/// Line indices that end a logical section. The final line is always one.
fn find_breakpoints(lines: &[&str]) -> Vec<usize> {
    let mut breakpoints = Vec::new();
    let mut depth: i64 = 0;
    let mut last_break = 0;

    for (i, line) in lines.iter().enumerate() {
        depth += line.matches('{').count() as i64;
        depth -= line.matches('}').count() as i64;

        let is_declaration = DECLARATION.is_match(line.trim());
        if is_declaration && depth <= 1 && i - last_break >= MIN_BREAK_GAP && i > 0 {
            // break before the declaration so it opens the next chunk
            breakpoints.push(i - 1);
            last_break = i;
        }

        if i - last_break >= TARGET_CHUNK_LINES && depth == 0 {
            breakpoints.push(i);
            last_break = i;
        }
    }

    let last_line = lines.len() - 1;
    if breakpoints.last() != Some(&last_line) {
        breakpoints.push(last_line);
    }

    breakpoints
}

fn build_chunk(
    lines: &[&str],
    start: usize,
    end: usize,
    index: usize,
    language: LanguageId,
) -> Chunk {
    let body = &lines[start..=end];
    let mut content = body.join("\n");
    if end + 1 < lines.len() {
        content.push('\n');
    }

    Chunk {
        id: chunk_id(index),
        description: describe(&content, language),
        title: chunk_title(body, index + 1),
        content,
        start_line: start + 1,
        end_line: end + 1,
    }
}

fn chunk_id(index: usize) -> String {
    format!("chunk-{index}")
}
