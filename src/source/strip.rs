use once_cell::sync::Lazy;
use regex::Regex;

use crate::language::{CommentProfile, LanguageId};

static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Remove comments from `text` using the language's comment profile.
///
/// Languages without a profile are returned unchanged.
pub fn strip_comments(text: &str, language: LanguageId) -> String {
    match language.comment_profile() {
        Some(profile) => strip_with_profile(text, profile),
        None => text.to_string(),
    }
}

/// Best-effort comment removal, one line at a time.
///
/// There is no tokenizer behind this: block markers inside string literals
/// are treated as real comments, and an unterminated block comment swallows
/// the rest of the input.
pub fn strip_with_profile(text: &str, profile: &CommentProfile) -> String {
    let mut kept: Vec<String> = Vec::new();
    let mut in_block = false;

    for raw in text.split('\n') {
        let line = match profile.block {
            Some(markers) => match strip_blocks(raw, markers, &mut in_block) {
                Some(line) => line,
                None => continue,
            },
            None => raw.to_string(),
        };

        if profile.is_line_comment(&line) {
            continue;
        }

        let line = strip_inline(line, profile);

        if line.trim().is_empty() {
            // at most one blank line in a row, and never a leading one
            if kept.last().is_some_and(|prev| !prev.trim().is_empty()) {
                kept.push(String::new());
            }
        } else {
            kept.push(line);
        }
    }

    let joined = kept.join("\n");
    BLANK_RUNS.replace_all(&joined, "\n\n").trim().to_string()
}

/// Remove every block comment span on `line`, tracking whether the line
/// ends inside an open block. Returns `None` when the whole line is inside
/// a block comment.
fn strip_blocks(line: &str, (start, end): (&str, &str), in_block: &mut bool) -> Option<String> {
    let mut rest = line;
    let mut touched = false;

    if *in_block {
        let idx = rest.find(end)?;
        rest = &rest[idx + end.len()..];
        *in_block = false;
        touched = true;
    }

    let mut out = String::with_capacity(rest.len());
    while let Some(idx) = rest.find(start) {
        touched = true;
        out.push_str(&rest[..idx]);
        let after = &rest[idx + start.len()..];
        match after.find(end) {
            Some(end_idx) => rest = &after[end_idx + end.len()..],
            None => {
                *in_block = true;
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);

    if touched {
        out.truncate(out.trim_end().len());
    }
    Some(out)
}

/// Markers looked for after code on a line. Any language with line comments
/// is scanned for all of them, not just its own.
const INLINE_MARKERS: &[&str] = &["//", "#"];

fn strip_inline(line: String, profile: &CommentProfile) -> String {
    if profile.line_markers.is_empty() || line.trim_start().starts_with("#!") {
        return line;
    }

    match inline_comment_start(&line, INLINE_MARKERS) {
        Some(idx) => line[..idx].trim_end().to_string(),
        None => line,
    }
}

/// Byte offset of the first trailing comment marker that is outside a
/// string literal (even quote count before it) and not part of a `://` URL.
fn inline_comment_start(line: &str, markers: &[&str]) -> Option<usize> {
    let mut quotes = 0usize;

    for (idx, ch) in line.char_indices() {
        if ch == '\'' || ch == '"' {
            quotes += 1;
            continue;
        }

        let rest = &line[idx..];
        if !markers.iter().any(|marker| rest.starts_with(marker)) {
            continue;
        }

        if quotes % 2 == 0 && !line[..idx].ends_with(':') {
            return Some(idx);
        }
    }

    None
}
