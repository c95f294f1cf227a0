use super::LanguageId;

/// Lexical comment rules for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentProfile {
    /// Markers that start a comment running to end of line.
    pub line_markers: &'static [&'static str],
    /// Block comment start/end markers. Nesting is not supported.
    pub block: Option<(&'static str, &'static str)>,
}

impl CommentProfile {
    /// True when the line, ignoring leading whitespace, is a line comment.
    pub fn is_line_comment(&self, line: &str) -> bool {
        let trimmed = line.trim_start();
        self.line_markers
            .iter()
            .any(|marker| trimmed.starts_with(marker))
    }
}

static C_STYLE: CommentProfile = CommentProfile {
    line_markers: &["//"],
    block: Some(("/*", "*/")),
};

static PYTHON: CommentProfile = CommentProfile {
    line_markers: &["#"],
    block: Some(("'''", "'''")),
};

static CSS: CommentProfile = CommentProfile {
    line_markers: &[],
    block: Some(("/*", "*/")),
};

static HTML: CommentProfile = CommentProfile {
    line_markers: &[],
    block: Some(("<!--", "-->")),
};

static HASH_ONLY: CommentProfile = CommentProfile {
    line_markers: &["#"],
    block: None,
};

pub(super) fn lookup(language: LanguageId) -> Option<&'static CommentProfile> {
    match language {
        LanguageId::JavaScript
        | LanguageId::TypeScript
        | LanguageId::Jsx
        | LanguageId::Tsx
        | LanguageId::Rust
        | LanguageId::Go => Some(&C_STYLE),
        LanguageId::Python => Some(&PYTHON),
        LanguageId::Css => Some(&CSS),
        LanguageId::Html => Some(&HTML),
        LanguageId::Yaml | LanguageId::Shell => Some(&HASH_ONLY),
        LanguageId::Json
        | LanguageId::Markdown
        | LanguageId::Toml
        | LanguageId::Sql
        | LanguageId::PlainText => None,
    }
}
