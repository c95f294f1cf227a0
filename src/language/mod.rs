pub mod patterns;
pub mod profile;

pub use profile::CommentProfile;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Languages the practice pipeline knows about.
///
/// The set is closed: detection never invents new identifiers, and anything
/// without a comment profile simply passes through the stripper untouched.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LanguageId {
    #[value(name = "javascript")]
    JavaScript,
    #[value(name = "typescript")]
    TypeScript,
    Jsx,
    Tsx,
    Python,
    Rust,
    Go,
    Css,
    Html,
    Json,
    Markdown,
    Yaml,
    Toml,
    Sql,
    Shell,
    #[value(name = "plaintext")]
    PlainText,
}

const EXTENSIONS: &[(&str, LanguageId)] = &[
    ("js", LanguageId::JavaScript),
    ("mjs", LanguageId::JavaScript),
    ("cjs", LanguageId::JavaScript),
    ("jsx", LanguageId::Jsx),
    ("ts", LanguageId::TypeScript),
    ("tsx", LanguageId::Tsx),
    ("py", LanguageId::Python),
    ("rs", LanguageId::Rust),
    ("go", LanguageId::Go),
    ("css", LanguageId::Css),
    ("scss", LanguageId::Css),
    ("less", LanguageId::Css),
    ("html", LanguageId::Html),
    ("htm", LanguageId::Html),
    ("vue", LanguageId::Html),
    ("svelte", LanguageId::Html),
    ("json", LanguageId::Json),
    ("md", LanguageId::Markdown),
    ("mdx", LanguageId::Markdown),
    ("yaml", LanguageId::Yaml),
    ("yml", LanguageId::Yaml),
    ("toml", LanguageId::Toml),
    ("sql", LanguageId::Sql),
    ("sh", LanguageId::Shell),
    ("bash", LanguageId::Shell),
    ("zsh", LanguageId::Shell),
    ("txt", LanguageId::PlainText),
    ("php", LanguageId::PlainText),
    ("rb", LanguageId::PlainText),
    ("java", LanguageId::PlainText),
    ("kt", LanguageId::PlainText),
    ("swift", LanguageId::PlainText),
    ("c", LanguageId::PlainText),
    ("cpp", LanguageId::PlainText),
    ("h", LanguageId::PlainText),
    ("hpp", LanguageId::PlainText),
];

impl LanguageId {
    /// Detect the language from a file name.
    ///
    /// Files without an extension are treated as plain text; unknown
    /// extensions return `None` so callers can skip the file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name().and_then(|n| n.to_str())?;

        let ext = match file_name.rfind('.') {
            Some(idx) => file_name[idx + 1..].to_ascii_lowercase(),
            None => return Some(LanguageId::PlainText),
        };

        EXTENSIONS
            .iter()
            .find(|(candidate, _)| *candidate == ext)
            .map(|(_, lang)| *lang)
    }

    /// Comment rules for this language, if it has any.
    pub fn comment_profile(self) -> Option<&'static CommentProfile> {
        profile::lookup(self)
    }
}
