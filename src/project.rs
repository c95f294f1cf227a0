use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::language::LanguageId;
use crate::source::{self, Chunk};

/// Directory names never descended into.
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".next",
    "dist",
    "build",
    ".vscode",
    ".idea",
    "__pycache__",
    ".cache",
    "coverage",
    ".turbo",
    "target",
    "vendor",
];

/// Suffixes of files that are binary or generated even when the extension
/// looks like source.
const SKIPPED_SUFFIXES: &[&str] = &[
    ".min.js", ".min.css", ".lock", ".png", ".jpg", ".jpeg", ".gif", ".ico", ".svg", ".webp",
    ".bmp", ".mp3", ".mp4", ".wav", ".avi", ".mov", ".webm", ".pdf", ".doc", ".docx", ".xls",
    ".xlsx", ".ppt", ".pptx", ".zip", ".tar", ".gz", ".rar", ".7z", ".exe", ".dll", ".so",
    ".dylib", ".woff", ".woff2", ".ttf", ".eot", ".otf",
];

pub const DEFAULT_MAX_FILE_BYTES: u64 = 256 * 1024;

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Only keep files of these languages. Empty keeps everything.
    pub languages: Vec<LanguageId>,
    pub max_file_bytes: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

/// One practice file with its processed text and chunk progress.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    /// Path relative to the project root.
    pub path: PathBuf,
    pub language: LanguageId,
    /// Text after comment removal; what the chunks are cut from.
    pub content: String,
    pub chunks: Vec<Chunk>,
    pub completed_chunks: HashSet<String>,
}

impl ProjectFile {
    pub fn new(path: impl Into<PathBuf>, language: LanguageId, raw: &str) -> Self {
        let processed = source::process(raw, language);
        Self {
            path: path.into(),
            language,
            content: processed.content,
            chunks: processed.chunks,
            completed_chunks: HashSet::new(),
        }
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Relative path with `/` separators.
    pub fn display_path(&self) -> String {
        self.path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Record a finished chunk. Returns true when this completes the file.
    pub fn mark_chunk_completed(&mut self, chunk_id: &str) -> bool {
        let was_completed = self.is_completed();
        if self.chunks.iter().any(|c| c.id == chunk_id) {
            self.completed_chunks.insert(chunk_id.to_string());
        }
        !was_completed && self.is_completed()
    }

    pub fn is_chunk_completed(&self, chunk_id: &str) -> bool {
        self.completed_chunks.contains(chunk_id)
    }

    pub fn is_completed(&self) -> bool {
        !self.chunks.is_empty()
            && self
                .chunks
                .iter()
                .all(|c| self.completed_chunks.contains(&c.id))
    }

    pub fn completed_count(&self) -> usize {
        self.completed_chunks.len()
    }
}

/// A folder of practice files, sorted by relative path.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    files: Vec<ProjectFile>,
}

impl Project {
    pub fn from_files(name: impl Into<String>, mut files: Vec<ProjectFile>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Self {
            name: name.into(),
            files,
        }
    }

    /// Scan `root` for practice files and process each one.
    pub fn load(root: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::NotADirectory(root.to_path_buf()));
        }

        let candidates = scan(root, options);
        log::info!(
            "found {} candidate files under {}",
            candidates.len(),
            root.display()
        );

        let files: Vec<ProjectFile> = candidates
            .into_par_iter()
            .filter_map(|(path, language)| read_practice_file(root, &path, language))
            .collect();

        if files.is_empty() {
            return Err(Error::NoPracticeFiles(root.to_path_buf()));
        }

        let project = Self::from_files(project_name(root), files);
        log::info!(
            "loaded project {} with {} files",
            project.name,
            project.files.len()
        );
        Ok(project)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[ProjectFile] {
        &self.files
    }

    pub fn file(&self, index: usize) -> Option<&ProjectFile> {
        self.files.get(index)
    }

    pub fn file_mut(&mut self, index: usize) -> Option<&mut ProjectFile> {
        self.files.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn completed_files(&self) -> usize {
        self.files.iter().filter(|f| f.is_completed()).count()
    }
}

fn scan(root: &Path, options: &LoadOptions) -> Vec<(PathBuf, LanguageId)> {
    let mut builder = WalkBuilder::new(root);
    builder.hidden(true).git_ignore(true).git_exclude(true);
    builder.filter_entry(|entry| {
        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
        !(is_dir && is_ignored_dir(entry.file_name().to_str().unwrap_or_default()))
    });

    let mut found = Vec::new();
    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("failed to read entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        if is_skipped_file(path) {
            log::debug!("skipping binary or generated file {}", path.display());
            continue;
        }
        if let Ok(meta) = entry.metadata() {
            if meta.len() > options.max_file_bytes {
                log::debug!(
                    "skipping large file {} ({} bytes > {})",
                    path.display(),
                    meta.len(),
                    options.max_file_bytes
                );
                continue;
            }
        }

        let Some(language) = LanguageId::from_path(path) else {
            continue;
        };
        if !options.languages.is_empty() && !options.languages.contains(&language) {
            continue;
        }
        found.push((path.to_path_buf(), language));
    }
    found
}

fn read_practice_file(root: &Path, path: &Path, language: LanguageId) -> Option<ProjectFile> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("{}", Error::io(path, e));
            return None;
        }
    };

    let relative = path.strip_prefix(root).unwrap_or(path);
    let file = ProjectFile::new(relative, language, &raw);
    if file.content.trim().is_empty() {
        log::warn!("skipping {}: nothing left to type", relative.display());
        return None;
    }
    Some(file)
}

fn is_ignored_dir(name: &str) -> bool {
    IGNORED_DIRS.contains(&name)
}

fn is_skipped_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    SKIPPED_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

fn project_name(root: &Path) -> String {
    let resolved = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Project".to_string())
}
