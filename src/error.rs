use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the I/O layer. Text processing and typing never fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {source} (path: {})", .path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("no practice files found under {}", .0.display())]
    NoPracticeFiles(PathBuf),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("history log error: {0}")]
    History(#[from] csv::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            source,
            path: path.into(),
        }
    }
}
