// Library surface for the binary, headless tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod history;
pub mod language;
pub mod practice;
pub mod project;
pub mod runtime;
pub mod session;
pub mod source;
pub mod stats;
pub mod typing_policy;
pub mod ui;

pub use error::{Error, Result};
pub use language::LanguageId;
pub use source::{process, Chunk, ProcessedSource};
