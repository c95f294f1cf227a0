use directories::ProjectDirs;
use std::path::PathBuf;

pub const APP_NAME: &str = "codetype";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Directory for logs and other run state.
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(PathBuf::from(home).join(".local").join("state").join(APP_NAME))
        } else {
            ProjectDirs::from("", "", APP_NAME).map(|pd| pd.data_local_dir().to_path_buf())
        }
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("codetype.log"))
    }

    pub fn history_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|pd| pd.data_dir().join("history.csv"))
    }
}
