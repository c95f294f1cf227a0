use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::typing_policy::TypingPolicy;

pub const MAX_TAB_WIDTH: u8 = 8;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub stop_on_error: bool,
    pub show_line_numbers: bool,
    /// Columns used to draw a tab character.
    pub tab_width: u8,
    /// Move to the next chunk on the first key after a chunk is finished.
    pub auto_advance: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stop_on_error: false,
            show_line_numbers: true,
            tab_width: 2,
            auto_advance: false,
        }
    }
}

impl Config {
    pub fn policy(&self) -> TypingPolicy {
        TypingPolicy::new(self.stop_on_error)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tab_width == 0 || self.tab_width > MAX_TAB_WIDTH {
            return Err(Error::Config(format!(
                "tab_width must be between 1 and {MAX_TAB_WIDTH}, got {}",
                self.tab_width
            )));
        }
        Ok(())
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", crate::app_dirs::APP_NAME) {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("codetype_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing or unreadable config falls back to defaults.
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) if cfg.validate().is_ok() => cfg,
            Ok(_) | Err(_) => {
                log::warn!(
                    "ignoring invalid config at {}, using defaults",
                    self.path.display()
                );
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        cfg.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(&self.path, data).map_err(|e| Error::io(&self.path, e))
    }
}
