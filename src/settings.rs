use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ConfigError;
use crate::password::GenerationConfig;
use crate::store::FileBackend;

/// Contents of `config.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Starting point for every `generate` call before flags apply.
    pub defaults: GenerationConfig,
    pub store_path: Option<PathBuf>,
    /// Upper bound on the store blob, in bytes.
    pub store_capacity: Option<usize>,
}

impl Settings {
    const APP_DIR: &str = "oktogen";
    const FILE_NAME: &str = "config.json";

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::APP_DIR).join(Self::FILE_NAME))
    }

    /// Loads from `path`, or from the default location when `None`.
    /// A missing file gives the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => return Ok(Self::default()),
        };

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
        settings.defaults.validate()?;
        debug!(path = %path.display(), "config loaded");

        Ok(settings)
    }

    /// Store location: the configured path, else the platform data dir.
    pub fn store_path(&self) -> Option<PathBuf> {
        self.store_path.clone().or_else(FileBackend::default_path)
    }
}
