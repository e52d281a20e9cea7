use std::path::{Path, PathBuf};

use super::schema::Settings;
use crate::{Error, Result, default_config_path, default_database_path};

impl Settings {
    /// Load from the default config path. A missing file is not an error.
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Settings::default()),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let settings: Settings = toml::from_str(&contents)?;

        settings.validate()?;
        tracing::debug!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.playback.time_update_ms == 0 {
            return Err(Error::Config(
                "playback.time_update_ms must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        self.storage
            .database_path
            .clone()
            .or_else(default_database_path)
            .ok_or_else(|| Error::Config("could not determine a data directory".to_string()))
    }
}
