use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

/// Top-level settings loaded from `config.toml`.
///
/// Default path: `<config_dir>/reprise/config.toml`. Every section and field
/// is optional; anything missing falls back to the struct defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub playlist: PlaylistSettings,
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// SQLite file holding tracks and the resume ledger.
    /// Defaults to `<data_dir>/reprise/reprise.db`.
    pub database_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Drop the stored copy of the resume track when it is put at the front
    /// of the playlist on startup.
    pub dedupe_resume_track: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    pub resume_on_startup: bool,
    /// How often the player reports its position while playing (milliseconds).
    pub time_update_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            resume_on_startup: true,
            time_update_ms: 250,
        }
    }
}

impl PlaybackSettings {
    pub fn time_update(&self) -> Duration {
        Duration::from_millis(self.time_update_ms)
    }
}
