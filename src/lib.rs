use std::path::{Path, PathBuf};

pub mod app_core;
pub mod codec;
pub mod database;
pub mod domain;
pub mod error;
pub mod playback;
pub mod player;
pub mod settings;

pub use app_core::Reprise;
pub use database::Database;
pub use domain::{ResumeState, Track, TrackId};
pub use error::{Error, Result};
pub use settings::Settings;

pub const CONFIG_DIRECTORY: &str = "reprise";
pub const CONFIG_FILE: &str = "config.toml";
pub const DATABASE_FILE: &str = "reprise.db";

/// Derive a track id from a file path. The file name is the id, so importing
/// two files with the same name from different folders overwrites the first.
pub fn track_id_from_path<P: AsRef<Path>>(path: P) -> Option<TrackId> {
    path.as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

pub fn default_database_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(CONFIG_DIRECTORY).join(DATABASE_FILE))
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIRECTORY).join(CONFIG_FILE))
}

/// Positions are persisted as plain seconds; anything the ledger cannot
/// meaningfully resume from collapses to the start of the track.
pub fn sanitize_position(secs: f64) -> f64 {
    match secs.is_finite() && secs > 0.0 {
        true => secs,
        false => 0.0,
    }
}
