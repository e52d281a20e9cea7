use crate::TrackId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Index {index} out of range for playlist of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Playlist is empty")]
    EmptyPlaylist,

    #[error("Player error: {0}")]
    Player(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::StoreUnavailable(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
