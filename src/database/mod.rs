//! SQLite persistence.
//!
//! One database file holds two independent tables: `tracks` backs the
//! [`TrackStore`] and `session_state` backs the [`PositionLedger`]. Neither
//! side reads the other's table.

mod queries;
mod session;
mod tracks;

use rusqlite::Connection;
use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{Error, ResumeState, Result, Track, TrackId};
use queries::{CREATE_SESSION_STATE, CREATE_TRACKS};

/// Durable `id -> payload` repository.
pub trait TrackStore {
    /// Upsert; the last writer wins.
    fn put(&self, track: &Track) -> Result<()>;

    /// `Ok(None)` is the normal answer for an id that was never imported.
    fn get(&self, id: &str) -> Result<Option<Track>>;

    fn list_all(&self) -> Result<Vec<Track>>;

    fn list_ids(&self) -> Result<Vec<TrackId>> {
        Ok(self.list_all()?.into_iter().map(|t| t.id).collect())
    }
}

/// Durable "what was playing, and where" record.
pub trait PositionLedger {
    /// A different track became active; its position starts over at zero.
    fn record_playing(&self, id: &str) -> Result<()>;

    fn record_position(&self, secs: f64) -> Result<()>;

    fn read_state(&self) -> Result<ResumeState>;
}

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        tracing::debug!("Opened database at {}", path.display());
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(CREATE_TRACKS, [])?;
        conn.execute(CREATE_SESSION_STATE, [])?;

        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::StoreUnavailable("database lock poisoned".to_string()))
    }
}
