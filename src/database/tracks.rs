use rusqlite::{OptionalExtension, Row, params};

use super::{
    Database, TrackStore,
    queries::{GET_ALL_TRACKS, GET_TRACK, GET_TRACK_IDS, INSERT_TRACK},
};
use crate::{Result, Track, TrackId};

impl TrackStore for Database {
    fn put(&self, track: &Track) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(INSERT_TRACK, params![track.id, track.payload])?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Track>> {
        let conn = self.lock()?;
        let track = conn
            .query_row(GET_TRACK, params![id], track_from_row)
            .optional()?;

        Ok(track)
    }

    fn list_all(&self) -> Result<Vec<Track>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(GET_ALL_TRACKS)?;

        let tracks = stmt
            .query_map([], track_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(tracks)
    }

    fn list_ids(&self) -> Result<Vec<TrackId>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(GET_TRACK_IDS)?;

        let ids = stmt
            .query_map([], |r| r.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(ids)
    }
}

fn track_from_row(r: &Row) -> rusqlite::Result<Track> {
    Ok(Track {
        id: r.get("id")?,
        payload: r.get("payload")?,
    })
}
