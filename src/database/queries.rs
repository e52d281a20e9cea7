pub const CREATE_TRACKS: &str = "
    CREATE TABLE IF NOT EXISTS tracks (
        id TEXT PRIMARY KEY,
        payload TEXT NOT NULL
    )
";

pub const CREATE_SESSION_STATE: &str = "
    CREATE TABLE IF NOT EXISTS session_state (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
";

// REPLACE re-inserts the row, so an overwritten track moves to the back of
// `GET_ALL_TRACKS`
pub const INSERT_TRACK: &str = "
    INSERT OR REPLACE INTO tracks (id, payload)
    VALUES (?1, ?2)
";

pub const GET_TRACK: &str = "
    SELECT id, payload FROM tracks
    WHERE id = ?
";

pub const GET_ALL_TRACKS: &str = "
    SELECT id, payload FROM tracks
    ORDER BY rowid ASC
";

pub const GET_TRACK_IDS: &str = "
    SELECT id FROM tracks
    ORDER BY rowid ASC
";

pub const SET_SESSION_STATE: &str = "
    INSERT INTO session_state (key, value)
    VALUES (?1, ?2)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value
";

pub const GET_RESUME_STATE: &str = "
    SELECT key, value FROM session_state
    WHERE key IN ('last_track_id', 'last_position')
";
