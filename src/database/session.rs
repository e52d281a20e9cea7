use rusqlite::params;

use super::{
    Database, PositionLedger,
    queries::{GET_RESUME_STATE, SET_SESSION_STATE},
};
use crate::{
    ResumeState, Result,
    domain::LAST_POSITION,
    sanitize_position,
};

impl PositionLedger for Database {
    fn record_playing(&self, id: &str) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(SET_SESSION_STATE)?;
            for (key, value) in ResumeState::new(Some(id.to_string()), 0.0).to_pairs() {
                stmt.execute(params![key, value])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn record_position(&self, secs: f64) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            SET_SESSION_STATE,
            params![LAST_POSITION, sanitize_position(secs).to_string()],
        )?;
        Ok(())
    }

    fn read_state(&self) -> Result<ResumeState> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(GET_RESUME_STATE)?;

        let values = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<(String, String)>>>()?;

        Ok(ResumeState::from_values(values))
    }
}
