use crate::{TrackId, sanitize_position};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResumeState {
    pub last_track_id: Option<TrackId>,
    pub last_position: f64,
}

impl ResumeState {
    pub fn new(last_track_id: Option<TrackId>, last_position: f64) -> Self {
        ResumeState {
            last_track_id,
            last_position: sanitize_position(last_position),
        }
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![(LAST_POSITION, self.last_position.to_string())];

        if let Some(id) = &self.last_track_id {
            pairs.push((LAST_TRACK_ID, id.clone()));
        }

        pairs
    }

    /// Rebuild from raw `session_state` rows. Unknown keys are ignored and an
    /// unparsable position reads as zero.
    pub fn from_values(values: Vec<(String, String)>) -> Self {
        let mut state = ResumeState::default();

        for (key, value) in values {
            match key.as_str() {
                LAST_TRACK_ID => state.last_track_id = Some(value),
                LAST_POSITION => {
                    state.last_position = value.parse().map(sanitize_position).unwrap_or(0.0)
                }
                _ => {}
            }
        }

        state
    }
}

pub(crate) const LAST_TRACK_ID: &str = "last_track_id";
pub(crate) const LAST_POSITION: &str = "last_position";
