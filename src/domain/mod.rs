mod resume_state;
mod track;

pub use resume_state::ResumeState;
pub use track::{Track, TrackId};

pub(crate) use resume_state::LAST_POSITION;
