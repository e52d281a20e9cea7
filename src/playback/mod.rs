mod playlist;
mod sequencer;

pub use playlist::PlaylistSession;
pub use sequencer::{ResumePhase, ResumeSequencer, Transition};
