//! The media player capability the engine drives but does not own.
//!
//! Anything that can take a byte stream, report readiness and playback
//! events, and answer "where is the playhead" can back a [`crate::Reprise`]
//! session. The `rodio` feature ships an implementation on top of a rodio
//! sink running on its own thread.

#[cfg(feature = "rodio")]
mod backend_rodio;
#[cfg(feature = "rodio")]
mod core;
#[cfg(feature = "rodio")]
mod handle;
#[cfg(feature = "rodio")]
mod metrics;

#[cfg(test)]
pub(crate) mod scripted;

#[cfg(feature = "rodio")]
pub use handle::RodioPlayer;

use crossbeam_channel::Receiver;

use crate::{Result, TrackId};

/// Decoded audio ready to be attached to a player.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaSource {
    pub id: TrackId,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PlayerEvent {
    /// Enough of the source is decoded to start playback.
    ReadyToPlay,
    /// Audio is actually coming out.
    Playing,
    Paused,
    /// A play request was accepted. Precedes `Playing`.
    Resumed,
    Ended,
    TimeUpdated(f64),
    Error(String),
}

pub trait MediaPlayer {
    /// Replace the attached source. Nothing plays until `load` and `play`.
    fn set_source(&mut self, source: MediaSource) -> Result<()>;

    /// (Re)start decoding the attached source from the beginning. Emits
    /// `ReadyToPlay` once the source can be played.
    fn load(&mut self) -> Result<()>;

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    /// Playhead position in seconds.
    fn current_time(&self) -> f64;

    /// Move the playhead. `current_time` reflects the new value immediately.
    fn set_current_time(&mut self, secs: f64) -> Result<()>;

    /// Event stream of the player. Receivers returned by repeated calls share
    /// one queue, so a session should subscribe once.
    fn subscribe(&mut self) -> Receiver<PlayerEvent>;
}
