use std::sync::{
    Arc,
    atomic::{AtomicU8, AtomicU64, Ordering},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PlaybackState {
    Stopped = 0,
    Playing = 1,
    Paused = 2,
}

impl TryFrom<u8> for PlaybackState {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PlaybackState::Stopped),
            1 => Ok(PlaybackState::Playing),
            2 => Ok(PlaybackState::Paused),
            _ => Err(()),
        }
    }
}

/// Shared between the player thread and the handle. Positions are stored as
/// raw `f64` bits so a seek target reads back exactly.
pub struct PlaybackMetrics {
    state: AtomicU8,
    position: AtomicU64,
}

impl PlaybackMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(PlaybackMetrics {
            state: AtomicU8::new(PlaybackState::Stopped as u8),
            position: AtomicU64::new(0.0_f64.to_bits()),
        })
    }

    pub fn get_state(&self) -> PlaybackState {
        self.state
            .load(Ordering::Relaxed)
            .try_into()
            .unwrap_or(PlaybackState::Stopped)
    }

    pub fn set_playback_state(&self, state: PlaybackState) {
        self.state.store(state as u8, Ordering::Relaxed);
    }

    pub fn get_position(&self) -> f64 {
        f64::from_bits(self.position.load(Ordering::Relaxed))
    }

    pub fn set_position(&self, secs: f64) {
        self.position.store(secs.to_bits(), Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.set_position(0.0);
        self.set_playback_state(PlaybackState::Stopped);
    }
}
