//! Startup resume.
//!
//! Reattaching the last track is a short conversation with the player:
//! attach, wait for `ReadyToPlay`, seek, play, then wait for `Playing` and
//! only play again if nothing moved the playhead in between. The sequencer
//! holds that conversation as a state machine fed by the session's event
//! loop; it never blocks and never owns the player.
//!
//! ```text
//! Idle -> AwaitingReady -> Seeking -> AwaitingResumeRace -> Resumed
//!   \-> NoResume            (any pending phase) -> Superseded
//! ```

use crate::{
    Error, Result, TrackId,
    database::TrackStore,
    player::{MediaPlayer, MediaSource, PlayerEvent},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResumePhase {
    Idle,
    AwaitingReady,
    Seeking,
    AwaitingResumeRace,
    Resumed,
    NoResume,
    /// A user selection took the player over before the resume finished.
    Superseded,
}

impl ResumePhase {
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            ResumePhase::AwaitingReady | ResumePhase::Seeking | ResumePhase::AwaitingResumeRace
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ResumePhase::Resumed | ResumePhase::NoResume | ResumePhase::Superseded
        )
    }
}

/// What the session has to do after feeding the sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    None,
    /// The playhead sits on the saved position. Position persistence must be
    /// wired before [`ResumeSequencer::request_play`] is called.
    Seeked,
    /// `replayed` is whether the race guard issued the extra play request.
    Resumed { replayed: bool },
}

/// A single-fire signal that remembers having fired, so a continuation
/// registered late still sees it.
#[derive(Debug, Default)]
struct OneShot {
    armed: bool,
    fired: bool,
}

impl OneShot {
    fn arm(&mut self) {
        self.armed = true;
        self.fired = false;
    }

    /// True only for the first firing of an armed signal.
    fn fire(&mut self) -> bool {
        if self.armed && !self.fired {
            self.fired = true;
            return true;
        }
        false
    }

    fn has_fired(&self) -> bool {
        self.fired
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

#[derive(Debug)]
struct ResumeTarget {
    id: TrackId,
    position: f64,
}

#[derive(Debug)]
pub struct ResumeSequencer {
    phase: ResumePhase,
    target: Option<ResumeTarget>,
    ready: OneShot,
    playing: OneShot,
}

impl Default for ResumeSequencer {
    fn default() -> Self {
        ResumeSequencer {
            phase: ResumePhase::Idle,
            target: None,
            ready: OneShot::default(),
            playing: OneShot::default(),
        }
    }
}

impl ResumeSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ResumePhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase.is_pending()
    }

    pub fn track_id(&self) -> Option<&TrackId> {
        self.target.as_ref().map(|t| &t.id)
    }

    /// Nothing to resume.
    pub fn skip(&mut self) {
        if self.phase == ResumePhase::Idle {
            self.phase = ResumePhase::NoResume;
        }
    }

    /// `Idle -> AwaitingReady`. Fetches and decodes `id`, attaches it and
    /// arms both signals. Any failure leaves the sequencer in `NoResume` and
    /// is returned for the caller to log.
    pub fn begin(
        &mut self,
        id: &str,
        position: f64,
        store: &dyn TrackStore,
        player: &mut dyn MediaPlayer,
    ) -> Result<()> {
        if self.phase != ResumePhase::Idle {
            return Ok(());
        }

        match self.attach(id, store, player) {
            Ok(()) => {
                self.target = Some(ResumeTarget {
                    id: id.to_string(),
                    position,
                });
                self.ready.arm();
                self.playing.arm();
                self.phase = ResumePhase::AwaitingReady;

                tracing::debug!("Resuming {id} at {position:.3}s, awaiting ready");
                Ok(())
            }
            Err(e) => {
                self.phase = ResumePhase::NoResume;
                Err(e)
            }
        }
    }

    fn attach(&self, id: &str, store: &dyn TrackStore, player: &mut dyn MediaPlayer) -> Result<()> {
        let track = store
            .get(id)?
            .ok_or_else(|| Error::TrackNotFound(id.to_string()))?;

        let source = MediaSource {
            id: track.id.clone(),
            mime: track.mime().map(str::to_string),
            bytes: track.decode()?,
        };

        player.set_source(source)?;
        player.load()
    }

    /// Feed one player event. Events that do not concern the current phase
    /// are ignored; a `Playing` that arrives early is latched.
    pub fn on_event(
        &mut self,
        event: &PlayerEvent,
        player: &mut dyn MediaPlayer,
    ) -> Result<Transition> {
        if !self.phase.is_pending() {
            return Ok(Transition::None);
        }

        match event {
            PlayerEvent::ReadyToPlay if self.phase == ResumePhase::AwaitingReady => {
                if !self.ready.fire() {
                    return Ok(Transition::None);
                }

                let position = self.target_position();
                player.set_current_time(position)?;
                self.phase = ResumePhase::Seeking;

                tracing::debug!("Seeked to {position:.3}s");
                Ok(Transition::Seeked)
            }
            PlayerEvent::Playing => {
                if !self.playing.fire() {
                    return Ok(Transition::None);
                }

                match self.phase {
                    ResumePhase::AwaitingResumeRace => self.settle(player),
                    _ => Ok(Transition::None),
                }
            }
            _ => Ok(Transition::None),
        }
    }

    /// `Seeking -> AwaitingResumeRace`. If `Playing` already fired the race
    /// is settled right away.
    pub fn request_play(&mut self, player: &mut dyn MediaPlayer) -> Result<Transition> {
        if self.phase != ResumePhase::Seeking {
            return Ok(Transition::None);
        }

        player.play()?;
        self.phase = ResumePhase::AwaitingResumeRace;

        match self.playing.has_fired() {
            true => self.settle(player),
            false => Ok(Transition::None),
        }
    }

    /// Only replay when the playhead still sits exactly on the saved
    /// position. Anything else means something newer moved it, and that wins.
    fn settle(&mut self, player: &mut dyn MediaPlayer) -> Result<Transition> {
        let saved = self.target_position();
        let current = player.current_time();
        let replayed = current == saved;

        self.phase = ResumePhase::Resumed;
        self.disarm();

        match replayed {
            true => player.play()?,
            false => tracing::debug!("Playhead moved to {current:.3}s, leaving it alone"),
        }

        tracing::info!("Resumed {} at {saved:.3}s", self.track_id().map_or("?", String::as_str));
        Ok(Transition::Resumed { replayed })
    }

    /// Give up on a pending resume, e.g. after a player error.
    pub fn abort(&mut self) {
        if self.phase.is_pending() || self.phase == ResumePhase::Idle {
            self.phase = ResumePhase::NoResume;
            self.disarm();
        }
    }

    /// A user action now owns the player; pending continuations must never
    /// touch it again.
    pub fn supersede(&mut self) {
        if self.phase.is_pending() {
            tracing::info!("Resume superseded by user selection");
            self.phase = ResumePhase::Superseded;
            self.disarm();
        }
    }

    fn target_position(&self) -> f64 {
        self.target.as_ref().map_or(0.0, |t| t.position)
    }

    fn disarm(&mut self) {
        self.ready.disarm();
        self.playing.disarm();
    }
}
