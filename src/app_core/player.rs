use crate::{
    Error, Result, TrackId,
    app_core::Reprise,
    playback::Transition,
    player::{MediaSource, PlayerEvent},
    sanitize_position,
};

impl Reprise {
    /// Play the track at `index`. Lookup, fetch and decode happen before
    /// anything changes, so those failures leave the session as it was. If
    /// the player itself refuses the source, the cursor and the ledger are
    /// untouched but the previous source is gone.
    pub fn select_track(&mut self, index: usize) -> Result<()> {
        let id = self.playlist.track_at(index)?.clone();
        let source = self.fetch_source(&id)?;

        self.attach(source)?;
        self.sequencer.supersede();
        self.player.play()?;
        self.playlist.set_cursor(index)?;

        tracing::info!("Now playing {id}");
        self.record_track_switch(&id);
        Ok(())
    }

    /// Move to the next track, wrapping at the end, and force it to start
    /// right away. Unlike the startup resume this does not wait for the
    /// player to report ready.
    pub fn advance(&mut self) -> Result<()> {
        let index = self.playlist.next_index()?;
        self.select_track(index)?;

        self.player.load()?;
        self.player.play()
    }

    pub fn play(&mut self) -> Result<()> {
        self.player.play()
    }

    pub fn pause(&mut self) -> Result<()> {
        self.player.pause()
    }

    pub fn toggle_playback(&mut self) -> Result<()> {
        match self.playing {
            true => self.pause(),
            false => self.play(),
        }
    }

    pub fn seek(&mut self, secs: f64) -> Result<()> {
        self.player.set_current_time(sanitize_position(secs))
    }

    fn fetch_source(&self, id: &str) -> Result<MediaSource> {
        let track = self
            .store
            .get(id)?
            .ok_or_else(|| Error::TrackNotFound(id.to_string()))?;

        Ok(MediaSource {
            id: track.id.clone(),
            mime: track.mime().map(str::to_string),
            bytes: track.decode()?,
        })
    }

    fn attach(&mut self, source: MediaSource) -> Result<()> {
        let id = source.id.clone();

        self.player.set_source(source)?;
        self.player.load()?;

        self.attached = Some(id);
        self.persist_positions = true;
        Ok(())
    }

    /// The track is already playing, so ledger failures are logged rather
    /// than failing the selection.
    fn record_track_switch(&self, id: &TrackId) {
        let recorded = self
            .ledger
            .record_playing(id)
            .and_then(|_| self.ledger.record_position(0.0));

        if let Err(e) = recorded {
            tracing::warn!("Could not record {id} as playing: {e}");
        }
    }

    fn save_position(&self) {
        if let Err(e) = self.ledger.record_position(self.player.current_time()) {
            tracing::warn!("Could not save playback position: {e}");
        }
    }
}

// ===================
//    EVENT HANDLER
// ===================
impl Reprise {
    pub(super) fn handle_player_event(&mut self, event: &PlayerEvent) {
        if self.sequencer.is_pending() {
            match event {
                PlayerEvent::Error(msg) => self.drop_resume(msg),
                _ => self.drive_resume(event),
            }
        }

        match event {
            PlayerEvent::Playing | PlayerEvent::Resumed => self.playing = true,
            PlayerEvent::Paused | PlayerEvent::Ended => self.playing = false,
            _ => (),
        }

        match event {
            PlayerEvent::Paused | PlayerEvent::Resumed | PlayerEvent::TimeUpdated(_) => {
                if self.persist_positions && self.attached.is_some() {
                    self.save_position();
                }
            }
            PlayerEvent::Ended => {
                if let Err(e) = self.advance() {
                    tracing::warn!("Could not advance after track end: {e}");
                }
            }
            PlayerEvent::Error(msg) => tracing::warn!("Player error: {msg}"),
            PlayerEvent::ReadyToPlay | PlayerEvent::Playing => (),
        }
    }

    fn drive_resume(&mut self, event: &PlayerEvent) {
        let result = match self.sequencer.on_event(event, self.player.as_mut()) {
            // Persistence goes live before the resume's own play request,
            // so that request is captured too
            Ok(Transition::Seeked) => {
                self.persist_positions = true;
                self.sequencer.request_play(self.player.as_mut())
            }
            other => other,
        };

        match result {
            Ok(Transition::Resumed { replayed }) => {
                tracing::debug!("Resume settled, replayed: {replayed}");
            }
            Ok(_) => (),
            Err(e) => {
                tracing::warn!("Resume aborted: {e}");
                self.sequencer.abort();
                // Still attached, so it gets saved like any selected track
                self.persist_positions = true;
            }
        }
    }

    /// The player could not use the resumed source at all.
    fn drop_resume(&mut self, reason: &str) {
        tracing::warn!("Resume aborted by player: {reason}");
        self.sequencer.abort();
        self.attached = None;
    }
}
