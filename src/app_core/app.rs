use crossbeam_channel::Receiver;
use std::path::Path;

use crate::{
    Database, Error, Result, Settings, Track, TrackId,
    database::{PositionLedger, TrackStore},
    playback::{PlaylistSession, ResumePhase, ResumeSequencer},
    player::{MediaPlayer, PlayerEvent},
    track_id_from_path,
};

/// One playback session: the stores, the player handle, the play order and
/// the startup resume. All methods run on the caller's thread; player events
/// are only acted on when the owner calls [`Reprise::poll`] or
/// [`Reprise::run_until`].
pub struct Reprise {
    pub(super) settings: Settings,
    pub(super) store: Box<dyn TrackStore>,
    pub(super) ledger: Box<dyn PositionLedger>,
    pub(super) player: Box<dyn MediaPlayer>,
    pub(super) events: Receiver<PlayerEvent>,

    pub(super) playlist: PlaylistSession,
    pub(super) sequencer: ResumeSequencer,

    /// Track currently attached to the player
    pub(super) attached: Option<TrackId>,
    /// Whether play/pause/time events are written to the ledger
    pub(super) persist_positions: bool,
    /// Last play state the player reported
    pub(super) playing: bool,
}

impl Reprise {
    pub fn new(
        settings: Settings,
        store: Box<dyn TrackStore>,
        ledger: Box<dyn PositionLedger>,
        mut player: Box<dyn MediaPlayer>,
    ) -> Self {
        let events = player.subscribe();

        Reprise {
            settings,
            store,
            ledger,
            player,
            events,

            playlist: PlaylistSession::new(),
            sequencer: ResumeSequencer::new(),

            attached: None,
            persist_positions: false,
            playing: false,
        }
    }

    /// Open the configured database and use it for both tracks and the ledger.
    pub fn open(settings: Settings, player: Box<dyn MediaPlayer>) -> Result<Self> {
        let db = Database::open(settings.database_path()?)?;
        Ok(Self::new(
            settings,
            Box::new(db.clone()),
            Box::new(db),
            player,
        ))
    }

    /// Rebuild the playlist and kick off the resume of the last track.
    ///
    /// Never fails: storage or decode problems are logged and the session
    /// starts without a resume, possibly with an empty playlist.
    pub fn start(&mut self) -> ResumePhase {
        let stored = self.store.list_ids().unwrap_or_else(|e| {
            tracing::warn!("Could not list stored tracks: {e}");
            Vec::new()
        });

        let state = self.ledger.read_state().unwrap_or_else(|e| {
            tracing::warn!("Could not read resume state: {e}");
            Default::default()
        });

        let dedupe = self.settings.playlist.dedupe_resume_track;
        let resume_id = state
            .last_track_id
            .filter(|_| self.settings.playback.resume_on_startup);

        let Some(id) = resume_id else {
            self.sequencer.skip();
            self.playlist.initialize(stored, None, dedupe);
            return self.sequencer.phase();
        };

        match self.sequencer.begin(
            &id,
            state.last_position,
            self.store.as_ref(),
            self.player.as_mut(),
        ) {
            Ok(()) => {
                self.attached = Some(id.clone());
                self.playlist.initialize(stored, Some(id), dedupe);
            }
            Err(e) => {
                tracing::warn!("Not resuming {id}: {e}");
                self.playlist.initialize(stored, None, dedupe);
            }
        }

        self.sequencer.phase()
    }

    /// Store a track under `name` and append it to the playlist. Importing an
    /// existing name replaces the stored payload.
    pub fn import(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let track = Track::from_bytes(name, bytes);
        self.store.put(&track)?;
        self.playlist.add_track(track.id);

        tracing::info!("Imported {name} ({} bytes)", bytes.len());
        Ok(())
    }

    pub fn import_file<P: AsRef<Path>>(&mut self, path: P) -> Result<TrackId> {
        let path = path.as_ref();
        let id = track_id_from_path(path).ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} has no file name", path.display()),
            ))
        })?;

        let bytes = std::fs::read(path)?;
        self.import(&id, &bytes)?;
        Ok(id)
    }
}

// ===============
//    ACCESSORS
// ===============
impl Reprise {
    pub fn playlist(&self) -> &PlaylistSession {
        &self.playlist
    }

    pub fn resume_phase(&self) -> ResumePhase {
        self.sequencer.phase()
    }

    pub fn now_playing(&self) -> Option<&TrackId> {
        self.attached.as_ref()
    }

    pub fn current_time(&self) -> f64 {
        self.player.current_time()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
