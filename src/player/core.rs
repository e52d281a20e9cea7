use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crate::player::{
    MediaSource, PlayerEvent,
    backend_rodio::RodioBackend,
    metrics::{PlaybackMetrics, PlaybackState},
};

// ~30fps
const REFRESH_RATE: Duration = Duration::from_millis(33);

pub enum PlayerCommand {
    SetSource(MediaSource),
    Load,
    Play,
    Pause,
    Seek(f64),
}

pub struct PlayerCore {
    backend: RodioBackend,
    commands: Receiver<PlayerCommand>,
    events: Sender<PlayerEvent>,
    metrics: Arc<PlaybackMetrics>,

    source: Option<MediaSource>,
    time_update: Duration,
    last_time_update: Instant,
}

impl PlayerCore {
    /// The output stream has to live on the thread that drives it, so the
    /// backend is opened here and the outcome reported through `ready`.
    pub fn spawn(
        commands: Receiver<PlayerCommand>,
        events: Sender<PlayerEvent>,
        metrics: Arc<PlaybackMetrics>,
        time_update: Duration,
        ready: Sender<anyhow::Result<()>>,
    ) -> JoinHandle<()> {
        thread::spawn(move || {
            let backend = match RodioBackend::new() {
                Ok(backend) => {
                    let _ = ready.send(Ok(()));
                    backend
                }
                Err(e) => {
                    let _ = ready.send(Err(e));
                    return;
                }
            };

            let mut core = PlayerCore {
                backend,
                commands,
                events,
                metrics,

                source: None,
                time_update,
                last_time_update: Instant::now(),
            };

            core.run();
        })
    }

    fn run(&mut self) {
        loop {
            match self.commands.recv_timeout(REFRESH_RATE) {
                Ok(cmd) => self.process_command(cmd),
                Err(RecvTimeoutError::Timeout) => (),
                Err(RecvTimeoutError::Disconnected) => break,
            }
            self.check_track_end();
            self.update_metrics();
        }
        tracing::debug!("Player core stopped");
    }

    fn process_command(&mut self, cmd: PlayerCommand) {
        match cmd {
            PlayerCommand::SetSource(s) => self.set_source(s),
            PlayerCommand::Load => self.load(),
            PlayerCommand::Play => self.play(),
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::Seek(secs) => self.seek(secs),
        }
    }

    fn check_track_end(&mut self) {
        // Unloading guarantees `Ended` is sent once per load
        if self.metrics.get_state() == PlaybackState::Playing && self.backend.track_ended() {
            self.backend.unload();
            self.metrics.set_playback_state(PlaybackState::Stopped);
            self.emit(PlayerEvent::Ended);
        }
    }

    fn update_metrics(&mut self) {
        if self.metrics.get_state() != PlaybackState::Playing {
            return;
        }

        let secs = self.backend.position().as_secs_f64();
        self.metrics.set_position(secs);

        if self.last_time_update.elapsed() >= self.time_update {
            self.last_time_update = Instant::now();
            self.emit(PlayerEvent::TimeUpdated(secs));
        }
    }
}

impl PlayerCore {
    fn set_source(&mut self, source: MediaSource) {
        self.backend.unload();
        self.metrics.reset();
        self.source = Some(source);
    }

    fn load(&mut self) {
        let Some(source) = &self.source else {
            self.emit(PlayerEvent::Error("no source attached".to_string()));
            return;
        };

        match self.backend.load(source) {
            Ok(()) => {
                self.metrics.reset();
                self.metrics.set_playback_state(PlaybackState::Paused);
                self.emit(PlayerEvent::ReadyToPlay);
            }
            Err(e) => {
                self.emit(PlayerEvent::Error(format!("{}: {e}", source.id)));
            }
        }
    }

    fn play(&mut self) {
        if self.metrics.get_state() == PlaybackState::Playing {
            return;
        }

        // A finished track starts over, like a media element does
        if !self.backend.is_loaded() {
            self.load();
            if !self.backend.is_loaded() {
                return;
            }
        }

        self.emit(PlayerEvent::Resumed);
        self.backend.play();
        self.metrics.set_playback_state(PlaybackState::Playing);
        self.emit(PlayerEvent::Playing);
    }

    fn pause(&mut self) {
        if self.backend.is_loaded() && !self.backend.is_paused() {
            self.backend.pause();
            self.metrics.set_playback_state(PlaybackState::Paused);
            self.emit(PlayerEvent::Paused);
        }
    }

    fn seek(&mut self, secs: f64) {
        if !self.backend.is_loaded() {
            return;
        }

        match self.backend.seek(secs) {
            Ok(()) => {
                self.metrics.set_position(secs);
                self.emit(PlayerEvent::TimeUpdated(secs));
            }
            Err(e) => self.emit(PlayerEvent::Error(e.to_string())),
        }
    }

    fn emit(&self, event: PlayerEvent) {
        let _ = self.events.send(event);
    }
}
