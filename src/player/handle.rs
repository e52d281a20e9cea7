use crossbeam_channel::{Receiver, Sender};
use std::{sync::Arc, time::Duration};

use crate::{
    Error, Result,
    player::{
        MediaPlayer, MediaSource, PlayerEvent,
        core::{PlayerCommand, PlayerCore},
        metrics::PlaybackMetrics,
    },
};

pub struct RodioPlayer {
    commands: Sender<PlayerCommand>,
    events: Receiver<PlayerEvent>,
    metrics: Arc<PlaybackMetrics>,
}

impl RodioPlayer {
    /// Open the default output device on a dedicated player thread.
    /// `time_update` is the cadence of `TimeUpdated` events while playing.
    pub fn spawn(time_update: Duration) -> Result<Self> {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded();
        let (evt_tx, evt_rx) = crossbeam_channel::unbounded();
        let (ready_tx, ready_rx) = crossbeam_channel::bounded(1);
        let metrics = PlaybackMetrics::new();

        PlayerCore::spawn(cmd_rx, evt_tx, Arc::clone(&metrics), time_update, ready_tx);

        ready_rx
            .recv()
            .map_err(|_| Error::Player("player thread exited during startup".to_string()))?
            .map_err(|e| Error::Player(e.to_string()))?;

        Ok(Self {
            commands: cmd_tx,
            events: evt_rx,
            metrics,
        })
    }

    fn send(&self, cmd: PlayerCommand) -> Result<()> {
        self.commands
            .send(cmd)
            .map_err(|_| Error::Player("player thread is gone".to_string()))
    }
}

impl MediaPlayer for RodioPlayer {
    fn set_source(&mut self, source: MediaSource) -> Result<()> {
        self.metrics.set_position(0.0);
        self.send(PlayerCommand::SetSource(source))
    }

    fn load(&mut self) -> Result<()> {
        self.send(PlayerCommand::Load)
    }

    fn play(&mut self) -> Result<()> {
        self.send(PlayerCommand::Play)
    }

    fn pause(&mut self) -> Result<()> {
        self.send(PlayerCommand::Pause)
    }

    fn current_time(&self) -> f64 {
        self.metrics.get_position()
    }

    fn set_current_time(&mut self, secs: f64) -> Result<()> {
        self.metrics.set_position(secs);
        self.send(PlayerCommand::Seek(secs))
    }

    fn subscribe(&mut self) -> Receiver<PlayerEvent> {
        self.events.clone()
    }
}
