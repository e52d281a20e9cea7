//! A player that does nothing on its own. Tests decide which events fire and
//! when, and inspect the calls the engine made.

use crossbeam_channel::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    Error, Result,
    player::{MediaPlayer, MediaSource, PlayerEvent},
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    SetSource(String),
    Load,
    Play,
    Pause,
    Seek(f64),
}

#[derive(Default)]
pub struct Script {
    pub calls: Vec<Call>,
    pub source: Option<MediaSource>,
    pub current_time: f64,
    pub fail_load: bool,
    pub fail_seek: bool,
}

pub struct ScriptedPlayer {
    script: Arc<Mutex<Script>>,
    events: Receiver<PlayerEvent>,
}

/// The test's side of a [`ScriptedPlayer`] once the engine owns the player.
#[derive(Clone)]
pub struct Remote {
    script: Arc<Mutex<Script>>,
    events: Sender<PlayerEvent>,
}

impl ScriptedPlayer {
    pub fn new() -> (Self, Remote) {
        let (events_tx, events) = crossbeam_channel::unbounded();
        let script = Arc::new(Mutex::new(Script::default()));

        let remote = Remote {
            script: Arc::clone(&script),
            events: events_tx,
        };

        let player = ScriptedPlayer { script, events };

        (player, remote)
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }
}

impl MediaPlayer for ScriptedPlayer {
    fn set_source(&mut self, source: MediaSource) -> Result<()> {
        let mut script = self.script();
        script.calls.push(Call::SetSource(source.id.clone()));
        script.source = Some(source);
        script.current_time = 0.0;
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        let mut script = self.script();
        script.calls.push(Call::Load);

        match script.fail_load {
            true => Err(Error::Player("load refused".to_string())),
            false => Ok(()),
        }
    }

    fn play(&mut self) -> Result<()> {
        self.script().calls.push(Call::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.script().calls.push(Call::Pause);
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.script().current_time
    }

    fn set_current_time(&mut self, secs: f64) -> Result<()> {
        let mut script = self.script();
        script.calls.push(Call::Seek(secs));

        if script.fail_seek {
            return Err(Error::Player("seek refused".to_string()));
        }

        script.current_time = secs;
        Ok(())
    }

    fn subscribe(&mut self) -> Receiver<PlayerEvent> {
        self.events.clone()
    }
}

impl Remote {
    pub fn emit(&self, event: PlayerEvent) {
        self.events.send(event).unwrap();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.script.lock().unwrap().calls.clear();
    }

    pub fn play_count(&self) -> usize {
        self.calls().iter().filter(|c| **c == Call::Play).count()
    }

    pub fn set_time(&self, secs: f64) {
        self.script.lock().unwrap().current_time = secs;
    }

    pub fn time(&self) -> f64 {
        self.script.lock().unwrap().current_time
    }

    pub fn source(&self) -> Option<MediaSource> {
        self.script.lock().unwrap().source.clone()
    }

    pub fn fail_load(&self, fail: bool) {
        self.script.lock().unwrap().fail_load = fail;
    }

    pub fn fail_seek(&self, fail: bool) {
        self.script.lock().unwrap().fail_seek = fail;
    }
}
