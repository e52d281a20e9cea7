use crossbeam_channel::{select, tick};
use std::time::Duration;

use crate::{app_core::Reprise, player::PlayerEvent};

impl Reprise {
    /// Handle every event the player has queued so far and hand them back
    /// for display.
    pub fn poll(&mut self) -> Vec<PlayerEvent> {
        let events: Vec<PlayerEvent> = self.events.try_iter().collect();

        for event in &events {
            self.handle_player_event(event);
        }

        events
    }

    /// Run the event loop until `stop` returns true. `stop` is checked after
    /// every batch of events and at least once per `heartbeat`.
    pub fn run_until<F>(&mut self, heartbeat: Duration, mut stop: F)
    where
        F: FnMut(&Reprise, &[PlayerEvent]) -> bool,
    {
        let ticker = tick(heartbeat);
        let events = self.events.clone();

        loop {
            let batch = select! {
                recv(events) -> event => match event {
                    Ok(event) => {
                        self.handle_player_event(&event);
                        let mut batch = vec![event];
                        batch.extend(self.poll());
                        batch
                    }
                    Err(_) => {
                        tracing::error!("Player event stream closed");
                        return;
                    }
                },
                recv(ticker) -> _ => Vec::new(),
            };

            if stop(self, &batch) {
                break;
            }
        }
    }
}
