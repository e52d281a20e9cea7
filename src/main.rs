use std::time::Duration;

use reprise::{Reprise, Settings, playback::ResumePhase, player::RodioPlayer};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load()?;
    let player = RodioPlayer::spawn(settings.playback.time_update())?;
    let mut app = Reprise::open(settings, Box::new(player))?;

    let phase = app.start();

    let mut imported = 0;
    for path in std::env::args().skip(1) {
        match app.import_file(&path) {
            Ok(_) => imported += 1,
            Err(e) => tracing::error!("Could not import {path}: {e}"),
        }
    }

    if app.playlist().is_empty() {
        println!("Nothing to play. Usage: reprise [FILES...]");
        return Ok(());
    }

    // The player can still reject the resumed track after startup
    if phase.is_pending() {
        app.run_until(Duration::from_secs(1), |app, _| !app.resume_phase().is_pending());
    }

    // Without a resume, start with the first file given on the command line
    if app.resume_phase() == ResumePhase::NoResume {
        let first = match imported {
            0 => 0,
            n => app.playlist().len() - n,
        };
        app.select_track(first)?;
    }

    app.run_until(Duration::from_secs(1), |_, _| false);
    Ok(())
}
