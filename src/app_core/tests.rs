use super::Reprise;
use crate::{
    Database, Error, Result, Settings, Track, TrackId,
    database::{PositionLedger, TrackStore},
    playback::ResumePhase,
    player::{
        PlayerEvent,
        scripted::{Call, Remote, ScriptedPlayer},
    },
};

fn session(db: &Database, settings: Settings) -> (Reprise, Remote) {
    let (player, remote) = ScriptedPlayer::new();
    let engine = Reprise::new(
        settings,
        Box::new(db.clone()),
        Box::new(db.clone()),
        Box::new(player),
    );
    (engine, remote)
}

fn stored(ids: &[&str]) -> Database {
    let db = Database::open_in_memory().unwrap();
    for id in ids {
        db.put(&Track::from_bytes(*id, id.as_bytes())).unwrap();
    }
    db
}

/// `a.mp3` and `b.mp3` stored, ledger left at `a.mp3` 42.5s.
fn resumable() -> Database {
    let db = stored(&["a.mp3", "b.mp3"]);
    db.record_playing("a.mp3").unwrap();
    db.record_position(42.5).unwrap();
    db
}

fn ids(names: &[&str]) -> Vec<TrackId> {
    names.iter().map(|s| s.to_string()).collect()
}

struct BrokenStore;

impl TrackStore for BrokenStore {
    fn put(&self, _: &Track) -> Result<()> {
        Err(Error::StoreUnavailable("quota exceeded".into()))
    }

    fn get(&self, _: &str) -> Result<Option<Track>> {
        Err(Error::StoreUnavailable("quota exceeded".into()))
    }

    fn list_all(&self) -> Result<Vec<Track>> {
        Err(Error::StoreUnavailable("quota exceeded".into()))
    }
}

// ==============
//    IMPORT
// ==============

#[test]
fn import_stores_track_and_appends_to_playlist() {
    let db = stored(&[]);
    let (mut engine, _remote) = session(&db, Settings::default());
    engine.start();

    engine.import("a.mp3", b"ID3 audio").unwrap();

    let track = db.get("a.mp3").unwrap().unwrap();
    assert_eq!(track.decode().unwrap(), b"ID3 audio");
    assert_eq!(engine.playlist().order(), ids(&["a.mp3"]));
    assert_eq!(engine.playlist().cursor(), None);
}

#[test]
fn import_file_uses_the_file_name_as_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("song.flac");
    std::fs::write(&path, b"fLaC").unwrap();

    let db = stored(&[]);
    let (mut engine, _remote) = session(&db, Settings::default());

    assert_eq!(engine.import_file(&path).unwrap(), "song.flac");
    let track = db.get("song.flac").unwrap().unwrap();
    assert_eq!(track.mime(), Some("audio/flac"));
}

#[test]
fn import_surfaces_store_failures() {
    let db = stored(&[]);
    let (player, _remote) = ScriptedPlayer::new();
    let mut engine = Reprise::new(
        Settings::default(),
        Box::new(BrokenStore),
        Box::new(db),
        Box::new(player),
    );

    let err = engine.import("a.mp3", b"x").unwrap_err();

    assert!(matches!(err, Error::StoreUnavailable(_)));
    assert!(engine.playlist().is_empty());
}

// ==============
//    RESUME
// ==============

#[test]
fn resume_seeks_plays_and_settles() {
    let db = resumable();
    let (mut engine, remote) = session(&db, Settings::default());

    assert_eq!(engine.start(), ResumePhase::AwaitingReady);
    assert_eq!(engine.playlist().order(), ids(&["a.mp3", "a.mp3", "b.mp3"]));
    assert_eq!(engine.playlist().cursor(), Some(0));
    assert_eq!(engine.now_playing().map(String::as_str), Some("a.mp3"));

    remote.emit(PlayerEvent::ReadyToPlay);
    engine.poll();

    assert_eq!(engine.resume_phase(), ResumePhase::AwaitingResumeRace);
    assert_eq!(
        remote.calls(),
        vec![
            Call::SetSource("a.mp3".into()),
            Call::Load,
            Call::Seek(42.5),
            Call::Play,
        ]
    );

    remote.emit(PlayerEvent::Resumed);
    remote.emit(PlayerEvent::Playing);
    engine.poll();

    assert_eq!(engine.resume_phase(), ResumePhase::Resumed);
    assert_eq!(remote.play_count(), 2);
    assert!(engine.current_time() >= 42.5);
    assert_eq!(db.read_state().unwrap().last_position, 42.5);
}

#[test]
fn resume_leaves_a_moved_playhead_alone() {
    let db = resumable();
    let (mut engine, remote) = session(&db, Settings::default());
    engine.start();

    remote.emit(PlayerEvent::ReadyToPlay);
    engine.poll();

    remote.set_time(44.0);
    remote.emit(PlayerEvent::Playing);
    engine.poll();

    assert_eq!(engine.resume_phase(), ResumePhase::Resumed);
    assert_eq!(remote.play_count(), 1);
}

#[test]
fn position_updates_before_the_seek_keep_the_saved_position() {
    let db = resumable();
    let (mut engine, remote) = session(&db, Settings::default());
    engine.start();

    remote.emit(PlayerEvent::TimeUpdated(0.0));
    remote.emit(PlayerEvent::Paused);
    engine.poll();

    assert_eq!(db.read_state().unwrap().last_position, 42.5);
}

#[test]
fn positions_are_persisted_once_resumed() {
    let db = resumable();
    let (mut engine, remote) = session(&db, Settings::default());
    engine.start();
    remote.emit(PlayerEvent::ReadyToPlay);
    remote.emit(PlayerEvent::Playing);
    engine.poll();

    remote.set_time(47.25);
    remote.emit(PlayerEvent::TimeUpdated(47.25));
    engine.poll();

    let state = db.read_state().unwrap();
    assert_eq!(state.last_track_id.as_deref(), Some("a.mp3"));
    assert_eq!(state.last_position, 47.25);
}

#[test]
fn missing_resume_track_falls_back_to_stored_playlist() {
    let db = stored(&["b.mp3", "c.mp3"]);
    db.record_playing("gone.mp3").unwrap();
    db.record_position(3.0).unwrap();
    let (mut engine, remote) = session(&db, Settings::default());

    assert_eq!(engine.start(), ResumePhase::NoResume);
    assert_eq!(engine.playlist().order(), ids(&["b.mp3", "c.mp3"]));
    assert_eq!(engine.playlist().cursor(), None);
    assert_eq!(engine.now_playing(), None);
    assert!(remote.calls().is_empty());
}

#[test]
fn nothing_saved_means_no_resume() {
    let db = stored(&["a.mp3"]);
    let (mut engine, remote) = session(&db, Settings::default());

    assert_eq!(engine.start(), ResumePhase::NoResume);
    assert_eq!(engine.playlist().order(), ids(&["a.mp3"]));
    assert!(remote.calls().is_empty());
}

#[test]
fn unavailable_store_still_starts_a_session() {
    let ledger = resumable();
    let (player, _remote) = ScriptedPlayer::new();
    let mut engine = Reprise::new(
        Settings::default(),
        Box::new(BrokenStore),
        Box::new(ledger),
        Box::new(player),
    );

    assert_eq!(engine.start(), ResumePhase::NoResume);
    assert!(engine.playlist().is_empty());
}

#[test]
fn player_refusing_the_source_aborts_resume() {
    let db = resumable();
    let (mut engine, remote) = session(&db, Settings::default());
    remote.fail_load(true);

    assert_eq!(engine.start(), ResumePhase::NoResume);
    assert_eq!(engine.playlist().order(), ids(&["a.mp3", "b.mp3"]));
}

#[test]
fn player_error_while_resuming_falls_back_to_no_resume() {
    let db = resumable();
    let (mut engine, remote) = session(&db, Settings::default());
    assert_eq!(engine.start(), ResumePhase::AwaitingReady);

    remote.emit(PlayerEvent::Error("a.mp3: unrecognized format".into()));
    engine.poll();

    assert_eq!(engine.resume_phase(), ResumePhase::NoResume);
    assert_eq!(engine.now_playing(), None);

    // A late ready from the dropped source must not seek
    remote.emit(PlayerEvent::ReadyToPlay);
    remote.set_time(9.0);
    remote.emit(PlayerEvent::TimeUpdated(9.0));
    engine.poll();

    assert!(!remote.calls().contains(&Call::Seek(42.5)));
    assert_eq!(db.read_state().unwrap().last_position, 42.5);
}

#[test]
fn failed_resume_seek_still_persists_positions() {
    let db = resumable();
    let (mut engine, remote) = session(&db, Settings::default());
    remote.fail_seek(true);
    engine.start();

    remote.emit(PlayerEvent::ReadyToPlay);
    engine.poll();
    assert_eq!(engine.resume_phase(), ResumePhase::NoResume);
    assert_eq!(engine.now_playing().map(String::as_str), Some("a.mp3"));

    remote.set_time(3.0);
    remote.emit(PlayerEvent::Paused);
    engine.poll();

    assert_eq!(db.read_state().unwrap().last_position, 3.0);
}

#[test]
fn resume_can_be_disabled() {
    let db = resumable();
    let mut settings = Settings::default();
    settings.playback.resume_on_startup = false;
    let (mut engine, remote) = session(&db, settings);

    assert_eq!(engine.start(), ResumePhase::NoResume);
    assert_eq!(engine.playlist().order(), ids(&["a.mp3", "b.mp3"]));
    assert!(remote.calls().is_empty());
}

#[test]
fn dedupe_setting_removes_the_duplicate_resume_entry() {
    let db = resumable();
    let mut settings = Settings::default();
    settings.playlist.dedupe_resume_track = true;
    let (mut engine, _remote) = session(&db, settings);

    engine.start();

    assert_eq!(engine.playlist().order(), ids(&["a.mp3", "b.mp3"]));
}

#[test]
fn user_selection_supersedes_a_pending_resume() {
    let db = resumable();
    let (mut engine, remote) = session(&db, Settings::default());
    engine.start();

    engine.select_track(2).unwrap();
    remote.clear_calls();

    remote.emit(PlayerEvent::ReadyToPlay);
    remote.emit(PlayerEvent::Playing);
    engine.poll();

    assert_eq!(engine.resume_phase(), ResumePhase::Superseded);
    assert!(!remote.calls().contains(&Call::Seek(42.5)));
    assert_eq!(engine.now_playing().map(String::as_str), Some("b.mp3"));

    let state = db.read_state().unwrap();
    assert_eq!(state.last_track_id.as_deref(), Some("b.mp3"));
    assert_eq!(state.last_position, 0.0);
}

#[test]
fn refused_selection_keeps_the_pending_resume() {
    let db = resumable();
    let (mut engine, remote) = session(&db, Settings::default());
    engine.start();
    remote.fail_load(true);

    assert!(matches!(engine.select_track(2), Err(Error::Player(_))));

    assert_eq!(engine.resume_phase(), ResumePhase::AwaitingReady);
    assert_eq!(engine.playlist().cursor(), Some(0));

    let state = db.read_state().unwrap();
    assert_eq!(state.last_track_id.as_deref(), Some("a.mp3"));
    assert_eq!(state.last_position, 42.5);
}

// ==============
//    PLAYLIST
// ==============

#[test]
fn select_track_attaches_plays_and_records() {
    let db = stored(&["a.mp3", "b.mp3"]);
    let (mut engine, remote) = session(&db, Settings::default());
    engine.start();

    engine.select_track(1).unwrap();

    assert_eq!(engine.playlist().cursor(), Some(1));
    assert_eq!(
        remote.calls(),
        vec![Call::SetSource("b.mp3".into()), Call::Load, Call::Play]
    );
    assert_eq!(remote.source().unwrap().bytes, b"b.mp3");

    let state = db.read_state().unwrap();
    assert_eq!(state.last_track_id.as_deref(), Some("b.mp3"));
    assert_eq!(state.last_position, 0.0);
}

#[test]
fn select_track_out_of_range_changes_nothing() {
    let db = stored(&["a.mp3", "b.mp3"]);
    let (mut engine, remote) = session(&db, Settings::default());
    engine.start();
    engine.select_track(0).unwrap();
    remote.clear_calls();

    let err = engine.select_track(2).unwrap_err();

    assert!(matches!(err, Error::IndexOutOfRange { index: 2, len: 2 }));
    assert_eq!(engine.playlist().cursor(), Some(0));
    assert_eq!(engine.playlist().order(), ids(&["a.mp3", "b.mp3"]));
    assert!(remote.calls().is_empty());
}

#[test]
fn select_track_with_corrupt_payload_surfaces_the_error() {
    let db = stored(&["a.mp3"]);
    let (mut engine, remote) = session(&db, Settings::default());
    engine.start();
    db.put(&Track::new("a.mp3", "garbage")).unwrap();

    let err = engine.select_track(0).unwrap_err();

    assert!(matches!(err, Error::MalformedPayload(_)));
    assert_eq!(engine.playlist().cursor(), None);
    assert_eq!(db.read_state().unwrap().last_track_id, None);
    assert!(remote.calls().is_empty());
}

#[test]
fn advance_wraps_and_forces_playback() {
    let db = stored(&["a.mp3", "b.mp3", "c.mp3"]);
    let (mut engine, remote) = session(&db, Settings::default());
    engine.start();
    engine.select_track(2).unwrap();
    remote.clear_calls();

    engine.advance().unwrap();

    assert_eq!(engine.playlist().cursor(), Some(0));
    assert_eq!(engine.now_playing().map(String::as_str), Some("a.mp3"));
    assert_eq!(
        remote.calls(),
        vec![
            Call::SetSource("a.mp3".into()),
            Call::Load,
            Call::Play,
            Call::Load,
            Call::Play,
        ]
    );
    assert_eq!(
        db.read_state().unwrap().last_track_id.as_deref(),
        Some("a.mp3")
    );
}

#[test]
fn advance_on_empty_playlist_fails() {
    let db = stored(&[]);
    let (mut engine, _remote) = session(&db, Settings::default());
    engine.start();

    assert!(matches!(engine.advance(), Err(Error::EmptyPlaylist)));
}

#[test]
fn track_end_advances_to_the_next_track() {
    let db = stored(&["a.mp3", "b.mp3"]);
    let (mut engine, remote) = session(&db, Settings::default());
    engine.start();
    engine.select_track(0).unwrap();

    remote.emit(PlayerEvent::Ended);
    engine.poll();

    assert_eq!(engine.playlist().cursor(), Some(1));
    assert_eq!(engine.now_playing().map(String::as_str), Some("b.mp3"));
}

#[test]
fn pause_persists_the_current_position() {
    let db = stored(&["a.mp3"]);
    let (mut engine, remote) = session(&db, Settings::default());
    engine.start();
    engine.select_track(0).unwrap();

    remote.set_time(12.5);
    remote.emit(PlayerEvent::Paused);
    engine.poll();
    remote.emit(PlayerEvent::Paused);
    engine.poll();

    assert_eq!(db.read_state().unwrap().last_position, 12.5);
}

#[test]
fn toggle_playback_follows_reported_state() {
    let db = stored(&["a.mp3"]);
    let (mut engine, remote) = session(&db, Settings::default());
    engine.start();
    engine.select_track(0).unwrap();

    remote.emit(PlayerEvent::Playing);
    engine.poll();
    assert!(engine.is_playing());

    remote.clear_calls();
    engine.toggle_playback().unwrap();
    assert_eq!(remote.calls(), vec![Call::Pause]);

    remote.emit(PlayerEvent::Paused);
    engine.poll();
    assert!(!engine.is_playing());

    remote.clear_calls();
    engine.toggle_playback().unwrap();
    assert_eq!(remote.calls(), vec![Call::Play]);
}

#[test]
fn seek_clamps_negative_positions() {
    let db = stored(&["a.mp3"]);
    let (mut engine, remote) = session(&db, Settings::default());
    engine.start();
    engine.select_track(0).unwrap();
    remote.set_time(5.0);

    engine.seek(-4.0).unwrap();

    assert_eq!(remote.time(), 0.0);
}

#[test]
fn session_resumes_where_the_previous_one_stopped() {
    let db = stored(&["a.mp3", "b.mp3"]);

    {
        let (mut engine, remote) = session(&db, Settings::default());
        engine.start();
        engine.select_track(1).unwrap();
        remote.set_time(30.0);
        remote.emit(PlayerEvent::Paused);
        engine.poll();
    }

    let (mut engine, remote) = session(&db, Settings::default());
    engine.start();
    remote.emit(PlayerEvent::ReadyToPlay);
    engine.poll();

    assert_eq!(engine.now_playing().map(String::as_str), Some("b.mp3"));
    assert!(remote.calls().contains(&Call::Seek(30.0)));
}
