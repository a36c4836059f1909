//! Integration tests for session ownership and configuration

use std::cell::Cell;
use std::rc::Rc;
use trackbind::{
    AttachTarget, GlobalConfig, HeadlessDocument, HeadlessStreamFactory, HeadlessTrack,
    LocalTrack, RemoteTrack, Track, TrackError, TrackEventKind, TrackInitializer, TrackKind,
    TrackOptions, TrackSession, TrackSignaling,
};

/// Leaves tracks without the hidden render-ready element
struct NoopInitializer;

impl TrackInitializer for NoopInitializer {
    fn initialize(&self, _track: &Track) {}
}

fn options() -> TrackOptions {
    TrackOptions::new(HeadlessDocument::new(), HeadlessStreamFactory::new())
        .with_initializer(Rc::new(NoopInitializer))
}

fn local(id: &str, kind: TrackKind) -> LocalTrack {
    LocalTrack::new(HeadlessTrack::new(id, kind), options()).unwrap()
}

// ============================================================================
// CONFIGURATION TESTS
// ============================================================================

#[test]
fn test_global_config_default() {
    let config = GlobalConfig::default();

    assert!(!config.debug_logging);
    assert_eq!(config.max_tracks, 64);
    assert!(config.log_filter.is_none());
    assert_eq!(config.filter_directive(), "info");
}

#[test]
fn test_global_config_from_json() {
    let config: GlobalConfig =
        serde_json::from_str(r#"{"debug_logging": true, "max_tracks": 2}"#).unwrap();

    assert!(config.debug_logging);
    assert_eq!(config.max_tracks, 2);
    assert_eq!(config.filter_directive(), "debug");
}

#[test]
fn test_explicit_filter_wins() {
    let config = GlobalConfig {
        debug_logging: true,
        log_filter: Some("trackbind_media=trace".to_string()),
        ..Default::default()
    };

    assert_eq!(config.filter_directive(), "trackbind_media=trace");
}

// ============================================================================
// SESSION TESTS
// ============================================================================

#[test]
fn test_add_get_remove() {
    let mut session = TrackSession::new();
    session.add(local("mic", TrackKind::Audio)).unwrap();
    session.add(local("cam", TrackKind::Video)).unwrap();

    assert_eq!(session.len(), 2);
    assert_eq!(session.get("cam").unwrap().kind(), TrackKind::Video);

    let removed = session.remove("mic").unwrap();
    assert_eq!(removed.id(), "mic");
    assert!(session.get("mic").is_none());
    assert_eq!(
        session.remove("mic").err(),
        Some(TrackError::TrackNotFound {
            track_id: "mic".to_string()
        })
    );
}

#[test]
fn test_duplicate_id_is_rejected() {
    let mut session = TrackSession::new();
    session.add(local("mic", TrackKind::Audio)).unwrap();

    let result = session.add(local("mic", TrackKind::Audio));

    assert!(matches!(result, Err(TrackError::TrackAlreadyExists { .. })));
    assert_eq!(session.len(), 1);
}

#[test]
fn test_track_limit() {
    let mut session = TrackSession::with_config(GlobalConfig {
        max_tracks: 1,
        ..Default::default()
    });
    session.add(local("mic", TrackKind::Audio)).unwrap();

    let result = session.add(local("cam", TrackKind::Video));

    assert!(matches!(result, Err(TrackError::InvalidConfiguration { .. })));
}

#[test]
fn test_prune_drops_only_finished_tracks() {
    let mut session = TrackSession::new();

    let stopped = local("stopped", TrackKind::Audio);
    let stopped_but_attached = local("attached", TrackKind::Video);
    let live = local("live", TrackKind::Audio);
    let remote_native = HeadlessTrack::new("remote", TrackKind::Video);
    let remote = RemoteTrack::new(
        remote_native.clone(),
        TrackSignaling::new("remote", TrackKind::Video, true),
        options(),
    )
    .unwrap();

    let _element = stopped_but_attached.attach(AttachTarget::None).unwrap();
    stopped.stop();
    stopped_but_attached.stop();
    remote_native.end();

    for track in [stopped.clone(), stopped_but_attached.clone(), live.clone()] {
        session.add(track).unwrap();
    }
    session.add(remote).unwrap();

    let mut pruned = session.prune();
    pruned.sort();
    assert_eq!(pruned, vec!["remote".to_string(), "stopped".to_string()]);
    assert_eq!(session.len(), 2);

    stopped_but_attached.detach(AttachTarget::None).unwrap();
    assert_eq!(session.prune(), vec!["attached".to_string()]);
    let remaining: Vec<&str> = session.tracks().map(|t| t.id()).collect();
    assert_eq!(remaining, vec!["live"]);
}

#[test]
fn test_stopped_event_drives_prune() {
    let mut session = TrackSession::new();
    let native = HeadlessTrack::new("mic", TrackKind::Audio);
    let track = LocalTrack::new(
        native,
        TrackOptions::new(HeadlessDocument::new(), HeadlessStreamFactory::new()),
    )
    .unwrap();
    let stopped = Rc::new(Cell::new(false));
    let flag = stopped.clone();
    track.on(TrackEventKind::Stopped, move |_| flag.set(true));
    session.add(track.clone()).unwrap();

    assert_eq!(track.attachment_count(), 1);

    track.stop();

    assert!(stopped.get());
    assert!(!track.is_started());
    assert_eq!(track.attachment_count(), 0);
    assert_eq!(session.prune(), vec!["mic".to_string()]);
    assert!(session.is_empty());
}

#[tokio::test]
async fn test_session_tracks_stream_events() {
    let mut session = TrackSession::new();
    let track = LocalTrack::new(
        HeadlessTrack::new("cam", TrackKind::Video),
        TrackOptions::new(HeadlessDocument::new(), HeadlessStreamFactory::new()),
    )
    .unwrap();
    session.add(track.clone()).unwrap();
    let mut events = session.get("cam").unwrap().events();

    track.disable();
    track.stop();

    assert_eq!(events.next().await.unwrap().event_type(), "disabled");
    assert_eq!(events.next().await.unwrap().event_type(), "stopped");
}
