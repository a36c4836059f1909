//! Tests for async event delivery

mod common;

use common::Host;
use futures::StreamExt;
use trackbind_core::{TrackKind, VideoDimensions};
use trackbind_media::{LocalTrack, TrackEvent, TrackEventKind};

#[tokio::test]
async fn test_stream_yields_started_then_stopped() {
    let host = Host::new();
    let (native, track) = host.track("1", TrackKind::Audio);
    let mut events = track.events();

    host.document.hidden_element().dispatch_can_play();
    native.end();

    let started = events.next().await.unwrap();
    assert_eq!(started.kind(), TrackEventKind::Started);
    assert_eq!(started.event_type(), "started");
    assert!(started.track().ptr_eq(&track));

    let stopped = events.next().await.unwrap();
    assert!(matches!(stopped, TrackEvent::Stopped { .. }));
    assert!(stopped.track().ptr_eq(&track));
}

#[tokio::test]
async fn test_stream_as_futures_stream() {
    let host = Host::new();
    let (_native, track) = host.track("1", TrackKind::Video);
    let hidden = host.document.hidden_element();
    hidden.set_video_dimensions(Some(VideoDimensions::new(640, 480)));
    let events = track.events();

    hidden.dispatch_can_play();

    let kinds: Vec<TrackEventKind> = events.take(2).map(|event| event.kind()).collect().await;
    assert_eq!(
        kinds,
        vec![TrackEventKind::DimensionsChanged, TrackEventKind::Started]
    );
}

#[test]
fn test_try_next_without_events() {
    let host = Host::new();
    let (_native, track) = host.bare_track("1", TrackKind::Audio);
    let mut events = track.events();

    assert!(events.try_next().unwrap().is_none());
    assert!(!events.is_closed());

    events.close();
    assert!(events.is_closed());
}

#[test]
fn test_closed_stream_is_dropped_from_fan_out() {
    let host = Host::new();
    let local = LocalTrack::new(
        trackbind_core::HeadlessTrack::new("1", TrackKind::Audio),
        host.options(),
    )
    .unwrap();
    let mut closed = local.events();
    closed.close();
    let mut open = local.events();

    local.disable();

    let event = tokio_test::block_on(open.next()).unwrap();
    assert_eq!(event.event_type(), "disabled");
    assert!(closed.try_next().is_err());
}
