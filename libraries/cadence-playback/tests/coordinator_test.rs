//! Integration tests for the playback coordinator
//!
//! Drives the coordinator against a mock device that reports back through
//! the inbox, the way the browser binding does.

mod common;

use cadence_core::{Track, TrackId};
use cadence_playback::{
    CoordinatorState, DeviceEvent, DeviceInbox, PlaybackConfig, PlaybackCoordinator,
    PlaybackError, PlaybackEvent,
};
use common::{coordinator, playlist, stream_url, track, with_device, MockDevice};

// ===== Selection and auto-advance =====

#[test]
fn select_then_end_advances_to_next_track() {
    let (mut player, inbox, log) = coordinator();
    player.set_playlist(playlist(&[1, 2, 3]));

    player.select_by_index(0).unwrap();
    assert_eq!(player.state(), CoordinatorState::Loading);
    player.pump(&inbox);

    assert_eq!(player.state(), CoordinatorState::Playing);
    assert!(player.status().is_playing);
    assert_eq!(player.status().current_time, 0.0);
    assert_eq!(player.active_track_id(), Some(&TrackId::from(1u64)));

    inbox.push(player.generation(), DeviceEvent::TimeUpdate { position: 212.0 });
    inbox.push(player.generation(), DeviceEvent::Ended);
    player.pump(&inbox);

    // Reloaded with B's stream and asked to play
    assert_eq!(player.active_track_id(), Some(&TrackId::from(2u64)));
    assert_eq!(log.borrow().last_source(), Some(stream_url(2).as_str()));
    assert_eq!(log.borrow().play_requests, 2);
    assert_eq!(player.status().current_time, 0.0);
    assert_eq!(player.state(), CoordinatorState::Playing);
}

#[test]
fn end_of_last_track_wraps_to_first() {
    let (mut player, inbox, _log) = coordinator();
    player.set_playlist(playlist(&[1, 2, 3]));
    player.select_by_index(2).unwrap();
    player.pump(&inbox);

    inbox.push(player.generation(), DeviceEvent::Ended);
    player.pump(&inbox);

    assert_eq!(player.active_index(), Some(0));
}

#[test]
fn track_ended_event_names_the_finished_track() {
    let (mut player, inbox, _log) = coordinator();
    player.set_playlist(playlist(&[1, 2]));
    player.select_by_index(0).unwrap();
    player.pump(&inbox);
    player.drain_events();

    let ended_generation = player.generation();
    inbox.push(ended_generation, DeviceEvent::Ended);
    player.pump(&inbox);

    let events = player.drain_events();
    let ended = events
        .iter()
        .position(|e| matches!(e, PlaybackEvent::TrackEnded { .. }))
        .unwrap();
    let changed = events
        .iter()
        .position(|e| matches!(e, PlaybackEvent::TrackChanged { .. }))
        .unwrap();

    assert!(ended < changed);
    assert_eq!(
        events[ended],
        PlaybackEvent::TrackEnded {
            track_id: Some(TrackId::from(1u64)),
            generation: ended_generation,
        }
    );
    assert_eq!(
        events[changed],
        PlaybackEvent::TrackChanged {
            track_id: TrackId::from(2u64),
            previous_track_id: Some(TrackId::from(1u64)),
        }
    );
}

#[test]
fn end_with_empty_playlist_goes_idle() {
    let (mut player, inbox, log) = coordinator();
    player.set_playlist(playlist(&[1]));
    player.select_by_index(0).unwrap();
    player.pump(&inbox);

    player.set_playlist(playlist(&[]));
    inbox.push(player.generation(), DeviceEvent::Ended);
    player.pump(&inbox);

    assert_eq!(player.state(), CoordinatorState::Idle);
    assert!(!player.status().is_playing);
    assert!(log.borrow().clears >= 1);
    // The selection is kept for display until shutdown
    assert_eq!(player.active_track_id(), Some(&TrackId::from(1u64)));
    assert_eq!(player.active_index(), None);
}

// ===== Filter changes =====

#[test]
fn next_after_filter_change_selects_first_remaining_track() {
    let (mut player, inbox, _log) = coordinator();
    player.set_playlist(playlist(&[1, 2, 3]));
    player.select_by_index(1).unwrap();
    player.pump(&inbox);

    player.set_playlist(playlist(&[3]));
    assert_eq!(player.active_index(), None);
    assert_eq!(player.active_track_id(), Some(&TrackId::from(2u64)));

    player.next().unwrap();

    assert_eq!(player.active_track_id(), Some(&TrackId::from(3u64)));
    assert_eq!(player.active_index(), Some(0));
}

#[test]
fn previous_after_filter_change_selects_last_track() {
    let (mut player, inbox, _log) = coordinator();
    player.set_playlist(playlist(&[1, 2, 3, 4]));
    player.select_by_index(0).unwrap();
    player.pump(&inbox);

    player.set_playlist(playlist(&[2, 3, 4]));
    player.previous().unwrap();

    assert_eq!(player.active_track_id(), Some(&TrackId::from(4u64)));
}

#[test]
fn active_index_follows_identity_not_position() {
    let (mut player, inbox, _log) = coordinator();
    player.set_playlist(playlist(&[1, 2, 3]));
    player.select_by_index(2).unwrap();
    player.pump(&inbox);

    player.set_playlist(playlist(&[3, 1]));

    assert_eq!(player.active_index(), Some(0));
}

// ===== Transport =====

#[test]
fn toggle_play_pause_twice_restores_state() {
    let (mut player, inbox, _log) = coordinator();
    player.set_playlist(playlist(&[1, 2]));
    player.select_by_index(0).unwrap();
    player.pump(&inbox);
    assert!(player.status().is_playing);

    player.toggle_play_pause();
    player.pump(&inbox);
    assert!(!player.status().is_playing);
    assert_eq!(player.state(), CoordinatorState::Paused);

    player.toggle_play_pause();
    player.pump(&inbox);
    assert!(player.status().is_playing);
    assert_eq!(player.state(), CoordinatorState::Playing);
    assert_eq!(player.active_index(), Some(0));
}

#[test]
fn mute_toggles_around_zero() {
    let (mut player, _inbox, log) = coordinator();

    player.set_volume(0.0);
    player.toggle_mute();
    assert_eq!(player.status().volume, 1.0);

    player.set_volume(1.0);
    player.toggle_mute();
    assert_eq!(player.status().volume, 0.0);
    assert!(player.status().is_muted());

    assert_eq!(log.borrow().volumes.last(), Some(&0.0));
}

#[test]
fn seek_is_forwarded_to_device() {
    let (mut player, inbox, log) = coordinator();
    player.set_playlist(playlist(&[1]));
    player.select_by_index(0).unwrap();
    player.pump(&inbox);

    player.seek(42.5);

    assert_eq!(log.borrow().seeks, vec![42.5]);
}

// ===== Failures =====

#[test]
fn autoplay_rejection_leaves_track_paused() {
    let inbox = DeviceInbox::new();
    let (device, _log) = MockDevice::new(inbox.clone());
    let mut player = with_device(device.rejecting_play());
    player.set_playlist(playlist(&[1, 2]));

    player.select_by_index(1).unwrap();
    player.pump(&inbox);

    assert_eq!(player.state(), CoordinatorState::Paused);
    assert!(!player.status().is_playing);
    assert_eq!(player.active_index(), Some(1));
}

#[test]
fn play_refused_on_the_spot_settles_paused() {
    let inbox = DeviceInbox::new();
    let (device, log) = MockDevice::new(inbox.clone());
    let mut player = with_device(device.throwing_play());
    player.set_playlist(playlist(&[1]));

    player.select_by_index(0).unwrap();
    player.pump(&inbox);

    assert_eq!(player.state(), CoordinatorState::Paused);
    assert!(!player.status().is_playing);
    assert_eq!(player.active_index(), Some(0));
    assert_eq!(log.borrow().play_requests, 1);

    player.toggle_play_pause();
    player.pump(&inbox);

    assert_eq!(player.state(), CoordinatorState::Paused);
    assert_eq!(log.borrow().play_requests, 2);
}

#[test]
fn unavailable_stream_ejects_previous_source() {
    let inbox = DeviceInbox::new();
    let (device, log) = MockDevice::new(inbox.clone());
    let mut player = with_device(device.with_unavailable(&stream_url(2)));
    player.set_playlist(playlist(&[1, 2, 3]));
    player.select_by_index(0).unwrap();
    player.pump(&inbox);
    player.drain_events();

    player.select_by_index(1).unwrap();
    player.pump(&inbox);

    assert_eq!(player.state(), CoordinatorState::Paused);
    assert!(!player.status().is_playing);
    assert_eq!(player.active_track_id(), Some(&TrackId::from(2u64)));
    assert!(log.borrow().clears >= 1);
    assert!(player.drain_events().iter().any(|e| matches!(
        e,
        PlaybackEvent::LoadFailed { track_id, .. } if *track_id == TrackId::from(2u64)
    )));

    // No automatic skip; the user moves on explicitly
    player.next().unwrap();
    player.pump(&inbox);
    assert_eq!(player.active_index(), Some(2));
    assert!(player.status().is_playing);
}

#[test]
fn device_failure_does_not_auto_skip() {
    let (mut player, inbox, log) = coordinator();
    player.set_playlist(playlist(&[1, 2]));
    player.select_by_index(0).unwrap();
    player.pump(&inbox);

    inbox.push(
        player.generation(),
        DeviceEvent::Failed {
            reason: "decode error".to_string(),
        },
    );
    player.pump(&inbox);

    assert_eq!(player.state(), CoordinatorState::Paused);
    assert_eq!(player.active_index(), Some(0));
    assert_eq!(log.borrow().sources.len(), 1);
}

#[test]
fn track_without_stream_never_plays() {
    let (mut player, inbox, log) = coordinator();
    player.set_playlist(
        vec![
            track(1),
            Track::new(2u64, "No Stream", "Nobody", ""),
        ]
        .into(),
    );

    player.select_by_index(1).unwrap();
    player.pump(&inbox);

    assert!(!player.status().is_playing);
    assert_eq!(player.state(), CoordinatorState::Paused);
    assert!(log.borrow().sources.is_empty());
}

#[test]
fn invalid_navigation_is_a_no_op() {
    let (mut player, _inbox, log) = coordinator();

    assert!(matches!(player.next(), Err(PlaybackError::PlaylistEmpty)));

    player.set_playlist(playlist(&[1]));
    assert!(matches!(
        player.select_by_index(1),
        Err(PlaybackError::IndexOutOfBounds { index: 1, len: 1 })
    ));
    assert!(player.active_track().is_none());
    assert!(log.borrow().sources.is_empty());
}

// ===== Lifecycle =====

#[test]
fn first_playlist_cues_without_playing() {
    let inbox = DeviceInbox::new();
    let (device, log) = MockDevice::new(inbox.clone());
    let mut player = PlaybackCoordinator::new(device, PlaybackConfig::default());

    player.set_playlist(playlist(&[5, 6]));
    player.pump(&inbox);

    assert_eq!(player.active_index(), Some(0));
    assert_eq!(player.state(), CoordinatorState::Paused);
    assert_eq!(log.borrow().last_source(), Some(stream_url(5).as_str()));
    assert_eq!(log.borrow().play_requests, 0);

    player.toggle_play_pause();
    player.pump(&inbox);
    assert_eq!(player.state(), CoordinatorState::Playing);
}

#[test]
fn shutdown_releases_device_and_ignores_late_events() {
    let (mut player, inbox, log) = coordinator();
    player.set_playlist(playlist(&[1, 2]));
    player.select_by_index(0).unwrap();
    player.pump(&inbox);
    let generation = player.generation();

    player.shutdown();
    inbox.push(generation, DeviceEvent::Ended);
    player.pump(&inbox);

    assert_eq!(player.state(), CoordinatorState::Idle);
    assert!(player.active_track().is_none());
    assert_eq!(log.borrow().clears, 1);
    assert_eq!(log.borrow().sources.len(), 1);
}
