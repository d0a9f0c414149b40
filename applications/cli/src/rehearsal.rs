//! Playback rehearsal
//!
//! Runs the playback coordinator over a [`SimulatedDevice`](crate::device)
//! until a number of tracks have played to their end, exercising auto-advance
//! and wraparound without any audio output.

use crate::device::simulated;
use cadence_core::{format_clock, Playlist, TrackId};
use cadence_playback::{
    AudioDevice, DeviceInbox, PlaybackConfig, PlaybackCoordinator, PlaybackError, PlaybackEvent,
};
use std::collections::HashMap;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct RehearsalOptions {
    /// Stop after this many tracks ended
    pub tracks: usize,
    /// Length of tracks whose catalog entry has no duration (seconds)
    pub track_secs: f64,
    /// Simulated time per step (seconds)
    pub tick_secs: f64,
}

impl Default for RehearsalOptions {
    fn default() -> Self {
        Self {
            tracks: 3,
            track_secs: 60.0,
            tick_secs: 15.0,
        }
    }
}

/// What happened during a rehearsal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RehearsalReport {
    /// Every track that became the active selection, in order
    pub selected: Vec<TrackId>,
    /// Tracks that played to their end, in order
    pub ended: Vec<TrackId>,
    /// Tracks that could not be loaded or played
    pub failed: Vec<TrackId>,
    /// Simulated seconds elapsed
    pub elapsed_secs: f64,
}

/// Play through `playlist` until `options.tracks` tracks have ended
///
/// Unplayable tracks are skipped by hand, the way a listener would press
/// "next"; the rehearsal stops early if the whole playlist is unplayable.
pub fn rehearse(
    playlist: Playlist,
    config: PlaybackConfig,
    options: &RehearsalOptions,
) -> Result<RehearsalReport, PlaybackError> {
    if playlist.is_empty() {
        return Err(PlaybackError::PlaylistEmpty);
    }

    let lengths: HashMap<String, f64> = playlist
        .iter()
        .filter_map(|track| {
            track
                .duration()
                .map(|d| (track.stream_url().to_string(), d.as_secs_f64()))
        })
        .collect();
    let tick = if options.tick_secs > 0.0 {
        options.tick_secs
    } else {
        1.0
    };

    let inbox = DeviceInbox::new();
    let (device, clock) = simulated(inbox.clone(), options.track_secs.max(tick), lengths);
    let mut player = PlaybackCoordinator::new(device, config);
    let mut report = RehearsalReport::default();
    let playlist_len = playlist.len();

    player.set_playlist(playlist);
    if player.active_track().is_none() {
        player.select_by_index(0)?;
    } else {
        player.toggle_play_pause();
    }
    player.pump(&inbox);
    record(&mut player, &mut report);

    let mut consecutive_failures = 0;
    while report.ended.len() < options.tracks {
        if !clock.is_playing() {
            consecutive_failures += 1;
            if consecutive_failures > playlist_len {
                warn!("No playable track left, stopping rehearsal");
                break;
            }
            debug!("Selection is not playing, skipping ahead");
            player.next()?;
        } else {
            consecutive_failures = 0;
            clock.advance(tick);
            report.elapsed_secs += tick;
        }

        player.pump(&inbox);
        record(&mut player, &mut report);
    }

    player.shutdown();
    record(&mut player, &mut report);
    info!(
        ended = report.ended.len(),
        failed = report.failed.len(),
        elapsed = %format_clock(report.elapsed_secs),
        "Rehearsal finished"
    );
    Ok(report)
}

fn record<D: AudioDevice>(
    player: &mut PlaybackCoordinator<D>,
    report: &mut RehearsalReport,
) {
    for event in player.drain_events() {
        match event {
            PlaybackEvent::TrackChanged { track_id, .. } => {
                if let Some(track) = player.active_track() {
                    info!(
                        track_id = %track_id,
                        title = track.title(),
                        artist = track.artist(),
                        index = ?player.active_index(),
                        "Now playing"
                    );
                }
                report.selected.push(track_id);
            }
            PlaybackEvent::TrackEnded { track_id, .. } => {
                if let Some(track_id) = track_id {
                    info!(track_id = %track_id, "Track ended");
                    report.ended.push(track_id);
                }
            }
            PlaybackEvent::LoadFailed { track_id, reason } => {
                warn!(track_id = %track_id, reason = reason.as_str(), "Track failed");
                report.failed.push(track_id);
            }
            PlaybackEvent::StatusChanged { status, generation } => {
                debug!(
                    %generation,
                    playing = status.is_playing,
                    position = %format_clock(status.current_time),
                    progress = status.progress_percent(),
                    "Status"
                );
            }
            PlaybackEvent::PlaylistChanged { length } => debug!(length, "Playlist changed"),
            PlaybackEvent::SelectionCleared => debug!("Selection cleared"),
        }
    }
}
