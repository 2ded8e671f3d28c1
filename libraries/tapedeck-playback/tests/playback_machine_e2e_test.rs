//! End-to-end checks of the playback state machine
//!
//! One test per observable rule of the machine: selection, mode-dependent
//! navigation, restart-on-previous, end-of-track handling and stale play
//! resolutions.

mod common;

use common::{confirm, play_to, player, player_with, start, EngineCall, RecordingEngine};
use tapedeck_playback::{
    format_time, Direction, EngineEvent, PlayKind, PlaybackConfig, PlaybackMode,
    PlaybackStatus, Player,
};

fn set_mode(player: &mut Player<RecordingEngine>, mode: PlaybackMode) {
    while player.mode() != mode {
        player.cycle_mode();
    }
}

// ===== Selection =====

#[test]
fn select_then_confirm_plays_every_index() {
    for index in 0..5 {
        let mut player = player(5);

        player.select_track(index);
        confirm(&mut player);

        assert_eq!(player.status(), PlaybackStatus::Playing);
        assert_eq!(player.state().current_index, index);
        assert_eq!(player.current_track().unwrap().id.get() as usize, index + 1);
    }
}

#[test]
fn select_resets_position_and_duration() {
    let mut player = player(3);
    start(&mut player, 0, 240.0);
    play_to(&mut player, 100.0);

    player.select_track(1);

    assert_eq!(player.state().position_secs, 0.0);
    assert_eq!(player.state().duration_secs, None);
    assert_eq!(player.view().position_formatted, "0:00");
}

// ===== Normal mode =====

#[test]
fn normal_next_steps_and_wraps() {
    let mut player = player(4);
    start(&mut player, 2, 100.0);

    player.next();
    assert_eq!(player.state().current_index, 3);
    confirm(&mut player);

    player.next();
    assert_eq!(player.state().current_index, 0);
}

#[test]
fn normal_previous_at_start_wraps_to_last() {
    let mut player = player(3);

    player.previous();

    assert_eq!(player.state().current_index, 2);
    assert_eq!(player.status(), PlaybackStatus::Loading);
}

#[test]
fn previous_within_threshold_goes_back() {
    let mut player = player(3);
    start(&mut player, 1, 200.0);
    play_to(&mut player, 2.5);

    player.previous();

    assert_eq!(player.state().current_index, 0);
    assert_eq!(player.engine().loads(), 1);
}

// ===== Restart on previous =====

#[test]
fn previous_past_threshold_restarts_in_every_mode() {
    for mode in [
        PlaybackMode::Normal,
        PlaybackMode::RepeatOne,
        PlaybackMode::Shuffle,
    ] {
        let mut player = player(5);
        set_mode(&mut player, mode);
        start(&mut player, 3, 200.0);
        play_to(&mut player, 3.5);

        player.previous();

        assert_eq!(player.state().current_index, 3, "mode {mode}");
        assert_eq!(player.state().position_secs, 0.0, "mode {mode}");
        assert_eq!(player.engine().last_seek(), Some(0.0), "mode {mode}");
        assert_eq!(player.engine().loads(), 0, "mode {mode}");
        assert!(player.is_playing(), "mode {mode}");
    }
}

#[test]
fn restart_keeps_paused_track_paused() {
    let mut player = player(3);
    start(&mut player, 0, 200.0);
    play_to(&mut player, 30.0);
    player.toggle_playback();

    player.previous();

    assert_eq!(player.status(), PlaybackStatus::Paused);
    assert!(player.pending_play().is_none());
    assert_eq!(player.engine().last_seek(), Some(0.0));
}

#[test]
fn restart_threshold_is_configurable() {
    let config = PlaybackConfig {
        restart_threshold_secs: 10.0,
        ..PlaybackConfig::default()
    };
    let mut player = player_with(3, config);
    start(&mut player, 1, 200.0);
    play_to(&mut player, 5.0);

    player.previous();

    assert_eq!(player.state().current_index, 0);
}

// ===== RepeatOne =====

#[test]
fn repeat_one_next_restarts_without_loading() {
    let mut player = player(3);
    set_mode(&mut player, PlaybackMode::RepeatOne);
    start(&mut player, 1, 200.0);
    play_to(&mut player, 1.0);

    player.next();

    assert_eq!(player.state().current_index, 1);
    assert_eq!(player.engine().calls, vec![EngineCall::SeekTo(0.0)]);
    assert!(player.is_playing());
}

#[test]
fn repeat_one_previous_restarts_without_loading() {
    let mut player = player(3);
    set_mode(&mut player, PlaybackMode::RepeatOne);
    start(&mut player, 1, 200.0);
    play_to(&mut player, 1.0);

    player.previous();

    assert_eq!(player.state().current_index, 1);
    assert_eq!(player.state().position_secs, 0.0);
    assert_eq!(player.engine().calls, vec![EngineCall::SeekTo(0.0)]);
    assert_eq!(player.engine().loads(), 0);
    assert!(player.is_playing());
}

#[test]
fn repeat_one_end_of_track_restarts_and_resumes() {
    let mut player = player(3);
    set_mode(&mut player, PlaybackMode::RepeatOne);
    start(&mut player, 2, 200.0);
    play_to(&mut player, 200.0);

    player.handle_engine_event(EngineEvent::Ended);

    assert_eq!(player.state().current_index, 2);
    assert_eq!(player.state().position_secs, 0.0);
    assert_eq!(player.engine().last_seek(), Some(0.0));
    assert_eq!(player.engine().loads(), 0);
    assert_eq!(player.pending_play().map(|p| p.kind), Some(PlayKind::Resume));

    confirm(&mut player);
    assert!(player.is_playing());
}

// ===== End of track =====

#[test]
fn end_of_track_matches_next_in_normal_and_shuffle() {
    for mode in [PlaybackMode::Normal, PlaybackMode::Shuffle] {
        let mut ended = player(6);
        let mut skipped = player(6);

        for player in [&mut ended, &mut skipped] {
            set_mode(player, mode);
            start(player, 4, 100.0);
        }

        ended.handle_engine_event(EngineEvent::Ended);
        skipped.advance(Direction::Next);

        assert_eq!(
            ended.state().current_index,
            skipped.state().current_index,
            "mode {mode}"
        );
        assert_eq!(ended.status(), PlaybackStatus::Loading, "mode {mode}");
    }
}

#[test]
fn last_track_ending_wraps_to_first() {
    let mut player = player(3);
    start(&mut player, 2, 100.0);

    player.handle_engine_event(EngineEvent::Ended);
    confirm(&mut player);

    assert_eq!(player.state().current_index, 0);
    assert!(player.is_playing());
}

// ===== Shuffle =====

#[test]
fn shuffle_never_repeats_the_current_track() {
    let mut player = player(5);
    set_mode(&mut player, PlaybackMode::Shuffle);
    start(&mut player, 0, 100.0);

    for _ in 0..200 {
        let before = player.state().current_index;
        player.next();
        assert_ne!(player.state().current_index, before);
        confirm(&mut player);
    }
}

#[test]
fn shuffle_previous_picks_another_track() {
    let mut player = player(5);
    set_mode(&mut player, PlaybackMode::Shuffle);
    start(&mut player, 2, 100.0);

    for _ in 0..100 {
        play_to(&mut player, 1.0);
        let before = player.state().current_index;

        player.previous();

        assert_ne!(player.state().current_index, before);
        assert_eq!(player.status(), PlaybackStatus::Loading);
        confirm(&mut player);
    }
    assert_eq!(player.engine().loads(), 100);
}

#[test]
fn shuffle_with_one_track_replays_it() {
    let mut player = player(1);
    set_mode(&mut player, PlaybackMode::Shuffle);
    start(&mut player, 0, 100.0);

    player.next();

    assert_eq!(player.state().current_index, 0);
    assert_eq!(player.engine().loads(), 1);
}

#[test]
fn scripted_shuffle_source_is_used() {
    let mut player = player(4).with_shuffle_source(|_upper: usize| 2);
    set_mode(&mut player, PlaybackMode::Shuffle);
    start(&mut player, 1, 100.0);

    player.next();

    // Offset 2 among the other slots [0, 2, 3] is index 3
    assert_eq!(player.state().current_index, 3);
}

// ===== Modes =====

#[test]
fn cycle_mode_three_times_is_identity() {
    let mut player = player(3);
    let mut seen = vec![player.mode()];

    for _ in 0..3 {
        player.cycle_mode();
        seen.push(player.mode());
    }

    assert_eq!(
        seen,
        vec![
            PlaybackMode::Normal,
            PlaybackMode::RepeatOne,
            PlaybackMode::Shuffle,
            PlaybackMode::Normal,
        ]
    );
}

// ===== Volume and time =====

#[test]
fn volume_is_clamped() {
    let mut player = player(2);

    player.set_volume(1.4);
    assert_eq!(player.state().volume, 1.0);

    player.set_volume(-0.2);
    assert_eq!(player.state().volume, 0.0);
    assert_eq!(
        player.engine().calls.last(),
        Some(&EngineCall::SetVolume(0.0))
    );
}

#[test]
fn time_formatting() {
    assert_eq!(format_time(125.7), "2:05");
    assert_eq!(format_time(f64::NAN), "0:00");
    assert_eq!(format_time(f64::NEG_INFINITY), "0:00");
}

// ===== Pending plays =====

#[test]
fn stale_resolution_after_supersession_is_discarded() {
    let mut player = player(3);

    player.select_track(0);
    let first = player.pending_play().unwrap().request;
    player.select_track(1);
    let before = player.state().clone();

    player.handle_engine_event(EngineEvent::PlayResolved {
        request: first,
        outcome: Ok(()),
    });

    assert_eq!(player.state(), &before);
    assert_eq!(player.status(), PlaybackStatus::Loading);

    confirm(&mut player);
    assert!(player.is_playing());
    assert_eq!(player.state().current_index, 1);
}

#[test]
fn selecting_the_pending_track_again_is_not_reapplied() {
    let mut player = player(3);
    player.select_track(2);
    player.drain_events();

    player.select_track(2);

    assert_eq!(player.engine().loads(), 1);
    assert!(!player.has_pending_events());
}

#[test]
fn selecting_another_track_supersedes_pending_play() {
    let mut player = player(3);
    player.select_track(0);
    player.select_track(2);

    assert_eq!(player.engine().loads(), 2);
    assert_eq!(player.pending_play().unwrap().index, 2);
    assert_eq!(player.state().current_index, 2);
}

#[test]
fn end_of_track_during_pending_play_is_ignored() {
    let mut player = player(3);
    start(&mut player, 0, 100.0);
    player.next();

    player.handle_engine_event(EngineEvent::Ended);

    assert_eq!(player.state().current_index, 1);
    assert_eq!(player.engine().loads(), 1);
}
