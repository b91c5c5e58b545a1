use super::*;
use crate::highlight::HighlightRule;

fn engine(text: &str) -> PlaybackEngine {
    PlaybackEngine::new(
        text,
        PlaybackConfig {
            wpm: 300,
            micro_pause: MicroPauseSettings::disabled(),
            ..PlaybackConfig::default()
        },
    )
}

/// Fire the pending deadline, whatever it is.
fn fire(engine: &mut PlaybackEngine) -> AdvanceResult {
    let now = engine.next_deadline_ms().unwrap_or(0);
    engine.tick(now)
}

#[test]
fn ticks_stop_on_last_word() {
    let mut engine = engine("one two");
    engine.start(0);
    assert!(engine.is_playing());

    assert_eq!(fire(&mut engine), AdvanceResult::Advanced);
    assert_eq!(engine.current_index(), 1);
    assert!(engine.is_playing());

    assert_eq!(fire(&mut engine), AdvanceResult::EndOfText);
    assert_eq!(engine.current_index(), 1);
    assert!(!engine.is_playing());
    assert!(engine.at_end());
    assert_eq!(engine.next_deadline_ms(), None);
}

#[test]
fn tick_waits_for_deadline() {
    let mut engine = engine("one two three");
    engine.start(1_000);
    // 300 wpm -> 200 ms
    assert_eq!(engine.next_deadline_ms(), Some(1_200));
    assert_eq!(engine.tick(1_199), AdvanceResult::Idle);
    assert_eq!(engine.current_index(), 0);
    assert_eq!(engine.tick(1_200), AdvanceResult::Advanced);
    assert_eq!(engine.next_deadline_ms(), Some(1_400));
}

#[test]
fn tick_is_idle_while_stopped() {
    let mut engine = engine("one two");
    assert_eq!(engine.tick(u64::MAX), AdvanceResult::Idle);
    assert_eq!(engine.current_index(), 0);
}

#[test]
fn start_shows_word_immediately() {
    let mut engine = engine("hello world");
    engine.start(0);
    assert_eq!(engine.shown_index(), Some(0));
    assert_eq!(engine.shown_text(), "hello");
    let parts = engine.word_parts();
    assert_eq!((parts.before, parts.pivot, parts.after), ("h", "e", "llo"));
}

#[test]
fn start_after_end_restarts_from_first_word() {
    let mut engine = engine("one two");
    engine.set_index(5, 0);
    engine.start(0);
    assert_eq!(engine.current_index(), 0);
    assert!(engine.is_playing());
    assert_eq!(engine.shown_text(), "one");
}

#[test]
fn start_on_empty_text_stays_stopped() {
    let mut engine = engine("   ");
    engine.start(0);
    assert!(!engine.is_playing());
    assert_eq!(engine.next_deadline_ms(), None);
    assert_eq!(engine.word_parts(), WordParts::EMPTY);
}

#[test]
fn pause_keeps_index_and_cancels_timer() {
    let mut engine = engine("one two three");
    engine.start(0);
    fire(&mut engine);
    engine.pause(250);
    assert!(!engine.is_playing());
    assert_eq!(engine.current_index(), 1);
    assert_eq!(engine.next_deadline_ms(), None);
    assert_eq!(engine.tick(10_000), AdvanceResult::Idle);
}

#[test]
fn reset_returns_to_first_word() {
    let mut engine = engine("one two three");
    engine.start(0);
    fire(&mut engine);
    fire(&mut engine);
    engine.reset(500);
    assert!(!engine.is_playing());
    assert_eq!(engine.current_index(), 0);
    assert_eq!(engine.shown_text(), "one");
}

#[test]
fn manual_seek_is_not_clamped() {
    let mut engine = engine("one two three");
    engine.set_index(-1, 0);
    assert_eq!(engine.current_index(), -1);
    engine.set_index(10, 0);
    assert_eq!(engine.current_index(), 10);
}

#[test]
fn out_of_range_seek_leaves_display_stale() {
    let mut engine = engine("one two three");
    engine.set_index(2, 0);
    assert_eq!(engine.shown_text(), "three");
    engine.set_index(10, 0);
    assert_eq!(engine.shown_text(), "three");
    assert_eq!(engine.shown_index(), Some(2));
    engine.set_index(-3, 0);
    assert_eq!(engine.shown_text(), "three");
}

#[test]
fn tick_from_negative_index_moves_to_first_word() {
    let mut engine = engine("one two");
    engine.start(0);
    engine.set_index(-1, 0);
    assert_eq!(fire(&mut engine), AdvanceResult::Advanced);
    assert_eq!(engine.current_index(), 0);
    assert_eq!(engine.shown_text(), "one");
}

#[test]
fn tick_past_manual_overshoot_stops_without_moving() {
    let mut engine = engine("one two three");
    engine.start(0);
    engine.set_index(7, 0);
    assert_eq!(fire(&mut engine), AdvanceResult::EndOfText);
    assert_eq!(engine.current_index(), 7);
    assert!(!engine.is_playing());
}

#[test]
fn wpm_change_rearms_without_carry_over() {
    let mut engine = engine("one two three");
    engine.start(0);
    assert_eq!(engine.next_deadline_ms(), Some(200));
    engine.set_words_per_minute(600, 150);
    assert_eq!(engine.next_deadline_ms(), Some(250));
    assert_eq!(engine.timer().armed().map(|t| t.period_ms), Some(100));
}

#[test]
fn wpm_change_with_same_period_still_rearms() {
    let mut engine = engine("one two three");
    engine.set_words_per_minute(990, 0);
    engine.start(0);
    // 60000 / 990 and 60000 / 1000 both round down to 60 ms
    assert_eq!(engine.next_deadline_ms(), Some(60));
    engine.set_words_per_minute(1000, 50);
    assert_eq!(engine.next_deadline_ms(), Some(110));
}

#[test]
fn set_text_while_playing_drops_elapsed_time() {
    let mut engine = engine("one two three");
    engine.start(0);
    assert_eq!(engine.next_deadline_ms(), Some(200));
    engine.set_text("fresh words here", 150);
    assert_eq!(engine.next_deadline_ms(), Some(350));
}

#[test]
fn pattern_change_rearms_running_timer() {
    let mut engine = engine("one two three");
    engine.start(0);
    engine.set_pattern(HighlightPattern::default(), 190);
    assert_eq!(engine.next_deadline_ms(), Some(390));
}

#[test]
fn restart_while_running_keeps_deadline() {
    let mut engine = engine("one two three");
    engine.start(0);
    engine.start(180);
    assert_eq!(engine.next_deadline_ms(), Some(200));
    engine.set_group_size(1, 190);
    assert_eq!(engine.next_deadline_ms(), Some(200));
}

#[test]
fn settings_changes_while_stopped_do_not_arm() {
    let mut engine = engine("one two three");
    engine.set_words_per_minute(500, 10);
    engine.set_group_size(2, 10);
    assert_eq!(engine.next_deadline_ms(), None);
}

#[test]
fn group_size_joins_following_words() {
    let mut engine = engine("alpha beta gamma");
    engine.set_group_size(2, 0);
    assert_eq!(engine.shown_text(), "alpha beta");
    engine.set_index(2, 0);
    assert_eq!(engine.shown_text(), "gamma");
    engine.set_group_size(5, 0);
    assert_eq!(engine.shown_text(), "gamma");
}

#[test]
fn grouped_playback_still_advances_one_word_per_tick() {
    let mut engine = engine("alpha beta gamma");
    engine.set_group_size(2, 0);
    engine.start(0);
    fire(&mut engine);
    assert_eq!(engine.current_index(), 1);
    assert_eq!(engine.shown_text(), "beta gamma");
}

#[test]
fn pattern_change_recomputes_pivot() {
    let mut engine = engine("hello");
    assert_eq!(engine.word_parts().pivot, "e");
    engine.set_pattern(
        HighlightPattern::from_rules(&[HighlightRule::new(10, 3)]),
        0,
    );
    assert_eq!(engine.word_parts().pivot, "l");
    assert_eq!(engine.word_parts().after, "o");
}

#[test]
fn micro_pause_stretches_current_word() {
    let mut engine = engine("Stop. Then go");
    engine.set_micro_pause(
        MicroPauseSettings {
            enabled: true,
            stack_pauses: true,
            large_numbers_pause: 0.0,
            sentence_end_pause: 1.0,
            other_punctuation_pause: 0.0,
            paragraph_pause: 0.5,
            long_word_pause: 0.0,
        },
        0,
    );
    engine.start(0);
    // "Stop." ends a sentence and "Then" is capitalized: 200 * 2.5
    assert_eq!(engine.next_deadline_ms(), Some(500));
    assert_eq!(engine.tick(499), AdvanceResult::Idle);
    assert_eq!(engine.tick(500), AdvanceResult::Advanced);
    assert_eq!(engine.next_deadline_ms(), Some(700));
}

#[test]
fn set_text_resegments_and_restarts() {
    let mut engine = engine("one two three");
    engine.start(0);
    fire(&mut engine);
    engine.set_text("  fresh   words here ", 300);
    assert_eq!(engine.words(), ["fresh", "words", "here"]);
    assert_eq!(engine.current_index(), 0);
    assert_eq!(engine.shown_text(), "fresh");
    assert!(engine.is_playing());

    engine.set_text("", 400);
    assert!(!engine.is_playing());
    assert_eq!(engine.word_parts(), WordParts::EMPTY);
    assert_eq!(engine.next_deadline_ms(), None);
}

#[test]
fn timer_sync_is_idempotent() {
    let mut timer = PacingTimer::new();
    assert!(!timer.sync(0, None));
    assert!(timer.sync(0, Some(100)));
    assert!(!timer.sync(50, Some(100)));
    assert_eq!(timer.deadline_ms(), Some(100));
    assert!(timer.sync(60, Some(80)));
    assert_eq!(timer.deadline_ms(), Some(140));
    assert!(!timer.fire(139));
    assert!(timer.fire(140));
    assert!(!timer.fire(1_000));
    assert!(!timer.sync(1_000, None));
}

#[test]
fn timer_rearm_always_replaces_deadline() {
    let mut timer = PacingTimer::new();
    timer.rearm(0, Some(100));
    timer.rearm(40, Some(100));
    assert_eq!(timer.deadline_ms(), Some(140));
    timer.rearm(50, None);
    assert_eq!(timer.armed(), None);
}
