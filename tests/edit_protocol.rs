use std::time::Instant;

use overlay_timer::edit::{apply, EditKey, EditOutcome};
use overlay_timer::engine::TimerEngine;
use overlay_timer::time_value::TimeValue;

#[test]
fn typing_into_a_zero_buffer_builds_the_mask_left_to_right() {
    let t0 = Instant::now();
    let mut engine = TimerEngine::with_start(TimeValue::from_seconds(0));
    let mut buffer = engine.begin_edit(t0);

    for d in ['1', '2', '3', '0', '0', '0'] {
        assert_eq!(apply(&mut buffer, EditKey::Digit(d)), EditOutcome::Changed);
    }
    assert_eq!(buffer.text(), "12:30:00");

    engine.commit_edit(buffer.digits());
    assert_eq!(engine.remaining().seconds(), 45000);
}

#[test]
fn buffer_is_seeded_from_the_displayed_value() {
    let t0 = Instant::now();
    let mut engine = TimerEngine::with_start(TimeValue::from_seconds(300));
    let mut buffer = engine.begin_edit(t0);
    assert_eq!(buffer.text(), "00:05:00");

    // New digits slide in from the right, pushing the seed out.
    buffer.push_digit('1');
    assert_eq!(buffer.text(), "00:50:01");
}

#[test]
fn backspace_erases_from_the_right_down_to_zero() {
    let t0 = Instant::now();
    let mut engine = TimerEngine::with_start(TimeValue::from_seconds(45000));
    let mut buffer = engine.begin_edit(t0);
    assert_eq!(buffer.text(), "12:30:00");

    apply(&mut buffer, EditKey::Backspace);
    assert_eq!(buffer.text(), "01:23:00");

    for _ in 0..8 {
        apply(&mut buffer, EditKey::Backspace);
    }
    assert_eq!(buffer.text(), "00:00:00");

    engine.commit_edit(buffer.digits());
    assert_eq!(engine.remaining().seconds(), 0);
}

#[test]
fn enter_commits_and_escape_cancels() {
    let t0 = Instant::now();
    let mut engine = TimerEngine::with_start(TimeValue::from_seconds(300));

    let mut buffer = engine.begin_edit(t0);
    buffer.push_digit('9');
    assert_eq!(apply(&mut buffer, EditKey::Enter), EditOutcome::Committed);
    engine.commit_edit(buffer.digits());
    assert_eq!(engine.remaining().to_text(), "00:50:09");

    let mut buffer = engine.begin_edit(t0);
    buffer.push_digit('1');
    assert_eq!(apply(&mut buffer, EditKey::Escape), EditOutcome::Cancelled);
    engine.cancel_edit();
    assert_eq!(engine.remaining().to_text(), "00:50:09");
}

#[test]
fn suppressed_keys_leave_the_buffer_untouched() {
    let t0 = Instant::now();
    let mut engine = TimerEngine::with_start(TimeValue::from_seconds(61));
    let mut buffer = engine.begin_edit(t0);
    let before = buffer.clone();

    for key in [EditKey::Navigation, EditKey::Other] {
        assert_eq!(apply(&mut buffer, key), EditOutcome::Ignored);
        assert_eq!(buffer, before);
    }
}

#[test]
fn committing_an_unchanged_buffer_is_a_no_op() {
    let t0 = Instant::now();
    let mut engine = TimerEngine::with_start(TimeValue::from_seconds(300));
    let buffer = engine.begin_edit(t0);
    engine.commit_edit(buffer.digits());
    assert!(!engine.is_editing());
    assert_eq!(engine.remaining().seconds(), 300);
    assert_eq!(engine.total().seconds(), 300);
}
