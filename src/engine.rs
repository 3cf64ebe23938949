use std::time::{Duration, Instant};

use crate::edit::EditBuffer;
use crate::time_value::TimeValue;

/// Fresh timers start at five minutes.
pub const DEFAULT_START_SECONDS: u32 = 300;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// One-second countdown schedule with explicit armed/disarmed state.
///
/// Every transition of `running` arms or disarms exactly once; at most one
/// schedule is live at any time, and dropping the engine drops the schedule
/// with it.
#[derive(Debug, Default)]
pub struct TickSchedule {
    next_due: Option<Instant>,
}

impl TickSchedule {
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + TICK_INTERVAL);
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Consume one due tick, advancing the schedule by a whole interval so
    /// firings never overlap or bunch up.
    fn take_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                self.next_due = Some(due + TICK_INTERVAL);
                true
            }
            _ => false,
        }
    }
}

/// Renderable snapshot derived from the engine on every change.
///
/// Both the normal and the compact layout consume this one struct, so the two
/// presentations cannot drift apart.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// `HH:MM:SS` of the remaining time (the edit mask supersedes this while
    /// an edit is open).
    pub display: String,
    /// Elapsed fraction of the base duration: 0.0 at start, 1.0 at
    /// completion. The ring renders the remainder, so it shows a full circle
    /// at start and empties as time runs out.
    pub progress: f32,
    pub running: bool,
    pub finished: bool,
    pub editing: bool,
    pub compact: bool,
    /// Hidden once the timer finishes; reset is then the only way out.
    pub start_pause_visible: bool,
    pub start_pause_glyph: &'static str,
    /// The compact reset control gains an active affordance when finished.
    pub reset_emphasized: bool,
    /// Quick-add row is only offered while stopped and unfinished.
    pub quick_add_visible: bool,
}

/// Countdown state machine.
///
/// Owns all timer state as one instance (no module globals), so several
/// engines can coexist and tests never need a display.
#[derive(Debug)]
pub struct TimerEngine {
    total: TimeValue,
    remaining: TimeValue,
    running: bool,
    finished: bool,
    editing: bool,
    user_edited: bool,
    compact: bool,
    schedule: TickSchedule,
    alert_pending: bool,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    pub fn new() -> Self {
        Self::with_start(TimeValue::from_seconds(DEFAULT_START_SECONDS))
    }

    pub fn with_start(start: TimeValue) -> Self {
        Self {
            total: start,
            remaining: start,
            running: false,
            finished: false,
            editing: false,
            user_edited: false,
            compact: false,
            schedule: TickSchedule::default(),
            alert_pending: false,
        }
    }

    pub fn total(&self) -> TimeValue {
        self.total
    }

    pub fn remaining(&self) -> TimeValue {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_compact(&self) -> bool {
        self.compact
    }

    pub fn is_armed(&self) -> bool {
        self.schedule.is_armed()
    }

    /// Take the one-shot alert latched when the countdown reached zero.
    pub fn take_alert(&mut self) -> bool {
        std::mem::take(&mut self.alert_pending)
    }

    /// When the next tick is due, for cooperative wake-up scheduling.
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.schedule.next_due()
    }

    /// Toggle between running and paused. A finished timer stays put until
    /// reset.
    pub fn start_pause(&mut self, now: Instant) {
        if self.finished {
            return;
        }
        if self.running {
            self.schedule.disarm();
            self.running = false;
            return;
        }
        // Adopt an edited value as the new base, but only when no countdown
        // progress has been made since the edit.
        if self.user_edited && self.remaining == self.total {
            self.total = self.remaining;
            self.user_edited = false;
        }
        self.schedule.arm(now);
        self.running = true;
    }

    /// One countdown second. Reaching zero stops the schedule, flips to the
    /// finished state and latches a single alert.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        if !self.remaining.is_zero() {
            self.remaining = TimeValue::from_seconds(self.remaining.seconds() - 1);
        }
        if self.remaining.is_zero() {
            self.schedule.disarm();
            self.running = false;
            self.finished = true;
            self.alert_pending = true;
        }
    }

    /// Fire every tick that has come due by `now`. Ticks run back to back if
    /// the caller was delayed, never concurrently.
    pub fn advance(&mut self, now: Instant) {
        while self.running && self.schedule.take_due(now) {
            self.tick();
        }
    }

    /// Back to the base duration, clearing the run/finished/edited flags.
    /// Idempotent.
    pub fn reset(&mut self) {
        self.schedule.disarm();
        self.running = false;
        self.finished = false;
        self.user_edited = false;
        self.remaining = self.total;
    }

    /// Add seconds to the clock. When the sum would pass `99:59:59` nothing
    /// changes; when stopped, the new remaining time also becomes the base
    /// for future resets.
    pub fn quick_add(&mut self, delta: u32) {
        let Some(sum) = self.remaining.checked_add(delta) else {
            return;
        };
        self.remaining = sum;
        if !self.running {
            self.total = self.remaining;
        }
    }

    /// Open edit mode, pausing an active run first. Returns the buffer
    /// seeded with the current display, caret conceptually at the end.
    pub fn begin_edit(&mut self, now: Instant) -> EditBuffer {
        if self.running {
            self.start_pause(now);
        }
        self.editing = true;
        EditBuffer::seeded(self.remaining)
    }

    /// Commit an edit buffer. Component clamping happens here; a value equal
    /// to the current remaining time leaves the state untouched.
    pub fn commit_edit(&mut self, raw_digits: &str) {
        let value = TimeValue::parse_digits(raw_digits);
        if value != self.remaining {
            self.remaining = value;
            self.user_edited = true;
            if !self.running {
                self.total = self.remaining;
            }
        }
        self.editing = false;
    }

    /// Leave edit mode without committing; the display falls back to the
    /// last committed state.
    pub fn cancel_edit(&mut self) {
        self.editing = false;
    }

    /// Flip the compact presentation. Countdown state is untouched; the
    /// presentation layer is responsible for the container resize.
    pub fn toggle_compact(&mut self) {
        self.compact = !self.compact;
    }

    pub fn view(&self) -> ViewState {
        let total = self.total.seconds();
        let progress = if total == 0 {
            1.0
        } else {
            (total - self.remaining.seconds().min(total)) as f32 / total as f32
        };
        ViewState {
            display: self.remaining.to_text(),
            progress,
            running: self.running,
            finished: self.finished,
            editing: self.editing,
            compact: self.compact,
            start_pause_visible: !self.finished,
            start_pause_glyph: if self.running { "⏸" } else { "▶" },
            reset_emphasized: self.finished,
            quick_add_visible: !self.running && !self.finished,
        }
    }
}
