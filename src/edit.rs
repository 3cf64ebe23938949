use crate::time_value::TimeValue;

/// Sliding digit buffer behind the `HH:MM:SS` edit mask.
///
/// The field never exposes cursor-relative editing: typed digits enter from
/// the right and the oldest digit falls off once six are held. Backspacing
/// removes from the right; an emptied buffer reads as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    digits: String,
}

impl EditBuffer {
    /// Start editing from the currently displayed value.
    pub fn seeded(value: TimeValue) -> Self {
        Self {
            digits: value.to_digits(),
        }
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    fn padded(&self) -> String {
        format!("{:0>6}", self.digits)
    }

    /// Render the mask exactly as typed, without the commit-time clamp.
    pub fn text(&self) -> String {
        let p = self.padded();
        format!("{}:{}:{}", &p[0..2], &p[2..4], &p[4..6])
    }

    /// The value the buffer would commit to.
    pub fn value(&self) -> TimeValue {
        TimeValue::parse_digits(&self.digits)
    }

    /// Append a digit, keeping only the last six. Returns `false` when the
    /// digit is rejected (non-digit input, or a component passing the soft
    /// per-component cap of 99 applied while typing).
    pub fn push_digit(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() {
            return false;
        }
        let mut candidate = format!("{}{}", self.digits, digit);
        if candidate.len() > 6 {
            candidate = candidate[candidate.len() - 6..].to_string();
        }
        let padded = format!("{candidate:0>6}");
        let component = |range: std::ops::Range<usize>| -> u32 {
            padded[range].parse().unwrap_or(0)
        };
        let (h, m, s) = (component(0..2), component(2..4), component(4..6));
        if h > 99 || m > 99 || s > 99 {
            return false;
        }
        self.digits = candidate;
        true
    }

    /// Drop the newest digit; an empty buffer reads as `"0"`.
    pub fn backspace(&mut self) {
        self.digits.pop();
        if self.digits.is_empty() {
            self.digits.push('0');
        }
    }
}

/// Keyboard input while the edit mask is focused, already stripped of
/// modifier detail by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Digit(char),
    Backspace,
    Delete,
    Enter,
    Escape,
    /// ArrowLeft / ArrowRight / Home / End / Tab: allowed through to the
    /// widget but never touch the buffer.
    Navigation,
    /// Everything else is suppressed.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Buffer content changed; re-render the mask.
    Changed,
    /// Commit the buffer and leave edit mode.
    Committed,
    /// Discard the buffer and leave edit mode.
    Cancelled,
    /// Key had no effect on the buffer.
    Ignored,
}

/// Apply one key to the buffer per the edit-mode rules.
pub fn apply(buffer: &mut EditBuffer, key: EditKey) -> EditOutcome {
    match key {
        EditKey::Digit(d) => {
            if buffer.push_digit(d) {
                EditOutcome::Changed
            } else {
                EditOutcome::Ignored
            }
        }
        EditKey::Backspace | EditKey::Delete => {
            buffer.backspace();
            EditOutcome::Changed
        }
        EditKey::Enter => EditOutcome::Committed,
        EditKey::Escape => EditOutcome::Cancelled,
        EditKey::Navigation | EditKey::Other => EditOutcome::Ignored,
    }
}
