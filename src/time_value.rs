use std::fmt;

/// Largest representable duration: `99:59:59`.
pub const MAX_SECONDS: u32 = 99 * 3600 + 59 * 60 + 59;

/// A countdown duration in whole seconds, capped at [`MAX_SECONDS`].
///
/// Values are immutable; every operation that would change one produces a new
/// `TimeValue` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TimeValue {
    seconds: u32,
}

impl TimeValue {
    pub fn from_seconds(seconds: u32) -> Self {
        Self {
            seconds: seconds.min(MAX_SECONDS),
        }
    }

    /// Build from clock components, clamping each to its valid range
    /// (hours 99, minutes 59, seconds 59).
    pub fn from_components(hours: u32, minutes: u32, seconds: u32) -> Self {
        let h = hours.min(99);
        let m = minutes.min(59);
        let s = seconds.min(59);
        Self {
            seconds: h * 3600 + m * 60 + s,
        }
    }

    /// Parse a raw digit buffer (up to six digits, fewer after backspacing).
    ///
    /// The buffer is right-aligned into `HHMMSS` and each component is
    /// clamped, so out-of-range input degrades to the nearest valid value
    /// rather than failing.
    pub fn parse_digits(digits: &str) -> Self {
        let cleaned: String = digits.chars().filter(|c| c.is_ascii_digit()).collect();
        let tail = if cleaned.len() > 6 {
            &cleaned[cleaned.len() - 6..]
        } else {
            cleaned.as_str()
        };
        let padded = format!("{tail:0>6}");
        let num = |range: std::ops::Range<usize>| -> u32 {
            padded[range].parse().unwrap_or(0)
        };
        Self::from_components(num(0..2), num(2..4), num(4..6))
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn is_zero(&self) -> bool {
        self.seconds == 0
    }

    /// Add `delta` seconds, or `None` when the sum would exceed the cap.
    pub fn checked_add(&self, delta: u32) -> Option<Self> {
        let sum = self.seconds.checked_add(delta)?;
        if sum > MAX_SECONDS {
            None
        } else {
            Some(Self { seconds: sum })
        }
    }

    pub fn components(&self) -> (u32, u32, u32) {
        (
            self.seconds / 3600,
            (self.seconds % 3600) / 60,
            self.seconds % 60,
        )
    }

    /// Fixed `HH:MM:SS` form used by both layouts and the edit mask.
    pub fn to_text(&self) -> String {
        let (h, m, s) = self.components();
        format!("{h:02}:{m:02}:{s:02}")
    }

    /// Six-digit form used to seed the edit buffer.
    pub fn to_digits(&self) -> String {
        let (h, m, s) = self.components();
        format!("{h:02}{m:02}{s:02}")
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_form_is_zero_padded() {
        assert_eq!(TimeValue::from_seconds(0).to_text(), "00:00:00");
        assert_eq!(TimeValue::from_seconds(61).to_text(), "00:01:01");
        assert_eq!(TimeValue::from_seconds(45000).to_text(), "12:30:00");
        assert_eq!(TimeValue::from_seconds(MAX_SECONDS).to_text(), "99:59:59");
    }

    #[test]
    fn from_seconds_caps_at_maximum() {
        assert_eq!(TimeValue::from_seconds(u32::MAX).seconds(), MAX_SECONDS);
        assert_eq!(TimeValue::from_seconds(MAX_SECONDS + 1).seconds(), MAX_SECONDS);
    }

    #[test]
    fn components_clamp_individually() {
        assert_eq!(
            TimeValue::from_components(100, 75, 90).seconds(),
            99 * 3600 + 59 * 60 + 59
        );
        assert_eq!(TimeValue::from_components(0, 59, 59).seconds(), 3599);
    }

    #[test]
    fn digit_buffer_round_trips_exact_encodings() {
        for secs in [0u32, 1, 59, 60, 3599, 3600, 45000, 359_999] {
            let value = TimeValue::from_seconds(secs);
            assert_eq!(TimeValue::parse_digits(&value.to_digits()), value);
        }
    }

    #[test]
    fn parse_digits_handles_short_buffers() {
        assert_eq!(TimeValue::parse_digits("").seconds(), 0);
        assert_eq!(TimeValue::parse_digits("5").seconds(), 5);
        assert_eq!(TimeValue::parse_digits("130").seconds(), 90);
    }

    #[test]
    fn parse_digits_clamps_components() {
        // 99:99:99 collapses to 99:59:59
        assert_eq!(TimeValue::parse_digits("999999").seconds(), MAX_SECONDS);
        assert_eq!(TimeValue::parse_digits("007070").seconds(), 59 * 60 + 59);
    }

    #[test]
    fn checked_add_respects_cap() {
        let near = TimeValue::from_seconds(MAX_SECONDS - 100);
        assert!(near.checked_add(3600).is_none());
        assert_eq!(near.checked_add(100).map(|v| v.seconds()), Some(MAX_SECONDS));
    }
}
