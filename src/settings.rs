use serde::{Deserialize, Serialize};

use crate::hotkey::{parse_hotkey, Hotkey};

/// User configuration, stored as JSON next to the binary. A missing file or
/// missing fields fall back to defaults; unknown fields are ignored so older
/// builds can read newer files.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Global hotkey that toggles the overlay. `None` disables activation.
    #[serde(default = "default_hotkey")]
    pub hotkey: Option<String>,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Starting countdown duration in seconds.
    #[serde(default = "default_start_seconds")]
    pub start_seconds: u32,
    /// Quick-add button steps in seconds, shown left to right.
    #[serde(default = "default_quick_add")]
    pub quick_add: Vec<u32>,
    /// Play a tone when the countdown reaches zero.
    #[serde(default = "default_alert_tone")]
    pub alert_tone: bool,
    /// Initial (right, top) screen offsets of the overlay container.
    #[serde(default = "default_overlay_offset")]
    pub overlay_offset: (f32, f32),
}

fn default_hotkey() -> Option<String> {
    Some("F2".into())
}

fn default_start_seconds() -> u32 {
    crate::engine::DEFAULT_START_SECONDS
}

fn default_quick_add() -> Vec<u32> {
    vec![30, 60, 300, 600]
}

fn default_alert_tone() -> bool {
    true
}

fn default_overlay_offset() -> (f32, f32) {
    (20.0, 20.0)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hotkey: default_hotkey(),
            debug_logging: false,
            start_seconds: default_start_seconds(),
            quick_add: default_quick_add(),
            alert_tone: default_alert_tone(),
            overlay_offset: default_overlay_offset(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Parse the configured toggle hotkey, if any. An invalid string is
    /// logged and treated as unset.
    pub fn toggle_hotkey(&self) -> Option<Hotkey> {
        let raw = self.hotkey.as_ref()?;
        match parse_hotkey(raw) {
            Some(hk) => Some(hk),
            None => {
                tracing::warn!("configured hotkey '{}' is invalid; activation disabled", raw);
                None
            }
        }
    }
}
