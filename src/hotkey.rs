use rdev::{listen, EventType, Key};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;
use std::time::Duration;

/// A key plus modifier requirements, e.g. `Ctrl+Shift+T` or plain `F2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hotkey {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Default for Hotkey {
    fn default() -> Self {
        Self {
            key: Key::F2,
            ctrl: false,
            shift: false,
            alt: false,
        }
    }
}

/// Parse a hotkey string like `"Ctrl+Shift+Space"`.
pub fn parse_hotkey(s: &str) -> Option<Hotkey> {
    let mut hk = Hotkey {
        key: Key::F2,
        ctrl: false,
        shift: false,
        alt: false,
    };
    let mut key = None;
    for part in s.split('+') {
        let upper = part.trim().to_ascii_uppercase();
        match upper.as_str() {
            "CTRL" | "CONTROL" => hk.ctrl = true,
            "SHIFT" => hk.shift = true,
            "ALT" => hk.alt = true,
            "" => {}
            _ => key = Some(parse_key(&upper)?),
        }
    }
    hk.key = key?;
    Some(hk)
}

fn parse_key(upper: &str) -> Option<Key> {
    const FUNCTION_KEYS: [Key; 12] = [
        Key::F1,
        Key::F2,
        Key::F3,
        Key::F4,
        Key::F5,
        Key::F6,
        Key::F7,
        Key::F8,
        Key::F9,
        Key::F10,
        Key::F11,
        Key::F12,
    ];
    const DIGIT_KEYS: [Key; 10] = [
        Key::Num0,
        Key::Num1,
        Key::Num2,
        Key::Num3,
        Key::Num4,
        Key::Num5,
        Key::Num6,
        Key::Num7,
        Key::Num8,
        Key::Num9,
    ];
    const LETTER_KEYS: [Key; 26] = [
        Key::KeyA,
        Key::KeyB,
        Key::KeyC,
        Key::KeyD,
        Key::KeyE,
        Key::KeyF,
        Key::KeyG,
        Key::KeyH,
        Key::KeyI,
        Key::KeyJ,
        Key::KeyK,
        Key::KeyL,
        Key::KeyM,
        Key::KeyN,
        Key::KeyO,
        Key::KeyP,
        Key::KeyQ,
        Key::KeyR,
        Key::KeyS,
        Key::KeyT,
        Key::KeyU,
        Key::KeyV,
        Key::KeyW,
        Key::KeyX,
        Key::KeyY,
        Key::KeyZ,
    ];

    match upper {
        "SPACE" => return Some(Key::Space),
        "TAB" => return Some(Key::Tab),
        "ENTER" | "RETURN" => return Some(Key::Return),
        "ESC" | "ESCAPE" => return Some(Key::Escape),
        "HOME" => return Some(Key::Home),
        "END" => return Some(Key::End),
        _ => {}
    }
    if let Some(n) = upper.strip_prefix('F').and_then(|n| n.parse::<usize>().ok()) {
        if (1..=12).contains(&n) {
            return Some(FUNCTION_KEYS[n - 1]);
        }
        return None;
    }
    let mut chars = upper.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() => {
            Some(DIGIT_KEYS[c as usize - '0' as usize])
        }
        (Some(c), None) if c.is_ascii_uppercase() => {
            Some(LETTER_KEYS[c as usize - 'A' as usize])
        }
        _ => None,
    }
}

/// Edge-triggered flag set by the global key listener and drained by the
/// overlay's update loop.
#[derive(Clone)]
pub struct HotkeyTrigger {
    fired: Arc<AtomicBool>,
    hotkey: Hotkey,
}

impl HotkeyTrigger {
    pub fn new(hotkey: Hotkey) -> Self {
        Self {
            fired: Arc::new(AtomicBool::new(false)),
            hotkey,
        }
    }

    /// Spawn the background listener thread. Listener failures are logged
    /// and retried; the rest of the application keeps running without
    /// activation in the meantime.
    pub fn start_listener(&self) {
        let fired = self.fired.clone();
        let hotkey = self.hotkey;
        tracing::debug!(key = ?hotkey.key, "starting hotkey listener");
        thread::spawn(move || loop {
            let fired = fired.clone();
            let mut ctrl = false;
            let mut shift = false;
            let mut alt = false;
            let mut held = false;
            let result = listen(move |event| {
                match event.event_type {
                    EventType::KeyPress(k) => {
                        match k {
                            Key::ControlLeft | Key::ControlRight => ctrl = true,
                            Key::ShiftLeft | Key::ShiftRight => shift = true,
                            Key::Alt | Key::AltGr => alt = true,
                            _ => {}
                        }
                        let combo = k == hotkey.key
                            && (!hotkey.ctrl || ctrl)
                            && (!hotkey.shift || shift)
                            && (!hotkey.alt || alt);
                        // Edge trigger: one activation per press, no repeat
                        // while the key is held.
                        if combo && !held {
                            held = true;
                            tracing::debug!("hotkey pressed");
                            fired.store(true, Ordering::SeqCst);
                        }
                    }
                    EventType::KeyRelease(k) => {
                        match k {
                            Key::ControlLeft | Key::ControlRight => ctrl = false,
                            Key::ShiftLeft | Key::ShiftRight => shift = false,
                            Key::Alt | Key::AltGr => alt = false,
                            _ => {}
                        }
                        if k == hotkey.key {
                            held = false;
                        }
                    }
                    _ => {}
                }
            });
            match result {
                Ok(()) => tracing::warn!("hotkey listener exited; restarting shortly"),
                Err(err) => tracing::warn!("hotkey listener failed: {err:?}; retrying shortly"),
            }
            thread::sleep(Duration::from_millis(500));
        });
    }

    /// Consume a pending activation, if any.
    pub fn take(&self) -> bool {
        self.fired.swap(false, Ordering::SeqCst)
    }

    /// Mark an activation as pending. Used by tests and by any in-process
    /// activation source.
    pub fn fire(&self) {
        self.fired.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_function_key() {
        let hk = parse_hotkey("F2").expect("F2 should parse");
        assert_eq!(hk.key, Key::F2);
        assert!(!hk.ctrl && !hk.shift && !hk.alt);
    }

    #[test]
    fn parses_modifier_combo() {
        let hk = parse_hotkey("Ctrl+Shift+Space").expect("combo should parse");
        assert_eq!(hk.key, Key::Space);
        assert!(hk.ctrl && hk.shift && !hk.alt);
    }

    #[test]
    fn rejects_unknown_or_incomplete() {
        assert!(parse_hotkey("Ctrl+Foo").is_none());
        assert!(parse_hotkey("Ctrl+Shift").is_none());
        assert!(parse_hotkey("F13").is_none());
    }

    #[test]
    fn trigger_is_edge_drained() {
        let trigger = HotkeyTrigger::new(Hotkey::default());
        assert!(!trigger.take());
        trigger.fire();
        assert!(trigger.take());
        assert!(!trigger.take());
    }
}
