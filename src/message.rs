use serde::{Deserialize, Serialize};
use std::sync::mpsc::{Receiver, Sender};

/// Control messages exchanged between the activation source, the panel and
/// the overlay host.
///
/// One tagged type covers the whole protocol; receivers validate the shape
/// and ignore anything unrecognized instead of assuming structure. Delivery
/// is fire-and-forget with no ordering guarantee, so handlers must tolerate
/// stale messages (last write wins on geometry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OverlayMessage {
    /// Alternate overlay presence.
    Toggle,
    /// Tear the overlay down.
    Close,
    /// Apply a new container height in pixels; width is untouched.
    Resize { height: u32 },
}

pub type MessageSender = Sender<OverlayMessage>;
pub type MessageReceiver = Receiver<OverlayMessage>;

/// Decode a message from its wire form, dropping malformed or unknown
/// shapes with a debug log rather than an error.
pub fn decode(value: &serde_json::Value) -> Option<OverlayMessage> {
    match serde_json::from_value(value.clone()) {
        Ok(msg) => Some(msg),
        Err(err) => {
            tracing::debug!("ignoring unrecognized overlay message: {err}");
            None
        }
    }
}
