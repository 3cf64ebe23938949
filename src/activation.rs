use crate::message::{MessageSender, OverlayMessage};

/// Delivers the activation signal to the overlay host.
///
/// Mirrors the external activation contract: when delivery fails the
/// dispatcher re-establishes the channel once and retries; a second failure
/// is reported through the log and given up on.
pub struct ActivationDispatcher {
    tx: MessageSender,
    reconnect: Box<dyn FnMut() -> MessageSender + Send>,
}

impl ActivationDispatcher {
    pub fn new(
        tx: MessageSender,
        reconnect: impl FnMut() -> MessageSender + Send + 'static,
    ) -> Self {
        Self {
            tx,
            reconnect: Box::new(reconnect),
        }
    }

    /// Send the toggle signal. Returns whether it was delivered.
    pub fn dispatch_toggle(&mut self) -> bool {
        if self.tx.send(OverlayMessage::Toggle).is_ok() {
            return true;
        }
        tracing::warn!("toggle delivery failed, re-establishing overlay channel");
        self.tx = (self.reconnect)();
        match self.tx.send(OverlayMessage::Toggle) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!("toggle redelivery failed: {err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn direct_delivery_succeeds() {
        let (tx, rx) = mpsc::channel();
        let mut dispatcher = ActivationDispatcher::new(tx.clone(), move || tx.clone());
        assert!(dispatcher.dispatch_toggle());
        assert_eq!(rx.recv().unwrap(), OverlayMessage::Toggle);
    }

    #[test]
    fn dead_channel_is_reestablished_and_retried_once() {
        let (dead_tx, dead_rx) = mpsc::channel();
        drop(dead_rx);
        let (live_tx, live_rx) = mpsc::channel();
        let mut dispatcher = ActivationDispatcher::new(dead_tx, move || live_tx.clone());
        assert!(dispatcher.dispatch_toggle());
        assert_eq!(live_rx.recv().unwrap(), OverlayMessage::Toggle);
    }

    #[test]
    fn second_failure_is_reported_not_retried() {
        let (dead_tx, dead_rx) = mpsc::channel();
        drop(dead_rx);
        let (still_dead_tx, still_dead_rx) = mpsc::channel::<OverlayMessage>();
        drop(still_dead_rx);
        let mut dispatcher = ActivationDispatcher::new(dead_tx, move || still_dead_tx.clone());
        assert!(!dispatcher.dispatch_toggle());
    }
}
