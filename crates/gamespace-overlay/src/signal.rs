//! Controller to UI thread channel

use tokio::sync::mpsc;

use crate::ports::OverlaySignal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayMessage {
    GameStarted(String),
    GameLeft,
}

/// Sending half, held by the controller
#[derive(Clone)]
pub struct OverlayNotifier {
    tx: mpsc::UnboundedSender<OverlayMessage>,
}

/// Receiving half, drained by the UI loop
pub struct OverlayInbox {
    rx: mpsc::UnboundedReceiver<OverlayMessage>,
}

pub fn overlay_channel() -> (OverlayNotifier, OverlayInbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (OverlayNotifier { tx }, OverlayInbox { rx })
}

impl OverlayNotifier {
    fn send(&self, message: OverlayMessage) {
        if self.tx.send(message).is_err() {
            tracing::debug!("Overlay inbox closed, dropping message");
        }
    }
}

impl OverlaySignal for OverlayNotifier {
    fn game_started(&self, app_id: &str) {
        self.send(OverlayMessage::GameStarted(app_id.to_string()));
    }

    fn game_left(&self) {
        self.send(OverlayMessage::GameLeft);
    }
}

impl OverlayInbox {
    /// Everything queued so far, without waiting
    pub fn drain(&mut self) -> Vec<OverlayMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = self.rx.try_recv() {
            messages.push(message);
        }
        messages
    }

    /// Wait for the next message; `None` once every notifier is gone
    pub async fn recv(&mut self) -> Option<OverlayMessage> {
        self.rx.recv().await
    }
}
