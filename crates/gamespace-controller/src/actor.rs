//! Session actor
//!
//! The controller lives on one blocking task and consumes a FIFO queue, so
//! transitions never interleave and settings I/O never runs on the caller's
//! thread. Must be spawned from inside a tokio runtime.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use gamespace_overlay::{ActionSink, OverlayCommand};

use crate::controller::SessionController;
use crate::error::ControllerError;
use crate::event::SessionEvent;
use crate::launch::LaunchContext;
use crate::Result;

/// Cloneable entry point into the session sequence
#[derive(Clone)]
pub struct ControllerHandle {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl ControllerHandle {
    pub fn send(&self, event: SessionEvent) -> Result<()> {
        self.tx.send(event).map_err(|_| ControllerError::Closed)
    }

    pub fn foreground_changed(&self, app_id: impl Into<String>) -> Result<()> {
        self.send(SessionEvent::ForegroundChanged(app_id.into()))
    }

    pub fn screen_off(&self) -> Result<()> {
        self.send(SessionEvent::ScreenOff)
    }

    pub fn screen_on(&self) -> Result<()> {
        self.send(SessionEvent::ScreenOn)
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(SessionEvent::Shutdown)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl ActionSink for ControllerHandle {
    fn dispatch(&self, command: OverlayCommand) {
        if let Err(e) = self.send(SessionEvent::Overlay(command)) {
            tracing::warn!(command = ?command, error = %e, "Dropping overlay action");
        }
    }
}

/// Reconcile, then process events until `Shutdown` or every handle is dropped.
/// The join handle yields the controller back.
pub fn spawn_session_actor(
    mut controller: SessionController,
    launch: LaunchContext,
) -> (ControllerHandle, JoinHandle<SessionController>) {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let task = tokio::task::spawn_blocking(move || {
        controller.reconcile(&launch);

        while let Some(event) = rx.blocking_recv() {
            let stop = event == SessionEvent::Shutdown;
            controller.handle(event);
            if stop {
                break;
            }
        }

        tracing::debug!("Session actor finished");
        controller
    });

    (ControllerHandle { tx }, task)
}
