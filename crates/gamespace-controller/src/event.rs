//! Events funneled into the session sequence

use gamespace_overlay::OverlayCommand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new top-level app took focus. Duplicates are expected.
    ForegroundChanged(String),
    ScreenOff,
    ScreenOn,
    /// Settings button pressed on the overlay
    Overlay(OverlayCommand),
    /// Stop tracking; the actor exits after handling it
    Shutdown,
}
