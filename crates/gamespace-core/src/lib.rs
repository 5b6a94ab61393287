//! GameSpace Core
//!
//! Wires storage, settings, the session layer, the controller actor and the
//! overlay into one [`GameSpace`] instance. The host supplies platform
//! integrations through [`HostServices`] and drives the tracker with the
//! start/stop triggers.

mod config;
mod error;
mod gamespace;

pub use config::Config;
pub use error::CoreError;
pub use gamespace::{GameSpace, HostServices};

// Re-export core components
pub use gamespace_controller::{
    ControllerHandle, ControllerState, ForegroundSource, LaunchContext, LaunchIntent,
    ModeIntervention, PowerControl, SessionEvent,
};
pub use gamespace_overlay::{
    Anchor, DisplayMetrics, FrameRateSource, Overlay, OverlayCommand, OverlayInbox,
    OverlayMessage, OverlayView, OverlayWindow, ScreenCapture,
};
pub use gamespace_session::{SessionManager, SessionState};
pub use gamespace_settings::{
    AppPreferences, GameMode, ManagedApp, SettingsStore, SystemSettings,
};
pub use gamespace_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging with `RUST_LOG`, falling back to `info`
pub fn init_logging() {
    init_logging_with("info");
}

/// Initialize logging with `RUST_LOG`, falling back to `default_filter`
pub fn init_logging_with(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if fmt().with_env_filter(filter).with_target(true).try_init().is_err() {
        tracing::debug!("Logging already initialized");
    }
}
