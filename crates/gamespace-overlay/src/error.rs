//! Overlay error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("Settings error: {0}")]
    Settings(#[from] gamespace_settings::SettingsError),

    #[error("Capture failed: {0}")]
    Capture(String),

    #[error("Window error: {0}")]
    Window(String),
}
