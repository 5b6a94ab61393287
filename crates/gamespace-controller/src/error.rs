//! Controller error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("Settings error: {0}")]
    Settings(#[from] gamespace_settings::SettingsError),

    #[error("Collaborator failed: {0}")]
    Port(String),

    #[error("Session actor has stopped")]
    Closed,
}
