//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] gamespace_storage::StorageError),

    #[error("Settings error: {0}")]
    Settings(#[from] gamespace_settings::SettingsError),

    #[error("Controller error: {0}")]
    Controller(#[from] gamespace_controller::ControllerError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tracking not started")]
    NotTracking,
}
