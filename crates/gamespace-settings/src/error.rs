//! Settings error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Storage error: {0}")]
    Storage(#[from] gamespace_storage::StorageError),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Settings backend unavailable: {0}")]
    Unavailable(String),
}
