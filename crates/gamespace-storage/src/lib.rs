//! GameSpace Storage Layer
//!
//! SQLite-based persistence for preferences, device settings and the
//! saved game session. Everything that has to survive the tracker being
//! killed lives here.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
