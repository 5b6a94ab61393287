//! GameSpace Session Management
//!
//! A session is the period one managed app spends in the foreground with
//! its settings overrides applied:
//! - at most one session exists at any time
//! - the pre-session value of every overridden setting is persisted before
//!   anything is changed, so a killed tracker can still restore it
//! - unregistering always restores the saved values, never defaults

mod error;
mod manager;
mod state;
mod store;

pub use error::SessionError;
pub use manager::{RegisterOutcome, SessionManager};
pub use state::SessionState;
pub use store::{MemorySessionStore, SessionStore, SqliteSessionStore};

pub type Result<T> = std::result::Result<T, SessionError>;
