//! GameSpace Controller
//!
//! Decides session transitions from foreground-app changes and runs them on a
//! single serialized sequence:
//! - [`ControllerState`] is the pure `Idle`/`Active(app)` state machine
//! - [`SessionController`] performs the side effects of each transition
//! - [`spawn_session_actor`] owns the controller on a blocking task and hands
//!   out [`ControllerHandle`]s; every event source goes through one
//! - [`ForegroundWatcher`] polls a [`ForegroundSource`] for hosts without push
//!   notifications

mod actor;
mod controller;
mod error;
mod event;
mod launch;
mod ports;
mod state;
mod watcher;

#[cfg(test)]
mod testing;

pub use actor::{spawn_session_actor, ControllerHandle};
pub use controller::{ControllerPorts, SessionController};
pub use error::ControllerError;
pub use event::SessionEvent;
pub use launch::{LaunchContext, LaunchIntent};
pub use ports::{ForegroundSource, ModeIntervention, PowerControl};
pub use state::{ControllerState, Transition};
pub use watcher::ForegroundWatcher;

pub type Result<T> = std::result::Result<T, ControllerError>;
