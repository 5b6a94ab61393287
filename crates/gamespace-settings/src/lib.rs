//! GameSpace Settings
//!
//! Typed accessors over the named settings the tracker reads and overrides:
//! - device settings (heads-up, brightness mode, three-finger gesture, ringer)
//! - the managed app list with per-app game mode
//! - the user's own preferences (which overrides are enabled, overlay position)
//!
//! Pure read/write. Deciding *when* to override belongs to the session layer.

mod error;
mod game;
mod overrides;
mod preferences;
mod retry;
mod store;
mod system;

pub use error::SettingsError;
pub use game::{GameConfig, GameMode, ManagedApp};
pub use overrides::{OverrideRule, SettingKey, SettingValue};
pub use preferences::AppPreferences;
pub use retry::retry_once;
pub use store::{DatabaseSettings, MemorySettingsStore, SettingsStore};
pub use system::{SystemSettings, RINGER_MODE_NORMAL, RINGER_MODE_SILENT, RINGER_MODE_VIBRATE};

pub type Result<T> = std::result::Result<T, SettingsError>;
