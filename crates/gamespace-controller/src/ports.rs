//! Host integrations the controller drives

use gamespace_settings::GameMode;

use crate::Result;

/// Vendor performance/battery configuration channel
pub trait ModeIntervention: Send + Sync {
    /// Write the opaque mode configuration string for `app_id`
    fn apply_mode_hint(&self, app_id: &str, config: &str) -> Result<()>;

    fn available_modes(&self, _app_id: &str) -> Vec<GameMode> {
        GameMode::ALL.to_vec()
    }

    fn set_game_mode(&self, app_id: &str, mode: GameMode) -> Result<()>;
}

/// Process power flags
pub trait PowerControl: Send + Sync {
    fn set_stay_awake(&self, stay_awake: bool) -> Result<()>;
    fn set_battery_allowlisted(&self, allowlisted: bool) -> Result<()>;
}

/// Out-of-band query of the focused top-level app
pub trait ForegroundSource: Send + Sync {
    fn current_foreground(&self) -> Option<String>;
}
