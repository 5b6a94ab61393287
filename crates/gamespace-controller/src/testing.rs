//! Fakes shared by controller and actor tests

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gamespace_overlay::{overlay_channel, OverlayInbox};
use gamespace_session::{SessionManager, SqliteSessionStore};
use gamespace_settings::{AppPreferences, DatabaseSettings, GameMode, ManagedApp, SystemSettings};
use gamespace_storage::Database;

use crate::controller::{ControllerPorts, SessionController};
use crate::ports::{ForegroundSource, ModeIntervention, PowerControl};
use crate::Result;

pub(crate) fn managed(app_id: &str, mode: GameMode) -> ManagedApp {
    ManagedApp::new(app_id, mode)
}

#[derive(Default)]
pub(crate) struct FakeModes {
    hints: Mutex<Vec<(String, String)>>,
    modes: Mutex<Vec<(String, GameMode)>>,
    available: Mutex<Option<Vec<GameMode>>>,
}

impl FakeModes {
    pub fn restrict(&self, modes: Vec<GameMode>) {
        *self.available.lock() = Some(modes);
    }

    pub fn last_hint(&self) -> Option<(String, String)> {
        self.hints.lock().last().cloned()
    }

    pub fn last_mode(&self) -> Option<(String, GameMode)> {
        self.modes.lock().last().cloned()
    }
}

impl ModeIntervention for FakeModes {
    fn apply_mode_hint(&self, app_id: &str, config: &str) -> Result<()> {
        self.hints.lock().push((app_id.to_string(), config.to_string()));
        Ok(())
    }

    fn available_modes(&self, _app_id: &str) -> Vec<GameMode> {
        self.available
            .lock()
            .clone()
            .unwrap_or_else(|| GameMode::ALL.to_vec())
    }

    fn set_game_mode(&self, app_id: &str, mode: GameMode) -> Result<()> {
        self.modes.lock().push((app_id.to_string(), mode));
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakePower {
    stay_awake: AtomicBool,
    allowlisted: AtomicBool,
}

impl FakePower {
    pub fn stay_awake(&self) -> bool {
        self.stay_awake.load(Ordering::SeqCst)
    }

    pub fn allowlisted(&self) -> bool {
        self.allowlisted.load(Ordering::SeqCst)
    }
}

impl PowerControl for FakePower {
    fn set_stay_awake(&self, stay_awake: bool) -> Result<()> {
        self.stay_awake.store(stay_awake, Ordering::SeqCst);
        Ok(())
    }

    fn set_battery_allowlisted(&self, allowlisted: bool) -> Result<()> {
        self.allowlisted.store(allowlisted, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeForeground {
    current: Mutex<Option<String>>,
}

impl FakeForeground {
    pub fn set(&self, app_id: Option<&str>) {
        *self.current.lock() = app_id.map(str::to_string);
    }
}

impl ForegroundSource for FakeForeground {
    fn current_foreground(&self) -> Option<String> {
        self.current.lock().clone()
    }
}

pub(crate) struct Fixture {
    pub db: Database,
    pub system: SystemSettings,
    pub prefs: AppPreferences,
    pub modes: Arc<FakeModes>,
    pub power: Arc<FakePower>,
    pub foreground: Arc<FakeForeground>,
    pub inbox: OverlayInbox,
    pub controller: SessionController,
}

impl Fixture {
    pub fn new() -> Self {
        Self::over(Database::open_in_memory().unwrap())
    }

    /// Same storage, fresh controller and collaborators
    pub fn restart(self) -> Self {
        Self::over(self.db)
    }

    fn over(db: Database) -> Self {
        let system = SystemSettings::new(Arc::new(DatabaseSettings::system(db.clone())));
        let prefs = AppPreferences::new(Arc::new(DatabaseSettings::preferences(db.clone())));
        let sessions = SessionManager::new(
            Arc::new(SqliteSessionStore::new(db.clone())),
            system.clone(),
            prefs.clone(),
        );

        let modes = Arc::new(FakeModes::default());
        let power = Arc::new(FakePower::default());
        let foreground = Arc::new(FakeForeground::default());
        let (notifier, inbox) = overlay_channel();
        let ports = ControllerPorts {
            overlay: Arc::new(notifier),
            modes: modes.clone(),
            power: power.clone(),
            foreground: foreground.clone(),
        };

        Self {
            db,
            controller: SessionController::new(sessions, system.clone(), prefs.clone(), ports),
            system,
            prefs,
            modes,
            power,
            foreground,
            inbox,
        }
    }
}
