//! Main tracker state container
//!
//! Owns the database and the settings facades, and starts or stops the
//! session actor on the external start/stop triggers. The overlay is built
//! here too but handed to the host, which runs it on its UI thread.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use tokio::task::JoinHandle;

use gamespace_controller::{
    spawn_session_actor, ControllerHandle, ControllerPorts, ForegroundSource, ForegroundWatcher,
    LaunchContext, LaunchIntent, ModeIntervention, PowerControl, SessionController,
};
use gamespace_overlay::{
    overlay_channel, ActionSink, DisplayMetrics, FrameRateSource, Overlay, OverlayCommand,
    OverlayInbox, OverlayNotifier, OverlayWindow, ScreenCapture,
};
use gamespace_session::{SessionManager, SqliteSessionStore};
use gamespace_settings::{
    AppPreferences, DatabaseSettings, GameMode, ManagedApp, SettingsStore, SystemSettings,
};
use gamespace_storage::Database;

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

/// Platform integrations supplied by the host
#[derive(Clone)]
pub struct HostServices {
    /// Device settings; `None` keeps them in the database
    pub system_settings: Option<Arc<dyn SettingsStore>>,
    pub modes: Arc<dyn ModeIntervention>,
    pub power: Arc<dyn PowerControl>,
    pub foreground: Arc<dyn ForegroundSource>,
    pub capture: Option<Arc<dyn ScreenCapture>>,
    /// Frame rate readout for the collapsed overlay
    pub frame_rate: Option<Arc<dyn FrameRateSource>>,
    /// Poll `foreground` instead of waiting for pushed changes
    pub poll_foreground: bool,
}

struct Tracker {
    handle: ControllerHandle,
    task: JoinHandle<SessionController>,
    watcher: Option<ForegroundWatcher>,
}

/// Forwards overlay buttons to whichever actor is running
#[derive(Clone, Default)]
struct ActionRelay {
    handle: Arc<RwLock<Option<ControllerHandle>>>,
}

impl ActionSink for ActionRelay {
    fn dispatch(&self, command: OverlayCommand) {
        match self.handle.read().as_ref() {
            Some(handle) => handle.dispatch(command),
            None => tracing::debug!(command = ?command, "Overlay action while not tracking"),
        }
    }
}

pub struct GameSpace {
    config: Config,
    db: Database,
    system: SystemSettings,
    prefs: AppPreferences,
    sessions: SessionManager,
    host: HostServices,
    notifier: OverlayNotifier,
    inbox: Mutex<Option<OverlayInbox>>,
    relay: ActionRelay,
    tracker: Mutex<Option<Tracker>>,
}

impl GameSpace {
    /// Open the database at the configured path and wire everything up
    pub fn new(config: Config, host: HostServices) -> Result<Self> {
        config.validate()?;

        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Ok(Self::with_database(config, db, host))
    }

    pub fn with_database(config: Config, db: Database, host: HostServices) -> Self {
        let system_store = host
            .system_settings
            .clone()
            .unwrap_or_else(|| Arc::new(DatabaseSettings::system(db.clone())));
        let system = SystemSettings::new(system_store);
        let prefs = AppPreferences::new(Arc::new(DatabaseSettings::preferences(db.clone())));
        let sessions = SessionManager::new(
            Arc::new(SqliteSessionStore::new(db.clone())),
            system.clone(),
            prefs.clone(),
        );
        let (notifier, inbox) = overlay_channel();

        Self {
            config,
            db,
            system,
            prefs,
            sessions,
            host,
            notifier,
            inbox: Mutex::new(Some(inbox)),
            relay: ActionRelay::default(),
            tracker: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn system(&self) -> &SystemSettings {
        &self.system
    }

    pub fn preferences(&self) -> &AppPreferences {
        &self.prefs
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    // === Managed apps ===

    pub fn managed_apps(&self) -> Result<Vec<ManagedApp>> {
        Ok(self.system.managed_apps()?)
    }

    pub fn set_app_mode(&self, app_id: &str, mode: GameMode) -> Result<ManagedApp> {
        Ok(self.system.set_mode_for(app_id, mode)?)
    }

    pub fn remove_managed_app(&self, app_id: &str) -> Result<()> {
        let apps: Vec<ManagedApp> = self
            .system
            .managed_apps()?
            .into_iter()
            .filter(|app| app.id != app_id)
            .collect();
        Ok(self.system.set_managed_apps(&apps)?)
    }

    // === Tracking lifecycle ===

    pub fn is_tracking(&self) -> bool {
        self.tracker.lock().is_some()
    }

    /// Entry point for both triggers and for a system restart
    pub async fn launch(&self, launch: LaunchContext) -> Result<()> {
        match launch.intent {
            Some(LaunchIntent::Stop) => self.stop_tracking().await,
            Some(LaunchIntent::Start { .. }) => self.start_tracking(launch).map(|_| ()),
            None if launch.is_restart() => self.start_tracking(launch).map(|_| ()),
            None => {
                tracing::debug!(
                    restart_count = launch.restart_count,
                    "Launch without intent on first start, ignoring"
                );
                Ok(())
            }
        }
    }

    /// Spawn the session actor. Must run inside a tokio runtime.
    pub fn start_tracking(&self, launch: LaunchContext) -> Result<ControllerHandle> {
        let mut tracker = self.tracker.lock();
        if let Some(existing) = tracker.as_ref() {
            tracing::debug!("Tracking already running");
            return Ok(existing.handle.clone());
        }

        let controller = SessionController::new(
            self.sessions.clone(),
            self.system.clone(),
            self.prefs.clone(),
            ControllerPorts {
                overlay: Arc::new(self.notifier.clone()),
                modes: self.host.modes.clone(),
                power: self.host.power.clone(),
                foreground: self.host.foreground.clone(),
            },
        );
        let (handle, task) = spawn_session_actor(controller, launch);

        let watcher = self.host.poll_foreground.then(|| {
            ForegroundWatcher::spawn(
                self.host.foreground.clone(),
                handle.clone(),
                self.config.poll_interval(),
            )
        });

        *self.relay.handle.write() = Some(handle.clone());
        *tracker = Some(Tracker {
            handle: handle.clone(),
            task,
            watcher,
        });

        tracing::info!(polling = self.host.poll_foreground, "Tracking started");
        Ok(handle)
    }

    /// Restore settings, hide the overlay and wait for the actor to finish
    pub async fn stop_tracking(&self) -> Result<()> {
        let tracker = self.tracker.lock().take();
        let Some(tracker) = tracker else {
            tracing::debug!("Tracking not running");
            return Ok(());
        };
        *self.relay.handle.write() = None;

        if let Some(watcher) = tracker.watcher {
            watcher.stop().await;
        }
        if let Err(e) = tracker.handle.shutdown() {
            tracing::warn!(error = %e, "Session actor already stopped");
        }
        if let Err(e) = tracker.task.await {
            tracing::warn!(error = %e, "Session actor failed");
        }

        tracing::info!("Tracking stopped");
        Ok(())
    }

    pub fn handle(&self) -> Result<ControllerHandle> {
        self.tracker
            .lock()
            .as_ref()
            .map(|t| t.handle.clone())
            .ok_or(CoreError::NotTracking)
    }

    // === Event sources ===

    pub fn foreground_changed(&self, app_id: &str) -> Result<()> {
        Ok(self.handle()?.foreground_changed(app_id)?)
    }

    pub fn screen_off(&self) -> Result<()> {
        Ok(self.handle()?.screen_off()?)
    }

    pub fn screen_on(&self) -> Result<()> {
        Ok(self.handle()?.screen_on()?)
    }

    // === Overlay ===

    /// The UI side of the controller channel; available once
    pub fn take_overlay_inbox(&self) -> Option<OverlayInbox> {
        self.inbox.lock().take()
    }

    /// Build the overlay shell for the host's UI thread
    pub fn create_overlay(&self, window: Arc<dyn OverlayWindow>, metrics: DisplayMetrics) -> Overlay {
        let mut overlay = Overlay::new(
            self.config.positioner(),
            metrics,
            window,
            Arc::new(self.prefs.clone()),
            Arc::new(self.relay.clone()),
        )
        .with_initial_offset_dp(self.config.initial_offset_dp);

        if let Some(capture) = self.host.capture.clone() {
            overlay = overlay.with_capture(capture);
        }
        if let Some(frame_rate) = self.host.frame_rate.clone() {
            overlay = overlay.with_frame_rate(frame_rate);
        }
        overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamespace_controller::ControllerError;
    use gamespace_overlay::{Anchor, OverlayMessage, OverlayView};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Instant;

    #[derive(Default)]
    struct NoopModes;

    impl ModeIntervention for NoopModes {
        fn apply_mode_hint(&self, _app_id: &str, _config: &str) -> gamespace_controller::Result<()> {
            Ok(())
        }

        fn set_game_mode(&self, _app_id: &str, _mode: GameMode) -> gamespace_controller::Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakePower {
        stay_awake: AtomicBool,
    }

    impl PowerControl for FakePower {
        fn set_stay_awake(&self, stay_awake: bool) -> gamespace_controller::Result<()> {
            self.stay_awake.store(stay_awake, Ordering::SeqCst);
            Ok(())
        }

        fn set_battery_allowlisted(&self, _allowlisted: bool) -> gamespace_controller::Result<()> {
            Err(ControllerError::Port("not permitted".to_string()))
        }
    }

    #[derive(Default)]
    struct FixedForeground {
        current: Mutex<Option<String>>,
    }

    impl ForegroundSource for FixedForeground {
        fn current_foreground(&self) -> Option<String> {
            self.current.lock().clone()
        }
    }

    #[derive(Default)]
    struct NullWindow {
        views: Mutex<Vec<OverlayView>>,
    }

    impl OverlayWindow for NullWindow {
        fn attach(&self) {}
        fn detach(&self) {}
        fn render(&self, view: &OverlayView) {
            self.views.lock().push(*view);
        }
    }

    fn gamespace(foreground: Arc<FixedForeground>, power: Arc<FakePower>) -> GameSpace {
        let host = HostServices {
            system_settings: None,
            modes: Arc::new(NoopModes),
            power,
            foreground,
            capture: None,
            frame_rate: None,
            poll_foreground: false,
        };
        GameSpace::with_database(
            Config::new(PathBuf::from("/unused")),
            Database::open_in_memory().unwrap(),
            host,
        )
    }

    #[tokio::test]
    async fn test_track_game_and_stop() {
        let power = Arc::new(FakePower::default());
        let gs = gamespace(Arc::new(FixedForeground::default()), power.clone());
        gs.set_app_mode("game.app", GameMode::Performance).unwrap();
        gs.system().set_heads_up(true).unwrap();
        gs.preferences().set_stay_awake(true).unwrap();
        let mut inbox = gs.take_overlay_inbox().unwrap();
        assert!(gs.take_overlay_inbox().is_none());

        assert!(matches!(gs.foreground_changed("game.app"), Err(CoreError::NotTracking)));

        gs.launch(LaunchContext::start()).await.unwrap();
        assert!(gs.is_tracking());
        gs.foreground_changed("game.app").unwrap();

        let message = inbox.recv().await.unwrap();
        assert_eq!(message, OverlayMessage::GameStarted("game.app".to_string()));
        assert!(!gs.system().heads_up().unwrap());
        assert!(power.stay_awake.load(Ordering::SeqCst));

        gs.launch(LaunchContext {
            intent: Some(LaunchIntent::Stop),
            restart_count: 1,
        })
        .await
        .unwrap();
        assert!(!gs.is_tracking());
        assert!(gs.system().heads_up().unwrap());
        assert!(!power.stay_awake.load(Ordering::SeqCst));
        assert!(gs.sessions().active_session().is_none());
        assert_eq!(inbox.recv().await, Some(OverlayMessage::GameLeft));
    }

    #[tokio::test]
    async fn test_start_is_idempotent() {
        let gs = gamespace(Arc::new(FixedForeground::default()), Arc::new(FakePower::default()));
        let first = gs.start_tracking(LaunchContext::start()).unwrap();
        let second = gs.start_tracking(LaunchContext::start()).unwrap();
        first.screen_on().unwrap();
        second.screen_off().unwrap();

        gs.stop_tracking().await.unwrap();
        gs.stop_tracking().await.unwrap();
        assert!(first.is_closed());
    }

    #[tokio::test]
    async fn test_launch_without_intent_needs_restart() {
        let gs = gamespace(Arc::new(FixedForeground::default()), Arc::new(FakePower::default()));

        gs.launch(LaunchContext::default()).await.unwrap();
        assert!(!gs.is_tracking());
        gs.launch(LaunchContext::restarted(1)).await.unwrap();
        assert!(!gs.is_tracking());

        gs.launch(LaunchContext::restarted(2)).await.unwrap();
        assert!(gs.is_tracking());
        gs.stop_tracking().await.unwrap();
    }

    #[tokio::test]
    async fn test_restart_picks_up_running_game() {
        let foreground = Arc::new(FixedForeground::default());
        let gs = gamespace(foreground.clone(), Arc::new(FakePower::default()));
        gs.set_app_mode("game.app", GameMode::Standard).unwrap();
        *foreground.current.lock() = Some("game.app".to_string());
        let mut inbox = gs.take_overlay_inbox().unwrap();

        gs.launch(LaunchContext::restarted(2)).await.unwrap();
        assert_eq!(
            inbox.recv().await,
            Some(OverlayMessage::GameStarted("game.app".to_string()))
        );
        gs.stop_tracking().await.unwrap();
    }

    #[tokio::test]
    async fn test_overlay_drag_is_persisted() {
        let gs = gamespace(Arc::new(FixedForeground::default()), Arc::new(FakePower::default()));
        let window = Arc::new(NullWindow::default());
        let metrics = DisplayMetrics::new(1080, 2400).with_insets(100, 50);
        let mut overlay = gs.create_overlay(window.clone(), metrics);

        overlay.start();
        assert_eq!(overlay.anchor(), Anchor::new(540, 108));

        overlay.on_touch_down(540.0, 120.0, Instant::now());
        overlay.on_touch_move(-100.0, 600.0);
        overlay.on_touch_up(Instant::now());
        assert_eq!(gs.preferences().overlay_position().unwrap(), Some((-540, 588)));

        // Not tracking: settings buttons are dropped, not applied
        overlay.press(OverlayCommand::ToggleHeadsUp);
        assert!(gs.system().heads_up().unwrap());
        assert!(!window.views.lock().is_empty());
    }

    #[test]
    fn test_managed_app_list() {
        let gs = gamespace(Arc::new(FixedForeground::default()), Arc::new(FakePower::default()));
        gs.set_app_mode("game.a", GameMode::Battery).unwrap();
        gs.set_app_mode("game.b", GameMode::Standard).unwrap();
        gs.remove_managed_app("game.a").unwrap();

        let apps = gs.managed_apps().unwrap();
        assert_eq!(apps, vec![ManagedApp::new("game.b", GameMode::Standard)]);
    }
}
