//! Session Controller
//!
//! Carries out [`Transition`]s decided by [`ControllerState`]. Every method
//! runs on the session sequence; none of them fail; collaborator errors are
//! logged and the transition still completes.

use std::sync::Arc;

use gamespace_overlay::{OverlayCommand, OverlaySignal};
use gamespace_session::SessionManager;
use gamespace_settings::{retry_once, AppPreferences, GameConfig, GameMode, SystemSettings};

use crate::event::SessionEvent;
use crate::launch::LaunchContext;
use crate::ports::{ForegroundSource, ModeIntervention, PowerControl};
use crate::state::{ControllerState, Transition};

/// Host collaborators
#[derive(Clone)]
pub struct ControllerPorts {
    pub overlay: Arc<dyn OverlaySignal>,
    pub modes: Arc<dyn ModeIntervention>,
    pub power: Arc<dyn PowerControl>,
    pub foreground: Arc<dyn ForegroundSource>,
}

pub struct SessionController {
    sessions: SessionManager,
    system: SystemSettings,
    prefs: AppPreferences,
    ports: ControllerPorts,
    state: ControllerState,
}

impl SessionController {
    pub fn new(
        sessions: SessionManager,
        system: SystemSettings,
        prefs: AppPreferences,
        ports: ControllerPorts,
    ) -> Self {
        Self {
            sessions,
            system,
            prefs,
            ports,
            state: ControllerState::Idle,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::ForegroundChanged(app_id) => self.on_foreground(&app_id),
            SessionEvent::ScreenOff => {
                // Session stays as is; the game may resume when the screen comes back
                self.set_stay_awake(false);
            }
            SessionEvent::ScreenOn => {
                if self.state.is_active() {
                    let stay_awake = self.pref("stay awake", || self.prefs.stay_awake(), false);
                    self.set_stay_awake(stay_awake);
                }
            }
            SessionEvent::Overlay(command) => self.on_overlay_command(command),
            SessionEvent::Shutdown => self.shutdown(),
        }
    }

    /// Startup step: derive the foreground app and repair leftover state
    pub fn reconcile(&mut self, launch: &LaunchContext) {
        let foreground = match launch.app_id() {
            Some(app_id) => Some(app_id.to_string()),
            None => self.ports.foreground.current_foreground(),
        };

        tracing::info!(
            restart = launch.is_restart(),
            restart_count = launch.restart_count,
            foreground = ?foreground,
            "Reconciling session state"
        );

        if let Some(stale) = self.sessions.active_session() {
            if foreground.as_deref() != Some(stale.managed_app_id.as_str()) {
                tracing::warn!(
                    session_id = %stale.id,
                    app_id = %stale.managed_app_id,
                    "Restoring stale session left by a previous run"
                );
                self.sessions.unregister();
            }
        }

        if let Some(app_id) = foreground {
            self.on_foreground(&app_id);
        }

        // Foreground app left the managed list while we were gone
        if !self.state.is_active() && self.sessions.unregister().is_some() {
            tracing::warn!("Restored session for an app that is no longer managed");
        }
    }

    pub fn on_foreground(&mut self, app_id: &str) {
        let managed = match retry_once("read managed apps", || self.system.is_managed(app_id)) {
            Ok(managed) => managed,
            Err(e) => {
                tracing::warn!(app_id = %app_id, error = %e, "Failed to read managed apps");
                false
            }
        };

        let transition = self.state.on_foreground(app_id, managed);
        match &transition {
            Transition::Ignore => {
                tracing::debug!(app_id = %app_id, "Foreground change needs no transition");
                return;
            }
            Transition::Enter(to) => self.enter(to),
            Transition::Switch { from, to } => {
                tracing::info!(from = %from, to = %to, "Switching game session");
                // Restore the previous app before snapshotting the next one
                self.sessions.unregister();
                self.enter(to);
            }
            Transition::Leave(from) => self.leave(from),
        }
        self.state = self.state.apply(&transition);
    }

    /// Stop tracking: restore everything and hide the overlay
    pub fn shutdown(&mut self) {
        self.sessions.unregister();
        self.set_stay_awake(false);
        self.set_battery_allowlisted(false);
        self.ports.overlay.game_left();
        self.state = ControllerState::Idle;
        tracing::info!("Session tracking stopped");
    }

    fn enter(&self, app_id: &str) {
        self.sessions.register(app_id);

        let mode = match self.system.managed_app(app_id) {
            Ok(Some(app)) => app.preferred_mode,
            Ok(None) => GameMode::default(),
            Err(e) => {
                tracing::warn!(app_id = %app_id, error = %e, "Failed to read preferred mode");
                GameMode::default()
            }
        };
        self.apply_mode_hint(app_id);
        self.apply_game_mode(app_id, mode);

        let stay_awake = self.pref("stay awake", || self.prefs.stay_awake(), false);
        let allowlist = self.pref("battery allowlist", || self.prefs.battery_allowlist(), true);
        self.set_stay_awake(stay_awake);
        self.set_battery_allowlisted(allowlist);

        self.ports.overlay.game_started(app_id);
        tracing::info!(app_id = %app_id, mode = %mode, "Game session active");
    }

    fn leave(&self, app_id: &str) {
        self.sessions.unregister();
        self.set_stay_awake(false);
        self.set_battery_allowlisted(false);
        self.ports.overlay.game_left();
        tracing::info!(app_id = %app_id, "Game left foreground");
    }

    fn on_overlay_command(&self, command: OverlayCommand) {
        match command {
            OverlayCommand::ToggleHeadsUp => {
                let result = retry_once("toggle heads-up", || {
                    let enabled = !self.system.heads_up()?;
                    self.system.set_heads_up(enabled)?;
                    Ok(enabled)
                });
                match result {
                    Ok(enabled) => tracing::info!(enabled, "Heads-up toggled"),
                    Err(e) => tracing::warn!(error = %e, "Failed to toggle heads-up"),
                }
            }
            OverlayCommand::ToggleStayAwake => {
                let result = retry_once("toggle stay awake", || {
                    let stay_awake = !self.prefs.stay_awake()?;
                    self.prefs.set_stay_awake(stay_awake)?;
                    Ok(stay_awake)
                });
                match result {
                    Ok(stay_awake) => {
                        if self.state.is_active() {
                            self.set_stay_awake(stay_awake);
                        }
                        tracing::info!(stay_awake, "Stay awake toggled");
                    }
                    Err(e) => tracing::warn!(error = %e, "Failed to toggle stay awake"),
                }
            }
            OverlayCommand::CycleGameMode => {
                let Some(app_id) = self.state.active_app().map(str::to_string) else {
                    tracing::debug!("Game mode change with no active game");
                    return;
                };
                let result = retry_once("cycle game mode", || {
                    let current = self
                        .system
                        .managed_app(&app_id)?
                        .map(|app| app.preferred_mode)
                        .unwrap_or_default();
                    self.system.set_mode_for(&app_id, current.next())
                });
                match result {
                    Ok(app) => {
                        self.apply_game_mode(&app_id, app.preferred_mode);
                        tracing::info!(app_id = %app_id, mode = %app.preferred_mode, "Game mode changed");
                    }
                    Err(e) => tracing::warn!(app_id = %app_id, error = %e, "Failed to change game mode"),
                }
            }
        }
    }

    fn apply_mode_hint(&self, app_id: &str) {
        let use_angle = self.pref("use angle", || self.prefs.use_angle(), false);
        let hint = GameConfig::encode_list(&GameConfig::defaults(use_angle));
        if let Err(e) = self.ports.modes.apply_mode_hint(app_id, &hint) {
            tracing::warn!(app_id = %app_id, error = %e, "Failed to write mode hint");
        }
    }

    fn apply_game_mode(&self, app_id: &str, mode: GameMode) {
        if !self.ports.modes.available_modes(app_id).contains(&mode) {
            tracing::debug!(app_id = %app_id, mode = %mode, "Game mode not available for app");
            return;
        }
        if let Err(e) = self.ports.modes.set_game_mode(app_id, mode) {
            tracing::warn!(app_id = %app_id, mode = %mode, error = %e, "Failed to set game mode");
        }
    }

    fn set_stay_awake(&self, stay_awake: bool) {
        if let Err(e) = self.ports.power.set_stay_awake(stay_awake) {
            tracing::warn!(stay_awake, error = %e, "Failed to set stay awake");
        }
    }

    fn set_battery_allowlisted(&self, allowlisted: bool) {
        if let Err(e) = self.ports.power.set_battery_allowlisted(allowlisted) {
            tracing::warn!(allowlisted, error = %e, "Failed to update battery allowlist");
        }
    }

    fn pref<F>(&self, name: &str, read: F, default: bool) -> bool
    where
        F: FnMut() -> gamespace_settings::Result<bool>,
    {
        retry_once(name, read).unwrap_or_else(|e| {
            tracing::warn!(preference = name, error = %e, "Failed to read preference");
            default
        })
    }
}
