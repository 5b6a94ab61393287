//! Session Manager
//!
//! Owns the snapshot/override/restore cycle. Nothing here returns an error:
//! failures degrade to "not overridden" or "not restored" and are logged.

use parking_lot::Mutex;
use std::sync::Arc;

use gamespace_settings::{retry_once, AppPreferences, OverrideRule, SystemSettings};

use crate::state::SessionState;
use crate::store::SessionStore;

#[derive(Debug, Clone, PartialEq)]
pub enum RegisterOutcome {
    /// A new session was snapshotted and its overrides applied
    Registered(SessionState),
    /// The app already owns the active session; nothing was touched
    AlreadyActive(SessionState),
}

pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    system: SystemSettings,
    prefs: AppPreferences,
    /// Mirror of the active session, used when the store lost it
    current: Arc<Mutex<Option<SessionState>>>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, system: SystemSettings, prefs: AppPreferences) -> Self {
        Self {
            store,
            system,
            prefs,
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// The active session, preferring the persisted record
    pub fn active_session(&self) -> Option<SessionState> {
        self.store.load().or_else(|| self.current.lock().clone())
    }

    pub fn active_app(&self) -> Option<String> {
        self.active_session().map(|s| s.managed_app_id)
    }

    /// Snapshot current settings for `app_id`, persist, then apply overrides
    pub fn register(&self, app_id: &str) -> RegisterOutcome {
        if let Some(existing) = self.active_session() {
            if existing.managed_app_id == app_id {
                tracing::debug!(
                    session_id = %existing.id,
                    app_id = %app_id,
                    "Session already active for app"
                );
                return RegisterOutcome::AlreadyActive(existing);
            }

            tracing::warn!(
                active_app = %existing.managed_app_id,
                requested_app = %app_id,
                "Register while another session is active, restoring it first"
            );
            self.unregister();
        }

        let rules = retry_once("read override preferences", || self.prefs.override_rules())
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to read override preferences, not overriding");
                Vec::new()
            });

        let mut state = SessionState::new(app_id);
        let mut applicable: Vec<OverrideRule> = Vec::with_capacity(rules.len());
        for rule in rules {
            // A setting we couldn't snapshot is never overridden
            match retry_once("snapshot setting", || self.system.read(rule.key)) {
                Ok(value) => {
                    state.saved.insert(rule.key, value);
                    applicable.push(rule);
                }
                Err(e) => tracing::warn!(
                    key = %rule.key,
                    error = %e,
                    "Failed to snapshot setting, leaving it untouched"
                ),
            }
        }

        if let Err(e) = self.store.save(&state) {
            tracing::warn!(
                session_id = %state.id,
                error = %e,
                "Failed to persist session, restore after a crash will be skipped"
            );
        }
        *self.current.lock() = Some(state.clone());

        for rule in &applicable {
            if let Err(e) = retry_once("apply override", || self.system.write(rule.key, rule.target)) {
                tracing::warn!(key = %rule.key, error = %e, "Failed to apply override");
            }
        }

        tracing::info!(
            session_id = %state.id,
            app_id = %app_id,
            overrides = applicable.len(),
            "Registered game session"
        );

        RegisterOutcome::Registered(state)
    }

    /// Restore the saved values and drop the session. No-op without one.
    pub fn unregister(&self) -> Option<SessionState> {
        let Some(state) = self.active_session() else {
            tracing::debug!("No active session to unregister");
            return None;
        };

        for (key, value) in &state.saved {
            if let Err(e) = retry_once("restore setting", || self.system.write(*key, *value)) {
                tracing::warn!(key = %key, error = %e, "Failed to restore setting");
            }
        }

        if let Err(e) = self.store.clear() {
            tracing::warn!(session_id = %state.id, error = %e, "Failed to clear saved session");
        }
        *self.current.lock() = None;

        tracing::info!(
            session_id = %state.id,
            app_id = %state.managed_app_id,
            "Unregistered game session"
        );

        Some(state)
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            system: self.system.clone(),
            prefs: self.prefs.clone(),
            current: Arc::clone(&self.current),
        }
    }
}
