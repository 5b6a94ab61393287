//! Device-wide settings

use std::sync::Arc;

use crate::error::SettingsError;
use crate::game::{GameMode, ManagedApp};
use crate::overrides::{SettingKey, SettingValue};
use crate::store::SettingsStore;
use crate::Result;

const KEY_HEADS_UP: &str = "heads_up_notifications_enabled";
const KEY_BRIGHTNESS_MODE: &str = "screen_brightness_mode";
const KEY_THREE_FINGER_GESTURE: &str = "three_finger_gesture";
const KEY_RINGER_MODE: &str = "ringer_mode";
const KEY_GAME_LIST: &str = "gamespace_game_list";

const BRIGHTNESS_MODE_MANUAL: i32 = 0;
const BRIGHTNESS_MODE_AUTOMATIC: i32 = 1;

pub const RINGER_MODE_SILENT: i32 = 0;
pub const RINGER_MODE_VIBRATE: i32 = 1;
pub const RINGER_MODE_NORMAL: i32 = 2;

#[derive(Clone)]
pub struct SystemSettings {
    store: Arc<dyn SettingsStore>,
}

impl SystemSettings {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    pub fn heads_up(&self) -> Result<bool> {
        self.store.get_bool(KEY_HEADS_UP, true)
    }

    pub fn set_heads_up(&self, enabled: bool) -> Result<()> {
        self.store.set_bool(KEY_HEADS_UP, enabled)
    }

    pub fn auto_brightness(&self) -> Result<bool> {
        Ok(self
            .store
            .get_int(KEY_BRIGHTNESS_MODE, BRIGHTNESS_MODE_AUTOMATIC)?
            == BRIGHTNESS_MODE_AUTOMATIC)
    }

    pub fn set_auto_brightness(&self, auto: bool) -> Result<()> {
        let mode = if auto {
            BRIGHTNESS_MODE_AUTOMATIC
        } else {
            BRIGHTNESS_MODE_MANUAL
        };
        self.store.set_int(KEY_BRIGHTNESS_MODE, mode)
    }

    pub fn three_finger_gesture(&self) -> Result<bool> {
        self.store.get_bool(KEY_THREE_FINGER_GESTURE, false)
    }

    pub fn set_three_finger_gesture(&self, enabled: bool) -> Result<()> {
        self.store.set_bool(KEY_THREE_FINGER_GESTURE, enabled)
    }

    pub fn ringer_mode(&self) -> Result<i32> {
        self.store.get_int(KEY_RINGER_MODE, RINGER_MODE_NORMAL)
    }

    pub fn set_ringer_mode(&self, mode: i32) -> Result<()> {
        if !(RINGER_MODE_SILENT..=RINGER_MODE_NORMAL).contains(&mode) {
            return Err(SettingsError::InvalidValue {
                key: KEY_RINGER_MODE.to_string(),
                value: mode.to_string(),
            });
        }
        self.store.set_int(KEY_RINGER_MODE, mode)
    }

    /// Current value of an overridable setting
    pub fn read(&self, key: SettingKey) -> Result<SettingValue> {
        Ok(match key {
            SettingKey::HeadsUp => SettingValue::Bool(self.heads_up()?),
            SettingKey::AutoBrightness => SettingValue::Bool(self.auto_brightness()?),
            SettingKey::ThreeFingerGesture => SettingValue::Bool(self.three_finger_gesture()?),
            SettingKey::RingerMode => SettingValue::Int(self.ringer_mode()?),
        })
    }

    pub fn write(&self, key: SettingKey, value: SettingValue) -> Result<()> {
        match (key, value) {
            (SettingKey::HeadsUp, SettingValue::Bool(b)) => self.set_heads_up(b),
            (SettingKey::AutoBrightness, SettingValue::Bool(b)) => self.set_auto_brightness(b),
            (SettingKey::ThreeFingerGesture, SettingValue::Bool(b)) => {
                self.set_three_finger_gesture(b)
            }
            (SettingKey::RingerMode, SettingValue::Int(mode)) => self.set_ringer_mode(mode),
            (key, value) => Err(SettingsError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn managed_apps(&self) -> Result<Vec<ManagedApp>> {
        Ok(self
            .store
            .get_string(KEY_GAME_LIST)?
            .map(|raw| ManagedApp::parse_list(&raw))
            .unwrap_or_default())
    }

    pub fn set_managed_apps(&self, apps: &[ManagedApp]) -> Result<()> {
        self.store
            .set_string(KEY_GAME_LIST, &ManagedApp::join_list(apps))
    }

    pub fn managed_app(&self, app_id: &str) -> Result<Option<ManagedApp>> {
        Ok(self.managed_apps()?.into_iter().find(|a| a.id == app_id))
    }

    pub fn is_managed(&self, app_id: &str) -> Result<bool> {
        Ok(self.managed_app(app_id)?.is_some())
    }

    /// Record a new preferred mode for an app, adding it if it wasn't listed
    pub fn set_mode_for(&self, app_id: &str, mode: GameMode) -> Result<ManagedApp> {
        let entry = ManagedApp::new(app_id, mode);
        let mut apps: Vec<ManagedApp> = self
            .managed_apps()?
            .into_iter()
            .filter(|a| a.id != app_id)
            .collect();
        apps.push(entry.clone());
        self.set_managed_apps(&apps)?;
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySettingsStore;

    fn settings() -> (Arc<MemorySettingsStore>, SystemSettings) {
        let store = Arc::new(MemorySettingsStore::new());
        let system = SystemSettings::new(store.clone());
        (store, system)
    }

    #[test]
    fn test_defaults() {
        let (_, system) = settings();
        assert!(system.heads_up().unwrap());
        assert!(system.auto_brightness().unwrap());
        assert!(!system.three_finger_gesture().unwrap());
        assert_eq!(system.ringer_mode().unwrap(), RINGER_MODE_NORMAL);
        assert!(system.managed_apps().unwrap().is_empty());
    }

    #[test]
    fn test_brightness_is_stored_as_mode() {
        let (store, system) = settings();
        system.set_auto_brightness(false).unwrap();
        assert_eq!(
            store.get_string(KEY_BRIGHTNESS_MODE).unwrap().as_deref(),
            Some("0")
        );
        assert!(!system.auto_brightness().unwrap());
    }

    #[test]
    fn test_generic_read_write() {
        let (_, system) = settings();

        system
            .write(SettingKey::HeadsUp, SettingValue::Bool(false))
            .unwrap();
        assert_eq!(
            system.read(SettingKey::HeadsUp).unwrap(),
            SettingValue::Bool(false)
        );

        system
            .write(SettingKey::RingerMode, SettingValue::Int(RINGER_MODE_VIBRATE))
            .unwrap();
        assert_eq!(
            system.read(SettingKey::RingerMode).unwrap(),
            SettingValue::Int(RINGER_MODE_VIBRATE)
        );

        // Type mismatch is rejected, not coerced
        assert!(system
            .write(SettingKey::HeadsUp, SettingValue::Int(1))
            .is_err());
        assert!(system.set_ringer_mode(7).is_err());
    }

    #[test]
    fn test_set_mode_for_replaces_entry() {
        let (_, system) = settings();
        system
            .set_managed_apps(&[
                ManagedApp::new("a", GameMode::Standard),
                ManagedApp::new("b", GameMode::Battery),
            ])
            .unwrap();

        system.set_mode_for("a", GameMode::Performance).unwrap();
        system.set_mode_for("c", GameMode::Battery).unwrap();

        let apps = system.managed_apps().unwrap();
        assert_eq!(apps.len(), 3);
        assert_eq!(
            system.managed_app("a").unwrap().map(|a| a.preferred_mode),
            Some(GameMode::Performance)
        );
        assert!(system.is_managed("c").unwrap());
        assert!(!system.is_managed("d").unwrap());
    }
}
