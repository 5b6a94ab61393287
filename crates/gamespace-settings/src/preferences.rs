//! GameSpace user preferences

use std::sync::Arc;

use crate::overrides::{OverrideRule, SettingKey, SettingValue};
use crate::store::SettingsStore;
use crate::Result;

const KEY_OFFSET_X: &str = "offset_x";
const KEY_OFFSET_Y: &str = "offset_y";
const KEY_SHOW_FPS: &str = "show_fps";
const KEY_HEADS_UP_DISABLE: &str = "gamespace_heads_up_disabled";
const KEY_AUTO_BRIGHTNESS_DISABLE: &str = "gamespace_auto_brightness_disabled";
const KEY_THREE_FINGER_DISABLE: &str = "gamespace_tfgesture_disabled";
const KEY_STAY_AWAKE: &str = "gamespace_stay_awake";
const KEY_RINGER_MODE: &str = "gamespace_ringer_mode";
const KEY_BATTERY_ALLOWLIST: &str = "gamespace_battery_allowlist";
const KEY_USE_ANGLE: &str = "gamespace_use_angle";

#[derive(Clone)]
pub struct AppPreferences {
    store: Arc<dyn SettingsStore>,
}

impl AppPreferences {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Saved overlay position, if the user ever moved it
    pub fn overlay_position(&self) -> Result<Option<(i32, i32)>> {
        let x = self.store.get_string(KEY_OFFSET_X)?;
        let y = self.store.get_string(KEY_OFFSET_Y)?;
        if x.is_none() || y.is_none() {
            return Ok(None);
        }
        Ok(Some((
            self.store.get_int(KEY_OFFSET_X, 0)?,
            self.store.get_int(KEY_OFFSET_Y, 0)?,
        )))
    }

    pub fn set_overlay_position(&self, x: i32, y: i32) -> Result<()> {
        self.store.set_int(KEY_OFFSET_X, x)?;
        self.store.set_int(KEY_OFFSET_Y, y)
    }

    /// Frame rate readout on the collapsed overlay
    pub fn show_fps(&self) -> Result<bool> {
        self.store.get_bool(KEY_SHOW_FPS, false)
    }

    pub fn set_show_fps(&self, show: bool) -> Result<()> {
        self.store.set_bool(KEY_SHOW_FPS, show)
    }

    pub fn disable_heads_up(&self) -> Result<bool> {
        self.store.get_bool(KEY_HEADS_UP_DISABLE, true)
    }

    pub fn set_disable_heads_up(&self, disable: bool) -> Result<()> {
        self.store.set_bool(KEY_HEADS_UP_DISABLE, disable)
    }

    pub fn disable_auto_brightness(&self) -> Result<bool> {
        self.store.get_bool(KEY_AUTO_BRIGHTNESS_DISABLE, true)
    }

    pub fn set_disable_auto_brightness(&self, disable: bool) -> Result<()> {
        self.store.set_bool(KEY_AUTO_BRIGHTNESS_DISABLE, disable)
    }

    pub fn disable_three_finger_gesture(&self) -> Result<bool> {
        self.store.get_bool(KEY_THREE_FINGER_DISABLE, false)
    }

    pub fn set_disable_three_finger_gesture(&self, disable: bool) -> Result<()> {
        self.store.set_bool(KEY_THREE_FINGER_DISABLE, disable)
    }

    pub fn stay_awake(&self) -> Result<bool> {
        self.store.get_bool(KEY_STAY_AWAKE, false)
    }

    pub fn set_stay_awake(&self, stay_awake: bool) -> Result<()> {
        self.store.set_bool(KEY_STAY_AWAKE, stay_awake)
    }

    /// Ringer mode forced during a session. `None` leaves the ringer alone.
    pub fn ringer_mode(&self) -> Result<Option<i32>> {
        let mode = self.store.get_int(KEY_RINGER_MODE, -1)?;
        Ok((mode >= 0).then_some(mode))
    }

    pub fn set_ringer_mode(&self, mode: Option<i32>) -> Result<()> {
        self.store.set_int(KEY_RINGER_MODE, mode.unwrap_or(-1))
    }

    pub fn battery_allowlist(&self) -> Result<bool> {
        self.store.get_bool(KEY_BATTERY_ALLOWLIST, true)
    }

    pub fn set_battery_allowlist(&self, enabled: bool) -> Result<()> {
        self.store.set_bool(KEY_BATTERY_ALLOWLIST, enabled)
    }

    pub fn use_angle(&self) -> Result<bool> {
        self.store.get_bool(KEY_USE_ANGLE, false)
    }

    pub fn set_use_angle(&self, use_angle: bool) -> Result<()> {
        self.store.set_bool(KEY_USE_ANGLE, use_angle)
    }

    /// Overrides enabled by the user, in application order
    pub fn override_rules(&self) -> Result<Vec<OverrideRule>> {
        let mut rules = Vec::new();
        if self.disable_heads_up()? {
            rules.push(OverrideRule::new(SettingKey::HeadsUp, SettingValue::Bool(false)));
        }
        if self.disable_auto_brightness()? {
            rules.push(OverrideRule::new(
                SettingKey::AutoBrightness,
                SettingValue::Bool(false),
            ));
        }
        if self.disable_three_finger_gesture()? {
            rules.push(OverrideRule::new(
                SettingKey::ThreeFingerGesture,
                SettingValue::Bool(false),
            ));
        }
        if let Some(mode) = self.ringer_mode()? {
            rules.push(OverrideRule::new(SettingKey::RingerMode, SettingValue::Int(mode)));
        }
        Ok(rules)
    }
}
