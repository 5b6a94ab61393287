//! Session data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use gamespace_settings::{SettingKey, SettingValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Correlation id for logs
    pub id: String,
    /// The managed app this session belongs to
    pub managed_app_id: String,
    /// Pre-session values, only for settings this session overrides
    #[serde(default)]
    pub saved: BTreeMap<SettingKey, SettingValue>,
    pub created_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new(managed_app_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            managed_app_id: managed_app_id.into(),
            saved: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }

    pub fn saved_value(&self, key: SettingKey) -> Option<SettingValue> {
        self.saved.get(&key).copied()
    }

    pub fn saved_heads_up(&self) -> Option<bool> {
        self.saved_value(SettingKey::HeadsUp)
            .and_then(|v| v.as_bool())
    }

    pub fn saved_auto_brightness(&self) -> Option<bool> {
        self.saved_value(SettingKey::AutoBrightness)
            .and_then(|v| v.as_bool())
    }

    pub fn saved_three_finger_gesture(&self) -> Option<bool> {
        self.saved_value(SettingKey::ThreeFingerGesture)
            .and_then(|v| v.as_bool())
    }

    pub fn saved_ringer_mode(&self) -> Option<i32> {
        self.saved_value(SettingKey::RingerMode)
            .and_then(|v| v.as_int())
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(payload: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}
