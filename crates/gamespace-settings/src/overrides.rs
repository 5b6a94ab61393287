//! Settings a game session may override
//!
//! The set of overridable settings is a list, not a fixed struct: each
//! rule pairs a setting with the value forced while a game is in front.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    HeadsUp,
    AutoBrightness,
    ThreeFingerGesture,
    RingerMode,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::HeadsUp => "heads_up",
            SettingKey::AutoBrightness => "auto_brightness",
            SettingKey::ThreeFingerGesture => "three_finger_gesture",
            SettingKey::RingerMode => "ringer_mode",
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i32),
}

impl SettingValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            SettingValue::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            SettingValue::Int(i) => Some(*i),
            SettingValue::Bool(_) => None,
        }
    }
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Int(i) => write!(f, "{}", i),
        }
    }
}

/// One override applied for the duration of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideRule {
    pub key: SettingKey,
    pub target: SettingValue,
}

impl OverrideRule {
    pub fn new(key: SettingKey, target: SettingValue) -> Self {
        Self { key, target }
    }
}
