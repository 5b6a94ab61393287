//! Settings backends
//!
//! Values are stored as strings; booleans are the ints `1`/`0`, the way the
//! device settings provider stores them.

use parking_lot::RwLock;
use std::collections::HashMap;

use gamespace_storage::Database;

use crate::error::SettingsError;
use crate::Result;

/// Key/value settings backend
pub trait SettingsStore: Send + Sync {
    fn get_string(&self, key: &str) -> Result<Option<String>>;

    fn set_string(&self, key: &str, value: &str) -> Result<()>;

    fn get_int(&self, key: &str, default: i32) -> Result<i32> {
        match self.get_string(key)? {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidValue {
                    key: key.to_string(),
                    value: raw,
                }),
            None => Ok(default),
        }
    }

    fn set_int(&self, key: &str, value: i32) -> Result<()> {
        self.set_string(key, &value.to_string())
    }

    fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        Ok(self.get_int(key, default as i32)? != 0)
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set_int(key, value as i32)
    }
}

/// Settings kept in one namespace of the GameSpace database
#[derive(Clone)]
pub struct DatabaseSettings {
    db: Database,
    namespace: &'static str,
}

impl DatabaseSettings {
    pub const SYSTEM: &'static str = "system";
    pub const PREFERENCES: &'static str = "preferences";

    pub fn new(db: Database, namespace: &'static str) -> Self {
        Self { db, namespace }
    }

    /// Device-wide settings
    pub fn system(db: Database) -> Self {
        Self::new(db, Self::SYSTEM)
    }

    /// The user's GameSpace preferences
    pub fn preferences(db: Database) -> Self {
        Self::new(db, Self::PREFERENCES)
    }
}

impl SettingsStore for DatabaseSettings {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self.db.get_setting(self.namespace, key)?)
    }

    fn set_string(&self, key: &str, value: &str) -> Result<()> {
        Ok(self.db.set_setting(self.namespace, key, value)?)
    }
}

/// Process-local settings, for hosts without a settings provider
#[derive(Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: RwLock::new(
                values
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
