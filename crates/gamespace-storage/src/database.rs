//! Database connection and operations

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::Result;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Enable WAL mode
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    pub fn get_setting(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM settings WHERE namespace = ?1 AND key = ?2",
                    [namespace, key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    pub fn set_setting(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO settings (namespace, key, value, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![namespace, key, value, updated_at],
            )?;
            Ok(())
        })
    }

    /// Raw payload of the saved session, if one exists
    pub fn load_session_payload(&self) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let payload = conn
                .query_row(
                    "SELECT payload FROM saved_session WHERE slot = 0",
                    [],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(payload)
        })
    }

    /// Replace the saved session payload
    pub fn store_session_payload(&self, payload: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO saved_session (slot, payload, updated_at)
                 VALUES (0, ?1, ?2)",
                rusqlite::params![payload, updated_at],
            )?;
            Ok(())
        })
    }

    pub fn clear_session_payload(&self) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute("DELETE FROM saved_session", [])?;
            Ok(())
        })
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}
