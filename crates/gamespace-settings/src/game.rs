//! Managed apps and game modes
//!
//! The managed app list is stored as one string: `id=mode` pairs joined
//! by `;`. Mode intervention hints are `key=value` lists, one per mode,
//! joined by `:`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Standard,
    Performance,
    Battery,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Standard, GameMode::Performance, GameMode::Battery];

    /// Numeric value understood by the platform game manager
    pub fn as_int(&self) -> i32 {
        match self {
            GameMode::Standard => 1,
            GameMode::Performance => 2,
            GameMode::Battery => 3,
        }
    }

    pub fn from_int(value: i32) -> Option<Self> {
        match value {
            1 => Some(GameMode::Standard),
            2 => Some(GameMode::Performance),
            3 => Some(GameMode::Battery),
            _ => None,
        }
    }

    /// Next mode in the overlay's cycle order
    pub fn next(&self) -> Self {
        match self {
            GameMode::Standard => GameMode::Performance,
            GameMode::Performance => GameMode::Battery,
            GameMode::Battery => GameMode::Standard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Standard => "standard",
            GameMode::Performance => "performance",
            GameMode::Battery => "battery",
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An application the user opted into game tracking for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedApp {
    /// Opaque application identifier
    pub id: String,
    pub preferred_mode: GameMode,
}

impl ManagedApp {
    pub fn new(id: impl Into<String>, preferred_mode: GameMode) -> Self {
        Self {
            id: id.into(),
            preferred_mode,
        }
    }

    /// Parse one `id=mode` entry. A missing or unknown mode reads as Standard.
    pub fn parse(entry: &str) -> Option<Self> {
        let entry = entry.trim();
        if entry.is_empty() {
            return None;
        }

        let parts: Vec<&str> = entry.split('=').collect();
        if let [id, mode] = parts.as_slice() {
            if id.is_empty() {
                return None;
            }
            let preferred_mode = mode
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(GameMode::from_int)
                .unwrap_or_else(|| {
                    tracing::warn!(entry, "Unknown game mode in managed app list");
                    GameMode::default()
                });
            return Some(Self::new(*id, preferred_mode));
        }

        Some(Self::new(entry, GameMode::default()))
    }

    /// Parse the whole stored list, keeping the first entry for each id
    pub fn parse_list(raw: &str) -> Vec<Self> {
        let mut apps: Vec<Self> = Vec::new();
        for app in raw.split(';').filter_map(Self::parse) {
            if !apps.iter().any(|a| a.id == app.id) {
                apps.push(app);
            }
        }
        apps
    }

    pub fn join_list(apps: &[Self]) -> String {
        apps.iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl std::fmt::Display for ManagedApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.id, self.preferred_mode.as_int())
    }
}

/// Per-mode intervention written to the device config for a game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub mode: GameMode,
    pub downscale_factor: f32,
    pub use_angle: bool,
}

impl GameConfig {
    pub fn new(mode: GameMode, downscale_factor: f32, use_angle: bool) -> Self {
        Self {
            mode,
            downscale_factor,
            use_angle,
        }
    }

    /// Performance and battery interventions offered for every managed app
    pub fn defaults(use_angle: bool) -> Vec<Self> {
        vec![
            Self::new(GameMode::Performance, 0.7, use_angle),
            Self::new(GameMode::Battery, 0.8, use_angle),
        ]
    }

    /// Encode a list as the opaque hint string
    pub fn encode_list(configs: &[Self]) -> String {
        configs
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(":")
    }
}

impl std::fmt::Display for GameConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mode={},downscaleFactor={:.1}",
            self.mode.as_int(),
            self.downscale_factor
        )?;
        // Left out when off; the game may already use ANGLE on its own
        if self.use_angle {
            write!(f, ",useAngle=true")?;
        }
        Ok(())
    }
}
