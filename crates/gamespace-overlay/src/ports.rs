//! Collaborators the overlay talks to

use gamespace_settings::AppPreferences;

use crate::geometry::Anchor;
use crate::overlay::OverlayView;
use crate::Result;

/// The floating window itself
pub trait OverlayWindow: Send + Sync {
    fn attach(&self);
    fn detach(&self);
    fn render(&self, view: &OverlayView);
}

/// Screenshot and screen recording integration
pub trait ScreenCapture: Send + Sync {
    fn take_screenshot(&self) -> Result<()>;

    /// Whether a recorder exists at all
    fn recorder_available(&self) -> bool {
        false
    }

    fn is_recording(&self) -> bool {
        false
    }

    /// A recording has been requested but not started yet
    fn is_starting(&self) -> bool {
        false
    }

    fn start_recording(&self) -> Result<()> {
        Ok(())
    }

    fn stop_recording(&self) -> Result<()> {
        Ok(())
    }
}

/// Live frame rate of the focused game
pub trait FrameRateSource: Send + Sync {
    /// Start sampling the given app's surface
    fn bind(&self, app_id: &str) -> Result<()>;
    fn unbind(&self);
    /// Most recent sample, `None` before the first report
    fn latest(&self) -> Option<f32>;
}

/// Overlay preferences remembered between sessions
pub trait OverlayStore: Send + Sync {
    fn load_anchor(&self) -> Result<Option<Anchor>>;
    fn save_anchor(&self, anchor: Anchor) -> Result<()>;

    fn show_fps(&self) -> Result<bool> {
        Ok(false)
    }
}

impl OverlayStore for AppPreferences {
    fn load_anchor(&self) -> Result<Option<Anchor>> {
        Ok(self.overlay_position()?.map(|(x, y)| Anchor::new(x, y)))
    }

    fn save_anchor(&self, anchor: Anchor) -> Result<()> {
        Ok(self.set_overlay_position(anchor.x, anchor.y)?)
    }

    fn show_fps(&self) -> Result<bool> {
        Ok(AppPreferences::show_fps(self)?)
    }
}

/// Overlay buttons that change settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayCommand {
    ToggleHeadsUp,
    ToggleStayAwake,
    CycleGameMode,
}

/// Receives overlay commands on the session sequence
pub trait ActionSink: Send + Sync {
    fn dispatch(&self, command: OverlayCommand);
}

/// Controller-side view of the overlay
pub trait OverlaySignal: Send + Sync {
    fn game_started(&self, app_id: &str);
    fn game_left(&self);
}
