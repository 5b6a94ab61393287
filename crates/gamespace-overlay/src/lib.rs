//! GameSpace Overlay
//!
//! The floating control surface shown while a managed app is in front:
//! - geometry: display metrics, the vertical safe area, edge docking
//! - a drag gesture value type and the positioner that drives it
//! - the overlay shell that owns the positioner and hosts action buttons
//!
//! Everything here runs on the UI thread. Settings writes leave through
//! [`ActionSink`] and controller notifications arrive through [`OverlayInbox`].

mod error;
mod geometry;
mod gesture;
mod overlay;
mod ports;
mod positioner;
mod signal;

pub use error::OverlayError;
pub use geometry::{Anchor, DisplayMetrics, DockSide, SafeArea};
pub use gesture::{DragGesture, GestureEnd};
pub use overlay::{Overlay, OverlayView};
pub use ports::{
    ActionSink, FrameRateSource, OverlayCommand, OverlaySignal, OverlayStore, OverlayWindow,
    ScreenCapture,
};
pub use positioner::{OverlayPositioner, PositionerConfig, PositionerEvent};
pub use signal::{overlay_channel, OverlayInbox, OverlayMessage, OverlayNotifier};

pub type Result<T> = std::result::Result<T, OverlayError>;
