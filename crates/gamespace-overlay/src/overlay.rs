//! Overlay shell
//!
//! Owns the positioner and the window state (attached, expanded, dragging)
//! and renders an [`OverlayView`] after every change. Lives on the UI thread.

use std::sync::Arc;
use std::time::Instant;

use crate::geometry::{Anchor, DisplayMetrics, DockSide};
use crate::ports::{
    ActionSink, FrameRateSource, OverlayCommand, OverlayStore, OverlayWindow, ScreenCapture,
};
use crate::positioner::{OverlayPositioner, PositionerConfig, PositionerEvent};
use crate::signal::{OverlayInbox, OverlayMessage};

/// Default distance below the top inset before the first drag
const DEFAULT_INITIAL_OFFSET_DP: f32 = 8.0;

/// What the window should currently show
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayView {
    pub visible: bool,
    pub anchor: Anchor,
    pub side: DockSide,
    pub expanded: bool,
    pub dragging: bool,
    pub recorder_available: bool,
    pub recording: bool,
    /// Frame rate shown on the collapsed handle in place of the arrow
    pub fps: Option<f32>,
}

pub struct Overlay {
    window: Arc<dyn OverlayWindow>,
    store: Arc<dyn OverlayStore>,
    actions: Arc<dyn ActionSink>,
    capture: Option<Arc<dyn ScreenCapture>>,
    frame_rate: Option<Arc<dyn FrameRateSource>>,
    positioner: OverlayPositioner,
    initial_offset_dp: f32,
    app_id: Option<String>,
    attached: bool,
    visible: bool,
    expanded: bool,
    dragging: bool,
    show_fps: bool,
    fps_bound: bool,
}

impl Overlay {
    pub fn new(
        config: PositionerConfig,
        metrics: DisplayMetrics,
        window: Arc<dyn OverlayWindow>,
        store: Arc<dyn OverlayStore>,
        actions: Arc<dyn ActionSink>,
    ) -> Self {
        Self {
            window,
            store,
            actions,
            capture: None,
            frame_rate: None,
            positioner: OverlayPositioner::new(config, metrics),
            initial_offset_dp: DEFAULT_INITIAL_OFFSET_DP,
            app_id: None,
            attached: false,
            visible: false,
            expanded: false,
            dragging: false,
            show_fps: false,
            fps_bound: false,
        }
    }

    pub fn with_capture(mut self, capture: Arc<dyn ScreenCapture>) -> Self {
        self.capture = Some(capture);
        self
    }

    pub fn with_frame_rate(mut self, source: Arc<dyn FrameRateSource>) -> Self {
        self.frame_rate = Some(source);
        self
    }

    pub fn with_initial_offset_dp(mut self, offset_dp: f32) -> Self {
        self.initial_offset_dp = offset_dp;
        self
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn anchor(&self) -> Anchor {
        self.positioner.anchor()
    }

    pub fn view(&self) -> OverlayView {
        let anchor = self.positioner.anchor();
        let recorder = self.capture.as_ref().filter(|c| c.recorder_available());
        OverlayView {
            visible: self.attached && self.visible,
            anchor,
            side: anchor.side(),
            expanded: self.expanded,
            dragging: self.dragging,
            recorder_available: recorder.is_some(),
            recording: recorder.map(|c| c.is_recording()).unwrap_or(false),
            fps: self.current_fps(),
        }
    }

    /// Show the overlay for a game: attach, restore the docked anchor, collapse
    pub fn start(&mut self) {
        if !self.attached {
            self.window.attach();
            self.attached = true;
        }

        let anchor = match self.store.load_anchor() {
            Ok(Some(anchor)) => anchor,
            Ok(None) => self.default_anchor(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load overlay position, using default");
                self.default_anchor()
            }
        };
        let anchor = self.positioner.place(anchor);

        self.visible = true;
        self.expanded = false;
        self.dragging = false;
        self.show_fps = self.fps_enabled();
        self.update_frame_rate_binding();
        self.render();

        tracing::info!(x = anchor.x, y = anchor.y, "Overlay started");
    }

    pub fn stop(&mut self) {
        // A drag cut short still docks and is remembered
        let event = self.positioner.on_touch_cancel();
        self.handle_positioner(event);
        self.dragging = false;
        self.expanded = false;
        self.visible = false;
        self.update_frame_rate_binding();

        if self.attached {
            self.window.detach();
            self.attached = false;
            tracing::info!("Overlay stopped");
        }
    }

    pub fn expand(&mut self) {
        self.set_expanded(true);
    }

    pub fn collapse(&mut self) {
        self.set_expanded(false);
    }

    pub fn toggle_expanded(&mut self) {
        self.set_expanded(!self.expanded);
    }

    /// Bar height changes with expansion; keeps the clamp honest
    pub fn set_overlay_height(&mut self, height: i32) {
        self.positioner.set_overlay_height(height);
    }

    pub fn on_metrics_changed(&mut self, metrics: DisplayMetrics) {
        self.positioner.set_metrics(metrics);
        self.render();
    }

    pub fn on_touch_down(&mut self, screen_x: f32, screen_y: f32, now: Instant) {
        if self.attached {
            self.positioner.on_touch_down(screen_x, screen_y, now);
        }
    }

    pub fn on_touch_move(&mut self, screen_x: f32, screen_y: f32) {
        let event = self.positioner.on_touch_move(screen_x, screen_y);
        self.handle_positioner(event);
    }

    pub fn on_touch_up(&mut self, now: Instant) {
        let event = self.positioner.on_touch_up(now);
        self.handle_positioner(event);
    }

    pub fn on_touch_cancel(&mut self) {
        let event = self.positioner.on_touch_cancel();
        self.handle_positioner(event);
    }

    /// Drive the long-press timer from the UI loop
    pub fn poll(&mut self, now: Instant) {
        let event = self.positioner.poll(now);
        self.handle_positioner(event);
    }

    pub fn long_press_deadline(&self) -> Option<Instant> {
        self.positioner.long_press_deadline()
    }

    /// Re-render after the frame rate source reported a new sample
    pub fn on_frame_rate_sample(&mut self) {
        if self.fps_bound {
            self.render();
        }
    }

    /// Hide, capture, then come back collapsed
    pub fn take_screenshot(&mut self) {
        let Some(capture) = self.capture.clone() else {
            tracing::debug!("No screen capture available");
            return;
        };

        self.visible = false;
        self.render();

        if let Err(e) = capture.take_screenshot() {
            tracing::warn!(error = %e, "Screenshot failed");
        }

        self.expanded = false;
        self.visible = true;
        self.render();
    }

    pub fn toggle_recording(&mut self) {
        let Some(recorder) = self.capture.clone().filter(|c| c.recorder_available()) else {
            return;
        };
        if recorder.is_starting() {
            return;
        }

        let result = if recorder.is_recording() {
            recorder.stop_recording()
        } else {
            recorder.start_recording()
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to toggle screen recording");
        }

        self.expanded = false;
        self.render();
    }

    /// Settings buttons go to the session sequence, never applied inline
    pub fn press(&self, command: OverlayCommand) {
        tracing::debug!(command = ?command, "Overlay action");
        self.actions.dispatch(command);
    }

    pub fn handle_message(&mut self, message: OverlayMessage) {
        match message {
            OverlayMessage::GameStarted(app_id) => {
                tracing::debug!(app_id = %app_id, "Game started, showing overlay");
                if self.app_id.as_deref() != Some(app_id.as_str()) {
                    // Frame rate listener follows the focused game
                    self.unbind_frame_rate();
                }
                self.app_id = Some(app_id);
                self.start();
            }
            OverlayMessage::GameLeft => {
                self.stop();
                self.app_id = None;
            }
        }
    }

    /// Apply everything the controller sent since the last call
    pub fn pump(&mut self, inbox: &mut OverlayInbox) {
        for message in inbox.drain() {
            self.handle_message(message);
        }
    }

    fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
        if !expanded {
            self.show_fps = self.fps_enabled();
        }
        self.update_frame_rate_binding();
        self.render();
    }

    fn fps_enabled(&self) -> bool {
        if self.frame_rate.is_none() {
            return false;
        }
        self.store.show_fps().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read frame rate preference");
            false
        })
    }

    fn current_fps(&self) -> Option<f32> {
        if !self.fps_bound || self.expanded {
            return None;
        }
        self.frame_rate.as_ref().and_then(|source| source.latest())
    }

    /// Listen only while the collapsed handle is on screen with the readout enabled
    fn update_frame_rate_binding(&mut self) {
        let wanted = self.attached && self.visible && !self.expanded && self.show_fps;
        if !wanted {
            self.unbind_frame_rate();
            return;
        }
        if self.fps_bound {
            return;
        }

        let (Some(source), Some(app_id)) = (self.frame_rate.as_ref(), self.app_id.as_deref())
        else {
            return;
        };
        match source.bind(app_id) {
            Ok(()) => {
                self.fps_bound = true;
                tracing::debug!(app_id = %app_id, "Frame rate listener bound");
            }
            Err(e) => tracing::warn!(error = %e, "Failed to bind frame rate listener"),
        }
    }

    fn unbind_frame_rate(&mut self) {
        if !self.fps_bound {
            return;
        }
        if let Some(source) = &self.frame_rate {
            source.unbind();
        }
        self.fps_bound = false;
    }

    fn handle_positioner(&mut self, event: Option<PositionerEvent>) {
        let Some(event) = event else { return };

        match event {
            PositionerEvent::PositionChanged(_) => {
                self.dragging = true;
                self.render();
            }
            PositionerEvent::DragComplete(anchor) => {
                self.dragging = false;
                if let Err(e) = self.store.save_anchor(anchor) {
                    tracing::warn!(error = %e, "Failed to save overlay position");
                }
                self.render();
            }
            PositionerEvent::Click => self.toggle_expanded(),
            PositionerEvent::LongPress => tracing::debug!("Overlay long press"),
        }
    }

    fn default_anchor(&self) -> Anchor {
        let metrics = self.positioner.metrics();
        Anchor::new(
            metrics.half_width(),
            metrics.top_inset + metrics.dp(self.initial_offset_dp),
        )
    }

    fn render(&self) {
        if self.attached {
            self.window.render(&self.view());
        }
    }
}
