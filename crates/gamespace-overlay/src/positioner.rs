//! Overlay Positioner
//!
//! Owns the overlay anchor and turns raw touch input into positioner events.
//! No I/O: the caller supplies display metrics and timestamps, and reacts to
//! the returned events (moving the window, persisting the docked anchor).

use std::time::{Duration, Instant};

use crate::geometry::{Anchor, DisplayMetrics};
use crate::gesture::{DragGesture, GestureEnd};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionerConfig {
    pub touch_slop_dp: f32,
    pub long_press_timeout: Duration,
    pub safe_margin_dp: f32,
}

impl Default for PositionerConfig {
    fn default() -> Self {
        Self {
            touch_slop_dp: 8.0,
            long_press_timeout: Duration::from_millis(400),
            safe_margin_dp: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionerEvent {
    /// Anchor moved during a drag
    PositionChanged(Anchor),
    /// Drag released; the anchor is already docked and clamped
    DragComplete(Anchor),
    Click,
    LongPress,
}

pub struct OverlayPositioner {
    config: PositionerConfig,
    metrics: DisplayMetrics,
    anchor: Anchor,
    overlay_height: i32,
    gesture: Option<DragGesture>,
    long_press_deadline: Option<Instant>,
}

impl OverlayPositioner {
    pub fn new(config: PositionerConfig, metrics: DisplayMetrics) -> Self {
        Self {
            config,
            metrics,
            anchor: Anchor::default(),
            overlay_height: 0,
            gesture: None,
            long_press_deadline: None,
        }
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn metrics(&self) -> DisplayMetrics {
        self.metrics
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.map(|g| g.moving).unwrap_or(false)
    }

    /// When the host should call [`poll`](Self::poll) to fire a long press
    pub fn long_press_deadline(&self) -> Option<Instant> {
        self.long_press_deadline
    }

    pub fn set_overlay_height(&mut self, height: i32) {
        self.overlay_height = height.max(0);
    }

    /// Place the anchor without a gesture, docked
    pub fn place(&mut self, anchor: Anchor) -> Anchor {
        self.anchor = self.docked(anchor);
        self.anchor
    }

    /// New display bounds (rotation, resize); re-docks the current anchor
    pub fn set_metrics(&mut self, metrics: DisplayMetrics) -> Anchor {
        self.metrics = metrics;
        self.place(self.anchor)
    }

    pub fn on_touch_down(&mut self, screen_x: f32, screen_y: f32, now: Instant) {
        self.gesture = Some(DragGesture::begin(screen_x, screen_y, self.anchor));
        self.long_press_deadline = Some(now + self.config.long_press_timeout);
    }

    pub fn on_touch_move(&mut self, screen_x: f32, screen_y: f32) -> Option<PositionerEvent> {
        let slop = self.metrics.density * self.config.touch_slop_dp;
        let gesture = self.gesture.as_mut()?;
        let anchor = gesture.on_move(screen_x, screen_y, slop)?;

        self.long_press_deadline = None;
        self.anchor = anchor;
        Some(PositionerEvent::PositionChanged(anchor))
    }

    /// Release. A hold that outlived the long-press deadline never counts as
    /// a click, even if the host timer has not fired yet.
    pub fn on_touch_up(&mut self, now: Instant) -> Option<PositionerEvent> {
        let overdue = self.long_press_deadline.is_some_and(|deadline| now >= deadline);
        self.long_press_deadline = None;
        let mut gesture = self.gesture.take()?;
        if overdue && gesture.on_long_press() {
            return Some(PositionerEvent::LongPress);
        }
        match gesture.finish() {
            GestureEnd::Click => Some(PositionerEvent::Click),
            GestureEnd::Drag => Some(self.complete_drag()),
            GestureEnd::Consumed => None,
        }
    }

    /// Gesture aborted by the system. A drag in progress still docks.
    pub fn on_touch_cancel(&mut self) -> Option<PositionerEvent> {
        self.long_press_deadline = None;
        match self.gesture.take()?.finish() {
            GestureEnd::Drag => Some(self.complete_drag()),
            GestureEnd::Click | GestureEnd::Consumed => None,
        }
    }

    /// Long-press timer expiry
    pub fn on_long_press_timeout(&mut self) -> Option<PositionerEvent> {
        self.long_press_deadline = None;
        let gesture = self.gesture.as_mut()?;
        gesture
            .on_long_press()
            .then_some(PositionerEvent::LongPress)
    }

    /// Fire the long press if its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<PositionerEvent> {
        match self.long_press_deadline {
            Some(deadline) if now >= deadline => self.on_long_press_timeout(),
            _ => None,
        }
    }

    fn complete_drag(&mut self) -> PositionerEvent {
        self.anchor = self.docked(self.anchor);
        PositionerEvent::DragComplete(self.anchor)
    }

    fn docked(&self, anchor: Anchor) -> Anchor {
        let margin = self.metrics.dp(self.config.safe_margin_dp);
        self.metrics.dock(anchor, margin, self.overlay_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positioner() -> OverlayPositioner {
        let metrics = DisplayMetrics::new(1080, 2400).with_insets(100, 50);
        let mut p = OverlayPositioner::new(PositionerConfig::default(), metrics);
        p.set_overlay_height(80);
        p.place(Anchor::new(540, 500));
        p
    }

    #[test]
    fn test_tap_is_click() {
        let mut p = positioner();
        let t0 = Instant::now();
        p.on_touch_down(540.0, 520.0, t0);
        assert_eq!(p.on_touch_move(543.0, 522.0), None);
        assert_eq!(p.poll(t0 + Duration::from_millis(100)), None);
        assert_eq!(
            p.on_touch_up(t0 + Duration::from_millis(150)),
            Some(PositionerEvent::Click)
        );
        assert_eq!(p.anchor(), Anchor::new(540, 500));
    }

    #[test]
    fn test_drag_left_docks_left() {
        let mut p = positioner();
        p.on_touch_down(1000.0, 520.0, Instant::now());

        assert_eq!(
            p.on_touch_move(900.0, 620.0),
            Some(PositionerEvent::PositionChanged(Anchor::new(440, 600)))
        );
        assert!(p.is_dragging());
        assert_eq!(p.long_press_deadline(), None);

        p.on_touch_move(-200.0, 820.0);
        assert_eq!(p.anchor(), Anchor::new(-660, 800));

        assert_eq!(
            p.on_touch_up(Instant::now()),
            Some(PositionerEvent::DragComplete(Anchor::new(-540, 800)))
        );
        assert!(!p.is_dragging());
    }

    #[test]
    fn test_drag_ending_at_zero_docks_right() {
        let mut p = positioner();
        p.on_touch_down(540.0, 520.0, Instant::now());
        p.on_touch_move(0.0, 520.0);
        assert_eq!(p.anchor().x, 0);
        assert_eq!(
            p.on_touch_up(Instant::now()),
            Some(PositionerEvent::DragComplete(Anchor::new(540, 500)))
        );
    }

    #[test]
    fn test_drag_clamps_vertically() {
        let mut p = positioner();
        p.on_touch_down(540.0, 520.0, Instant::now());
        p.on_touch_move(540.0, -3000.0);
        assert_eq!(
            p.on_touch_up(Instant::now()),
            Some(PositionerEvent::DragComplete(Anchor::new(540, 104)))
        );

        p.on_touch_down(540.0, 120.0, Instant::now());
        p.on_touch_move(540.0, 9000.0);
        assert_eq!(
            p.on_touch_up(Instant::now()),
            Some(PositionerEvent::DragComplete(Anchor::new(540, 2266)))
        );
    }

    #[test]
    fn test_long_press_then_moves_ignored() {
        let mut p = positioner();
        let t0 = Instant::now();
        p.on_touch_down(540.0, 520.0, t0);
        assert_eq!(p.poll(t0 + Duration::from_millis(399)), None);
        assert_eq!(
            p.poll(t0 + Duration::from_millis(400)),
            Some(PositionerEvent::LongPress)
        );
        assert_eq!(p.poll(t0 + Duration::from_millis(800)), None);

        assert_eq!(p.on_touch_move(100.0, 100.0), None);
        assert_eq!(p.on_touch_up(Instant::now()), None);
        assert_eq!(p.anchor(), Anchor::new(540, 500));

        // Next gesture starts clean
        p.on_touch_down(540.0, 520.0, t0);
        assert_eq!(p.on_touch_up(t0), Some(PositionerEvent::Click));
    }

    #[test]
    fn test_hold_past_timeout_without_poll_is_long_press() {
        let mut p = positioner();
        let t0 = Instant::now();
        p.on_touch_down(540.0, 520.0, t0);
        assert_eq!(
            p.on_touch_up(t0 + Duration::from_millis(500)),
            Some(PositionerEvent::LongPress)
        );
        assert_eq!(p.long_press_deadline(), None);
        assert_eq!(p.anchor(), Anchor::new(540, 500));
    }

    #[test]
    fn test_slow_drag_still_docks() {
        let mut p = positioner();
        let t0 = Instant::now();
        p.on_touch_down(540.0, 520.0, t0);
        p.on_touch_move(100.0, 520.0);
        assert_eq!(
            p.on_touch_up(t0 + Duration::from_secs(2)),
            Some(PositionerEvent::DragComplete(Anchor::new(540, 500)))
        );
    }

    #[test]
    fn test_cancel_mid_drag_docks() {
        let mut p = positioner();
        p.on_touch_down(540.0, 520.0, Instant::now());
        p.on_touch_move(100.0, 520.0);
        assert_eq!(
            p.on_touch_cancel(),
            Some(PositionerEvent::DragComplete(Anchor::new(540, 500)))
        );

        p.on_touch_down(540.0, 520.0, Instant::now());
        assert_eq!(p.on_touch_cancel(), None);
        assert_eq!(p.on_touch_up(Instant::now()), None);
    }

    #[test]
    fn test_slop_scales_with_density() {
        let metrics = DisplayMetrics::new(1080, 2400).with_density(3.0);
        let mut p = OverlayPositioner::new(PositionerConfig::default(), metrics);
        p.on_touch_down(0.0, 0.0, Instant::now());
        // 20px is under 8dp at density 3
        assert_eq!(p.on_touch_move(20.0, 0.0), None);
        assert!(p.on_touch_move(30.0, 0.0).is_some());
    }

    #[test]
    fn test_rotation_redocks() {
        let mut p = positioner();
        p.place(Anchor::new(-540, 2000));
        let landscape = DisplayMetrics::new(2400, 1080).with_insets(0, 0);
        assert_eq!(p.set_metrics(landscape), Anchor::new(-1200, 996));
    }
}
