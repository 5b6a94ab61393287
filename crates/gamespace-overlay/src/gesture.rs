//! Drag gesture state
//!
//! One value per touch sequence, created on touch-down and consumed on
//! touch-up or cancel. Transitions are plain methods with no side effects so
//! tap, long-press and drag disambiguation can be tested directly.

use crate::geometry::Anchor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    pub start_screen_x: f32,
    pub start_screen_y: f32,
    pub start_anchor_x: i32,
    pub start_anchor_y: i32,
    pub moving: bool,
    pub long_press_fired: bool,
}

/// How a gesture ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEnd {
    Click,
    Drag,
    /// Long press already handled the gesture
    Consumed,
}

impl DragGesture {
    pub fn begin(screen_x: f32, screen_y: f32, anchor: Anchor) -> Self {
        Self {
            start_screen_x: screen_x,
            start_screen_y: screen_y,
            start_anchor_x: anchor.x,
            start_anchor_y: anchor.y,
            moving: false,
            long_press_fired: false,
        }
    }

    /// New anchor if this move drags, `None` while inside the slop or after a long press
    pub fn on_move(&mut self, screen_x: f32, screen_y: f32, slop: f32) -> Option<Anchor> {
        if self.long_press_fired {
            return None;
        }

        let dx = screen_x - self.start_screen_x;
        let dy = screen_y - self.start_screen_y;
        if !self.moving && dx.hypot(dy) <= slop {
            return None;
        }

        self.moving = true;
        Some(Anchor::new(
            self.start_anchor_x + dx as i32,
            self.start_anchor_y + dy as i32,
        ))
    }

    /// Returns true if the long press fires now
    pub fn on_long_press(&mut self) -> bool {
        if self.moving || self.long_press_fired {
            return false;
        }
        self.long_press_fired = true;
        true
    }

    pub fn finish(self) -> GestureEnd {
        if self.long_press_fired {
            GestureEnd::Consumed
        } else if self.moving {
            GestureEnd::Drag
        } else {
            GestureEnd::Click
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLOP: f32 = 8.0;

    #[test]
    fn test_small_wiggle_is_a_click() {
        let mut g = DragGesture::begin(100.0, 100.0, Anchor::new(540, 300));
        assert_eq!(g.on_move(103.0, 104.0, SLOP), None);
        assert_eq!(g.on_move(105.0, 102.0, SLOP), None);
        assert!(!g.moving);
        assert_eq!(g.finish(), GestureEnd::Click);
    }

    #[test]
    fn test_past_slop_drags_from_start_anchor() {
        let mut g = DragGesture::begin(100.0, 100.0, Anchor::new(540, 300));
        assert_eq!(g.on_move(80.0, 130.0, SLOP), Some(Anchor::new(520, 330)));
        // Once moving, even a return inside the slop keeps tracking
        assert_eq!(g.on_move(101.0, 100.0, SLOP), Some(Anchor::new(541, 300)));
        assert_eq!(g.finish(), GestureEnd::Drag);
    }

    #[test]
    fn test_long_press_blocks_drag() {
        let mut g = DragGesture::begin(0.0, 0.0, Anchor::default());
        assert!(g.on_long_press());
        assert!(!g.on_long_press());
        assert_eq!(g.on_move(200.0, 200.0, SLOP), None);
        assert_eq!(g.finish(), GestureEnd::Consumed);
    }

    #[test]
    fn test_long_press_ignored_once_dragging() {
        let mut g = DragGesture::begin(0.0, 0.0, Anchor::default());
        g.on_move(50.0, 0.0, SLOP);
        assert!(!g.on_long_press());
        assert_eq!(g.finish(), GestureEnd::Drag);
    }
}
