//! Screen geometry for the overlay
//!
//! The anchor is horizontally relative to the screen centre (top gravity),
//! so the two docked positions are `-width/2` and `+width/2`. Vertically it
//! is measured from the top of the screen.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

impl Anchor {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Side the anchor docks to. Zero counts as the right edge.
    pub fn side(&self) -> DockSide {
        if self.x < 0 {
            DockSide::Left
        } else {
            DockSide::Right
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    pub width: i32,
    pub height: i32,
    /// Status bar / cutout inset
    pub top_inset: i32,
    /// Navigation bar inset
    pub bottom_inset: i32,
    /// Pixels per dp
    pub density: f32,
}

impl DisplayMetrics {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            top_inset: 0,
            bottom_inset: 0,
            density: 1.0,
        }
    }

    pub fn with_insets(mut self, top: i32, bottom: i32) -> Self {
        self.top_inset = top;
        self.bottom_inset = bottom;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn half_width(&self) -> i32 {
        self.width / 2
    }

    pub fn dp(&self, value: f32) -> i32 {
        (value * self.density).round() as i32
    }

    pub fn safe_area(&self, margin: i32) -> SafeArea {
        SafeArea {
            top: self.top_inset + margin,
            bottom: self.height - self.bottom_inset - margin,
        }
    }

    /// Snap to the nearest horizontal edge and clamp into the safe area
    pub fn dock(&self, anchor: Anchor, margin: i32, overlay_height: i32) -> Anchor {
        let x = match anchor.side() {
            DockSide::Left => -self.half_width(),
            DockSide::Right => self.half_width(),
        };
        Anchor::new(x, self.safe_area(margin).clamp_y(anchor.y, overlay_height))
    }
}

/// Vertical band excluding system bars plus a margin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeArea {
    pub top: i32,
    pub bottom: i32,
}

impl SafeArea {
    /// Highest y the overlay's top edge may take; never above `top`
    pub fn max_y(&self, overlay_height: i32) -> i32 {
        (self.bottom - overlay_height).max(self.top)
    }

    pub fn clamp_y(&self, y: i32, overlay_height: i32) -> i32 {
        y.clamp(self.top, self.max_y(overlay_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> DisplayMetrics {
        DisplayMetrics::new(1080, 2400).with_insets(100, 50)
    }

    #[test]
    fn test_dock_by_sign() {
        let m = phone();
        assert_eq!(m.dock(Anchor::new(10, 500), 4, 80).x, 540);
        assert_eq!(m.dock(Anchor::new(-10, 500), 4, 80).x, -540);
        assert_eq!(m.dock(Anchor::new(0, 500), 4, 80).x, 540);
        assert_eq!(m.dock(Anchor::new(-900, 500), 4, 80).x, -540);
    }

    #[test]
    fn test_clamp_into_safe_area() {
        let m = phone();
        let area = m.safe_area(4);
        assert_eq!(area, SafeArea { top: 104, bottom: 2346 });

        assert_eq!(m.dock(Anchor::new(1, 0), 4, 80).y, 104);
        assert_eq!(m.dock(Anchor::new(1, 5000), 4, 80).y, 2266);
        assert_eq!(m.dock(Anchor::new(1, 1200), 4, 80).y, 1200);
        assert_eq!(m.dock(Anchor::new(1, 2266), 4, 80).y, 2266);
    }

    #[test]
    fn test_tiny_display_clamps_to_top() {
        let m = DisplayMetrics::new(300, 200).with_insets(80, 60);
        let area = m.safe_area(4);
        assert!(area.top > area.bottom - 100);
        assert_eq!(area.max_y(100), area.top);
        assert_eq!(m.dock(Anchor::new(5, 0), 4, 100).y, 84);
        assert_eq!(m.dock(Anchor::new(5, 190), 4, 100).y, 84);
    }

    #[test]
    fn test_dp_conversion() {
        let m = phone().with_density(2.75);
        assert_eq!(m.dp(4.0), 11);
        assert_eq!(m.dp(8.0), 22);
    }
}
