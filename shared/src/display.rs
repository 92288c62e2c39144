//! Physical displays as reported by the windowing layer.
//!
//! Coordinates are logical (scale-independent) units, the same space the
//! windows are positioned in.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// A positioned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One physical display. Read-only; enumerated once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    pub id: String,
    pub position: Position,
    pub size: Size,
}

impl Display {
    pub fn new(id: impl Into<String>, x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            position: Position { x, y },
            size: Size { width, height },
        }
    }

    /// Bounds of the overlay window covering this display: anchored at the
    /// display origin, full width, and `trim` units shorter than the
    /// display so the overlay never reaches the bottom edge.
    pub fn overlay_bounds(&self, trim: u32) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.size.width,
            self.size.height.saturating_sub(trim),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_bounds_follow_display_origin() {
        let d = Display::new("HDMI-1", 1920, -200, 2560, 1440);
        assert_eq!(d.overlay_bounds(4), Rect::new(1920, -200, 2560, 1436));
    }

    #[test]
    fn overlay_trim_saturates() {
        let d = Display::new("tiny", 0, 0, 10, 3);
        assert_eq!(d.overlay_bounds(4).height, 0);
    }
}
