/// Axis-aligned rectangles and playfield bounds — pure data, no logic
/// beyond the overlap test.

/// Leftmost pixel an on-screen sprite may occupy. The visible playfield is
/// 320x240 with a 32 px border on every side so sprites can slide partially
/// off the edge without wrapping.
pub const FIELD_MIN_X: i32 = 32;
pub const FIELD_MIN_Y: i32 = 32;
pub const FIELD_MAX_X: i32 = 320 + 16;
pub const FIELD_MAX_Y: i32 = 240 + 16;

/// How far inside a violated edge a clamped coordinate lands.
pub const CLAMP_MARGIN: i32 = 2;

/// Axis-aligned bounding box, top-left inclusive corner at (x1, y1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Rect { x1, y1, x2, y2 }
    }

    /// Strict interval overlap on both axes. Rectangles that merely touch
    /// along an edge do not count as overlapping.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x1 < other.x2
            && self.x2 > other.x1
            && self.y1 < other.y2
            && self.y2 > other.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 20, 10);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn one_pixel_overlap_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(9, 9, 20, 20);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }
}
