//! Geometry shared between the engine and its render surface

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in viewport-local pixels
///
/// `(x1, y1)` is the top-left corner, `(x2, y2)` the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Geometry {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Geometry {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    pub fn center_x(&self) -> i32 {
        self.x1 + self.width() / 2
    }

    pub fn center_y(&self) -> f64 {
        (self.y1 as f64 + self.y2 as f64) / 2.0
    }

    /// One-pixel-wide sliver at the horizontal center, full height
    pub fn seed(&self) -> Self {
        let cx = self.center_x();
        Self::new(cx, self.y1, cx + 1, self.y2)
    }

    /// Zero-width sliver at the horizontal center, full height
    pub fn collapsed(&self) -> Self {
        let cx = self.center_x();
        Self::new(cx, self.y1, cx, self.y2)
    }

    pub fn edges(&self) -> [i32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    pub fn from_edges([x1, y1, x2, y2]: [i32; 4]) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_and_collapse() {
        let g = Geometry::new(5, 20, 105, 40);
        assert_eq!(g.width(), 100);
        assert_eq!(g.height(), 20);
        assert_eq!(g.center_y(), 30.0);
        assert_eq!(g.seed(), Geometry::new(55, 20, 56, 40));
        assert_eq!(g.collapsed(), Geometry::new(55, 20, 55, 40));
        assert_eq!(Geometry::from_edges(g.edges()), g);
    }
}
