//! Integer rectangles for rooms and partition bounds.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle on the tile grid.
///
/// `x`/`y` are the minimum corner; `x_max`/`y_max` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn x_max(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive top edge.
    pub fn y_max(&self) -> i32 {
        self.y + self.height
    }

    /// Center cell, rounded toward the minimum corner.
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// True if `other` lies fully inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x_max() <= self.x_max()
            && other.y_max() <= self.y_max()
    }

    /// True if the two rectangles overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersects_with_margin(other, 0)
    }

    /// True if `other` overlaps this rectangle grown by `margin` cells on
    /// every side. With `margin = 1` two rectangles touching edge-to-edge
    /// count as intersecting; a single empty cell between them is enough
    /// separation.
    pub fn intersects_with_margin(&self, other: &Rect, margin: i32) -> bool {
        self.x - margin < other.x_max()
            && other.x - margin < self.x_max()
            && self.y - margin < other.y_max()
            && other.y - margin < self.y_max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(2, 3, 5, 4);
        assert_eq!(r.x_max(), 7);
        assert_eq!(r.y_max(), 7);
        assert_eq!(r.center(), (4, 5));
        assert_eq!(r.area(), 20);
    }

    #[test]
    fn test_contains() {
        let outer = Rect::new(0, 0, 10, 10);
        assert!(outer.contains(&Rect::new(2, 2, 5, 5)));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&Rect::new(6, 6, 5, 5)));
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(0, 0, 4, 4);
        assert!(a.intersects(&Rect::new(3, 3, 4, 4)));
        assert!(!a.intersects(&Rect::new(4, 0, 4, 4))); // edge-adjacent
        assert!(!a.intersects(&Rect::new(10, 10, 2, 2)));
    }

    #[test]
    fn test_margin_intersection() {
        let a = Rect::new(0, 0, 4, 4);
        // Edge-adjacent violates a 1-cell margin.
        assert!(a.intersects_with_margin(&Rect::new(4, 0, 4, 4), 1));
        // One empty cell between them satisfies it.
        assert!(!a.intersects_with_margin(&Rect::new(5, 0, 4, 4), 1));
        assert!(!a.intersects_with_margin(&Rect::new(6, 0, 4, 4), 1));
    }
}
