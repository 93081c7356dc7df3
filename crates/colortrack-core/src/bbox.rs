//! Bounding box operations
//!
//! Axis-aligned boxes in pixel coordinates, as produced from the selected
//! contour and inflated for drawing.

use serde::{Deserialize, Serialize};

/// Integer pixel coordinate; may lie outside the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned bounding box `(x, y, width, height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BBox {
    /// Create a new bounding box
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest box containing every point, with inclusive pixel extents.
    ///
    /// A single point yields a 1x1 box. Returns `None` for an empty slice.
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.x, first.y);

        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Some(Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Corner at `(x + width, y + height)`, one past the last covered pixel
    pub fn bottom_right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Grow the box by `margin` pixels on every side
    pub fn inflate(&self, margin: i32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + 2 * margin,
            self.height + 2 * margin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enclosing_uses_inclusive_extents() {
        let points = [
            Point::new(100, 100),
            Point::new(149, 100),
            Point::new(149, 149),
            Point::new(100, 149),
        ];

        let bbox = BBox::enclosing(&points).unwrap();
        assert_eq!(bbox, BBox::new(100, 100, 50, 50));
        assert_eq!(bbox.bottom_right(), Point::new(150, 150));
    }

    #[test]
    fn test_enclosing_single_point_and_empty() {
        assert_eq!(BBox::enclosing(&[Point::new(7, 3)]), Some(BBox::new(7, 3, 1, 1)));
        assert_eq!(BBox::enclosing(&[]), None);
    }

    #[test]
    fn test_inflate() {
        let inflated = BBox::new(100, 100, 50, 50).inflate(15);

        assert_eq!(inflated.top_left(), Point::new(85, 85));
        assert_eq!(inflated.bottom_right(), Point::new(165, 165));
        assert_eq!((inflated.width, inflated.height), (80, 80));
    }
}
