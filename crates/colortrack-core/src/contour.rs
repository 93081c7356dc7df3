//! Contours of mask foreground regions
//!
//! A contour is the ordered boundary of one connected region. Area is the
//! polygon area enclosed by the boundary points, which is what OpenCV's
//! `contourArea` reports, so selections agree across finder backends.

use crate::bbox::{BBox, Point};
use crate::threshold::Mask;
use crate::traits::ContourFinder;
use crate::Result;
use image::imageops;
use imageproc::contours::{self, BorderType};
use serde::{Deserialize, Serialize};

/// Ordered boundary points of one connected region
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<Point>,
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Enclosed polygon area (shoelace formula), orientation ignored
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }

        let twice: i64 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
            })
            .sum();

        (twice as f64 / 2.0).abs()
    }

    /// Axis-aligned box around every boundary point
    pub fn bounding_box(&self) -> Option<BBox> {
        BBox::enclosing(&self.points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Pick the contour with the largest area.
///
/// Equal areas keep the earlier contour, matching a stable descending sort.
pub fn select_largest(contours: &[Contour]) -> Option<(usize, &Contour)> {
    let mut best: Option<(usize, &Contour, f64)> = None;

    for (i, contour) in contours.iter().enumerate() {
        let area = contour.area();
        match best {
            Some((_, _, best_area)) if area <= best_area => {}
            _ => best = Some((i, contour, area)),
        }
    }

    best.map(|(i, contour, _)| (i, contour))
}

/// Border-following contour finder backed by `imageproc`.
///
/// Reports outer borders and hole borders in raster discovery order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracedContours {
    outer_only: bool,
}

impl TracedContours {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip hole borders
    pub fn outer_only(mut self) -> Self {
        self.outer_only = true;
        self
    }
}

impl ContourFinder for TracedContours {
    fn find_contours(&self, mask: &Mask) -> Result<Vec<Contour>> {
        // The tracer loses regions that touch the image edge, so trace a
        // copy framed by one background pixel and shift back afterwards
        let (width, height) = mask.dimensions();
        let mut framed = Mask::new(width + 2, height + 2);
        imageops::replace(&mut framed, mask, 1, 1);

        let found = contours::find_contours::<i32>(&framed)
            .into_iter()
            .filter(|c| !self.outer_only || matches!(c.border_type, BorderType::Outer))
            .map(|c| Contour::new(c.points.iter().map(|p| Point::new(p.x - 1, p.y - 1)).collect()))
            .collect::<Vec<_>>();

        log::trace!("traced {} contours", found.len());
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn rect_contour(x: i32, y: i32, w: i32, h: i32) -> Contour {
        Contour::new(vec![
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ])
    }

    fn fill(mask: &mut Mask, x: u32, y: u32, w: u32, h: u32) {
        for yy in y..y + h {
            for xx in x..x + w {
                mask.put_pixel(xx, yy, Luma([255]));
            }
        }
    }

    #[test]
    fn test_area_of_polygon() {
        assert_eq!(rect_contour(0, 0, 4, 3).area(), 12.0);

        let triangle = Contour::new(vec![Point::new(0, 0), Point::new(4, 0), Point::new(0, 4)]);
        assert_eq!(triangle.area(), 8.0);

        let reversed = Contour::new(triangle.points.iter().rev().copied().collect());
        assert_eq!(reversed.area(), 8.0);
    }

    #[test]
    fn test_degenerate_contours_have_zero_area() {
        assert_eq!(Contour::new(vec![Point::new(3, 3)]).area(), 0.0);
        assert_eq!(Contour::new(vec![Point::new(0, 0), Point::new(5, 0)]).area(), 0.0);
        assert_eq!(Contour::default().area(), 0.0);
    }

    #[test]
    fn test_select_largest_prefers_strictly_larger() {
        let contours = vec![
            rect_contour(0, 0, 2, 2),
            rect_contour(10, 10, 5, 5),
            rect_contour(20, 20, 3, 3),
        ];

        let (index, _) = select_largest(&contours).unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn test_select_largest_ties_keep_first() {
        let contours = vec![
            rect_contour(0, 0, 1, 1),
            rect_contour(50, 50, 4, 4),
            rect_contour(10, 10, 4, 4),
        ];

        let (index, contour) = select_largest(&contours).unwrap();
        assert_eq!(index, 1);
        assert_eq!(contour.bounding_box(), Some(BBox::new(50, 50, 5, 5)));
    }

    #[test]
    fn test_select_largest_empty() {
        assert!(select_largest(&[]).is_none());
    }

    #[test]
    fn test_traced_empty_mask_has_no_contours() {
        let mask = Mask::new(32, 32);
        assert!(TracedContours::new().find_contours(&mask).unwrap().is_empty());
    }

    #[test]
    fn test_traced_square_bounding_box() {
        let mut mask = Mask::new(200, 200);
        fill(&mut mask, 100, 100, 50, 50);

        let found = TracedContours::new().find_contours(&mask).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].bounding_box(), Some(BBox::new(100, 100, 50, 50)));
        assert_eq!(found[0].area(), 49.0 * 49.0);
    }

    #[test]
    fn test_traced_picks_larger_region() {
        let mut mask = Mask::new(80, 80);
        fill(&mut mask, 2, 2, 10, 10);
        fill(&mut mask, 30, 40, 20, 15);

        let found = TracedContours::new().find_contours(&mask).unwrap();
        assert_eq!(found.len(), 2);

        let (_, largest) = select_largest(&found).unwrap();
        assert_eq!(largest.bounding_box(), Some(BBox::new(30, 40, 20, 15)));
    }

    #[test]
    fn test_traced_regions_on_the_border() {
        let mut mask = Mask::new(40, 30);
        fill(&mut mask, 0, 0, 10, 30);
        fill(&mut mask, 25, 20, 15, 10);

        let found = TracedContours::new().find_contours(&mask).unwrap();
        let mut boxes: Vec<_> = found.iter().filter_map(Contour::bounding_box).collect();
        boxes.sort_by_key(|b| (b.x, b.y));

        assert_eq!(boxes, vec![BBox::new(0, 0, 10, 30), BBox::new(25, 20, 15, 10)]);
    }

    #[test]
    fn test_traced_full_width_bands() {
        let mut mask = Mask::new(40, 30);
        fill(&mut mask, 0, 5, 40, 10);
        fill(&mut mask, 0, 20, 40, 6);

        let found = TracedContours::new().find_contours(&mask).unwrap();
        assert_eq!(found.len(), 2);

        let (_, largest) = select_largest(&found).unwrap();
        assert_eq!(largest.bounding_box(), Some(BBox::new(0, 5, 40, 10)));
        assert_eq!(largest.area(), 39.0 * 9.0);
    }

    #[test]
    fn test_traced_full_mask() {
        let mut mask = Mask::new(40, 30);
        fill(&mut mask, 0, 0, 40, 30);

        let found = TracedContours::new().outer_only().find_contours(&mask).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].bounding_box(), Some(BBox::new(0, 0, 40, 30)));
    }

    #[test]
    fn test_outer_only_skips_holes() {
        let mut mask = Mask::new(40, 40);
        fill(&mut mask, 5, 5, 20, 20);
        for y in 10..15 {
            for x in 10..15 {
                mask.put_pixel(x, y, Luma([0]));
            }
        }

        let all = TracedContours::new().find_contours(&mask).unwrap();
        let outer = TracedContours::new().outer_only().find_contours(&mask).unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(outer.len(), 1);
        assert_eq!(outer[0].bounding_box(), Some(BBox::new(5, 5, 20, 20)));
    }
}
