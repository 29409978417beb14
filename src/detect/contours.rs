//! Connected ink components
//!
//! Traces the outer border of every top-level foreground component of a
//! binary mask. Holes and anything nested inside them are ignored.

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;

use super::region::Region;

/// A detected component before filtering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Area enclosed by the outer border polygon
    pub area: f64,
    /// Bounding box of the border pixels
    pub bounds: Region,
}

/// Find the outer border of each top-level component in `mask`
///
/// Candidates are returned in tracing order, which is the raster-scan
/// order of each component's first border pixel.
pub fn outer_candidates(mask: &GrayImage) -> Vec<Candidate> {
    find_contours::<i64>(mask)
        .into_iter()
        .filter(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none())
        .filter_map(|contour| candidate_from_border(&contour.points))
        .collect()
}

fn candidate_from_border(points: &[Point<i64>]) -> Option<Candidate> {
    let min_x = points.iter().map(|p| p.x).min()?;
    let max_x = points.iter().map(|p| p.x).max()?;
    let min_y = points.iter().map(|p| p.y).min()?;
    let max_y = points.iter().map(|p| p.y).max()?;

    Some(Candidate {
        area: polygon_area(points),
        bounds: Region::new(
            min_x as u32,
            min_y as u32,
            (max_x - min_x + 1) as u32,
            (max_y - min_y + 1) as u32,
        ),
    })
}

/// Shoelace area of the closed polygon through pixel centres
pub fn polygon_area(points: &[Point<i64>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let twice_area: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();

    twice_area.abs() as f64 / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn fill(mask: &mut GrayImage, region: Region) {
        for y in region.y..region.end_y() {
            for x in region.x..region.end_x() {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
    }

    #[test]
    fn test_polygon_area_of_square() {
        let points = vec![
            Point::new(0, 0), Point::new(4, 0), Point::new(4, 4), Point::new(0, 4),
        ];
        assert_eq!(polygon_area(&points), 16.0);
    }

    #[test]
    fn test_polygon_area_of_degenerate_border() {
        assert_eq!(polygon_area(&[Point::new(3, 3)]), 0.0);
        assert_eq!(polygon_area(&[Point::new(3, 3), Point::new(4, 3)]), 0.0);
    }

    #[test]
    fn test_filled_rectangle() {
        let mut mask = GrayImage::new(200, 200);
        fill(&mut mask, Region::new(20, 30, 100, 50));

        let candidates = outer_candidates(&mask);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].bounds, Region::new(20, 30, 100, 50));
        assert_eq!(candidates[0].area, 99.0 * 49.0);
    }

    #[test]
    fn test_holes_are_not_recursed() {
        let mut mask = GrayImage::new(200, 200);
        fill(&mut mask, Region::new(20, 20, 120, 120));
        // hollow out the frame, then put an island inside the hole
        for y in 30..130 {
            for x in 30..130 {
                mask.put_pixel(x, y, Luma([0]));
            }
        }
        fill(&mut mask, Region::new(60, 60, 20, 20));

        let candidates = outer_candidates(&mask);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].bounds, Region::new(20, 20, 120, 120));
    }

    #[test]
    fn test_blank_mask() {
        assert!(outer_candidates(&GrayImage::new(50, 50)).is_empty());
    }
}
