//! Geometric filtering and reading-order sort of candidates

use crate::config::ExtractionParams;

use super::contours::Candidate;

/// Exclusive lower bound on width/height
pub const MIN_ASPECT_RATIO: f64 = 0.3;

/// Exclusive upper bound on width/height
pub const MAX_ASPECT_RATIO: f64 = 5.0;

/// Boxes must start strictly beyond this many pixels from the top and left
/// page edges; scan artifacts and page borders sit there.
pub const EDGE_MARGIN: u32 = 10;

/// Decide whether a candidate is an illustration
///
/// Area and aspect bounds are strict on both sides.
pub fn is_illustration(candidate: &Candidate, params: &ExtractionParams) -> bool {
    let area_ok = candidate.area > params.min_area() as f64
        && candidate.area < params.max_area() as f64;
    if !area_ok {
        return false;
    }

    let aspect = candidate.bounds.aspect_ratio();
    let aspect_ok = aspect > MIN_ASPECT_RATIO && aspect < MAX_ASPECT_RATIO;

    aspect_ok && candidate.bounds.x > EDGE_MARGIN && candidate.bounds.y > EDGE_MARGIN
}

/// Keep the illustrations among `candidates`, sorted top-to-bottom then left-to-right
///
/// The sort is stable, so boxes sharing both `y` and `x` keep detection order.
pub fn select_illustrations(candidates: Vec<Candidate>, params: &ExtractionParams) -> Vec<Candidate> {
    let mut kept: Vec<Candidate> = candidates
        .into_iter()
        .filter(|candidate| is_illustration(candidate, params))
        .collect();

    kept.sort_by_key(|candidate| (candidate.bounds.y, candidate.bounds.x));
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::Region;

    fn candidate(x: u32, y: u32, width: u32, height: u32, area: f64) -> Candidate {
        Candidate { area, bounds: Region::new(x, y, width, height) }
    }

    #[test]
    fn test_area_bounds_are_strict() {
        let params = ExtractionParams::new(5000, 500_000).unwrap();
        assert!(!is_illustration(&candidate(50, 50, 100, 100, 5000.0), &params));
        assert!(is_illustration(&candidate(50, 50, 100, 100, 5000.5), &params));
        assert!(!is_illustration(&candidate(50, 50, 1000, 1000, 500_000.0), &params));
        assert!(is_illustration(&candidate(50, 50, 1000, 1000, 499_999.5), &params));
    }

    #[test]
    fn test_aspect_bounds_are_strict() {
        let params = ExtractionParams::new(10, 1_000_000).unwrap();
        assert!(!is_illustration(&candidate(50, 50, 30, 100, 1000.0), &params));
        assert!(is_illustration(&candidate(50, 50, 31, 100, 1000.0), &params));
        assert!(!is_illustration(&candidate(50, 50, 500, 100, 1000.0), &params));
        assert!(is_illustration(&candidate(50, 50, 499, 100, 1000.0), &params));
        assert!(!is_illustration(&candidate(50, 50, 100, 0, 1000.0), &params));
    }

    #[test]
    fn test_top_and_left_margins() {
        let params = ExtractionParams::default();
        assert!(!is_illustration(&candidate(10, 50, 100, 100, 9000.0), &params));
        assert!(!is_illustration(&candidate(50, 10, 100, 100, 9000.0), &params));
        assert!(is_illustration(&candidate(11, 11, 100, 100, 9000.0), &params));
    }

    #[test]
    fn test_reading_order() {
        let params = ExtractionParams::default();
        let sorted = select_illustrations(vec![
            candidate(300, 400, 100, 100, 9000.0),
            candidate(300, 50, 100, 100, 9000.0),
            candidate(40, 400, 100, 100, 9000.0),
            candidate(5, 20, 100, 100, 9000.0),
        ], &params);

        let origins: Vec<(u32, u32)> = sorted.iter().map(|c| (c.bounds.x, c.bounds.y)).collect();
        assert_eq!(origins, vec![(300, 50), (40, 400), (300, 400)]);
    }
}
