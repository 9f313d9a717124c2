//! Polygon vertex-count adjustment.
//!
//! Interactive point-count sliders call [`resample`] on every tick with the
//! original ring and the requested count. Increasing the count subdivides
//! the longest edges proportionally; decreasing it removes the vertices
//! that contribute least to the outline (smallest turning angle).

use crate::annotation::Point;
use crate::constants::MIN_POLYGON_VERTICES;
use crate::geometry::ring::{edge_lengths, ring_next, turning_angle};

/// Resample a polygon ring to `target_count` vertices.
///
/// Identity when `target_count` equals the current count. Densifying keeps
/// every original vertex in its original relative order; simplifying only
/// ever returns vertices that were present in the input. The result always
/// has at least 3 vertices; rings with fewer than 3 input vertices are
/// returned unchanged.
pub fn resample(points: &[Point], target_count: usize) -> Vec<Point> {
    if points.len() < MIN_POLYGON_VERTICES {
        return points.to_vec();
    }
    let target_count = target_count.max(MIN_POLYGON_VERTICES);
    match target_count.cmp(&points.len()) {
        std::cmp::Ordering::Equal => points.to_vec(),
        std::cmp::Ordering::Greater => densify(points, target_count),
        std::cmp::Ordering::Less => simplify_by_significance(points, target_count),
    }
}

/// Subdivide edges until the ring has `target_count` vertices.
///
/// New vertices are distributed across edges proportionally to edge length,
/// longest edges first. An edge with `m` added vertices gets them at
/// parametric positions `k / (m + 1)`, evenly spaced.
fn densify(points: &[Point], target_count: usize) -> Vec<Point> {
    let n = points.len();
    let need = target_count - n;
    let lengths = edge_lengths(points);
    let total: f64 = lengths.iter().sum();

    // Longest-first priority; stable sort keeps earlier edges ahead on ties.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        lengths[b]
            .partial_cmp(&lengths[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut allocations = vec![0usize; n];
    let mut remaining = need;
    for &edge in &order {
        if remaining == 0 {
            break;
        }
        let share = if total > 0.0 {
            ((need as f64) * lengths[edge] / total).floor() as usize
        } else {
            0
        };
        let alloc = share.max(1).min(remaining);
        allocations[edge] = alloc;
        remaining -= alloc;
    }
    // Proportional floors can leave a remainder; hand it out longest-first.
    while remaining > 0 {
        for &edge in &order {
            if remaining == 0 {
                break;
            }
            allocations[edge] += 1;
            remaining -= 1;
        }
    }

    let mut result = Vec::with_capacity(target_count);
    for i in 0..n {
        result.push(points[i]);
        let m = allocations[i];
        let end = points[ring_next(i, n)];
        for k in 1..=m {
            let t = k as f64 / (m + 1) as f64;
            result.push(points[i].lerp(&end, t));
        }
    }
    result
}

/// Remove the least significant vertices until `target_count` remain.
fn simplify_by_significance(points: &[Point], target_count: usize) -> Vec<Point> {
    let n = points.len();
    let remove_count = (n - target_count).min(n - MIN_POLYGON_VERTICES);

    let scores: Vec<f64> = (0..n).map(|i| turning_angle(points, i)).collect();
    let mut by_significance: Vec<usize> = (0..n).collect();
    by_significance.sort_by(|&a, &b| {
        scores[a]
            .partial_cmp(&scores[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Remove by descending index so earlier removals don't shift later ones.
    let mut to_remove: Vec<usize> = by_significance[..remove_count].to_vec();
    to_remove.sort_by(|a, b| b.cmp(a));

    let mut result = points.to_vec();
    for index in to_remove {
        result.remove(index);
    }

    if result.len() < MIN_POLYGON_VERTICES {
        return fallback_sample(points);
    }
    result
}

/// Degenerate fallback: keep every `floor(n / 3)`-th original vertex.
fn fallback_sample(points: &[Point]) -> Vec<Point> {
    let step = (points.len() / MIN_POLYGON_VERTICES).max(1);
    points
        .iter()
        .enumerate()
        .filter(|(i, _)| i % step == 0)
        .map(|(_, p)| *p)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Point> {
        vec![
            Point::new(10.0, 10.0),
            Point::new(90.0, 10.0),
            Point::new(50.0, 90.0),
        ]
    }

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ]
    }

    fn contains_point(haystack: &[Point], needle: &Point) -> bool {
        haystack.iter().any(|p| p == needle)
    }

    #[test]
    fn test_identity() {
        let points = square();
        assert_eq!(resample(&points, 4), points);
    }

    #[test]
    fn test_too_few_points_returned_unchanged() {
        let points = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        assert_eq!(resample(&points, 10), points);
    }

    #[test]
    fn test_result_never_below_three() {
        let points = square();
        for target in [0, 1, 2, 3] {
            assert!(resample(&points, target).len() >= 3);
        }
        for target in (3..300).step_by(17) {
            assert!(resample(&points, target).len() >= 3);
        }
    }

    #[test]
    fn test_densify_exact_count() {
        let points = square();
        for target in 5..40 {
            assert_eq!(resample(&points, target).len(), target);
        }
    }

    #[test]
    fn test_densify_keeps_originals_in_order() {
        let points = square();
        let result = resample(&points, 17);

        let positions: Vec<usize> = points
            .iter()
            .map(|orig| result.iter().position(|p| p == orig).expect("original kept"))
            .collect();
        for pair in positions.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_simplify_only_original_points() {
        let points = resample(&square(), 12);
        let result = resample(&points, 6);
        assert_eq!(result.len(), 6);
        for p in &result {
            assert!(contains_point(&points, p));
        }
    }

    #[test]
    fn test_simplify_preserves_sharp_corners() {
        // A square densified along its edges, then simplified back down:
        // the four right-angle corners must all survive.
        let densified = resample(&square(), 12);
        let result = resample(&densified, 4);
        assert_eq!(result.len(), 4);
        for corner in &square() {
            assert!(contains_point(&result, corner));
        }
    }

    #[test]
    fn test_triangle_to_six_points() {
        // Edge lengths: 80, sqrt(8000), sqrt(8000). Proportional allocation
        // of 3 new points gives one midpoint per edge.
        let result = resample(&triangle(), 6);
        assert_eq!(result.len(), 6);
        for original in &triangle() {
            assert!(contains_point(&result, original));
        }
        assert_eq!(
            result,
            vec![
                Point::new(10.0, 10.0),
                Point::new(50.0, 10.0),
                Point::new(90.0, 10.0),
                Point::new(70.0, 50.0),
                Point::new(50.0, 90.0),
                Point::new(30.0, 50.0),
            ]
        );
    }

    #[test]
    fn test_large_target() {
        let result = resample(&triangle(), 300);
        assert_eq!(result.len(), 300);
        for original in &triangle() {
            assert!(contains_point(&result, original));
        }
    }

    #[test]
    fn test_inputs_not_mutated() {
        let points = square();
        let snapshot = points.clone();
        let _ = resample(&points, 20);
        let _ = resample(&points, 3);
        assert_eq!(points, snapshot);
    }
}
