//! Ring indexing and per-vertex measurements.
//!
//! Polygons are logically circular but stored as flat arrays with implicit
//! wraparound. All wraparound arithmetic goes through [`ring_next`] and
//! [`ring_prev`] so the seam between the last and first vertex is handled
//! in exactly one place.

use crate::annotation::Point;
use crate::constants::DEGENERATE_EDGE_EPSILON;

/// Index of the vertex after `i` in a ring of `n` vertices.
pub fn ring_next(i: usize, n: usize) -> usize {
    (i + 1) % n
}

/// Index of the vertex before `i` in a ring of `n` vertices.
pub fn ring_prev(i: usize, n: usize) -> usize {
    (i + n - 1) % n
}

/// Length of each ring edge; entry `i` is the edge from vertex `i` to the
/// next vertex (including the closing edge back to vertex 0).
pub fn edge_lengths(points: &[Point]) -> Vec<f64> {
    let n = points.len();
    (0..n)
        .map(|i| points[i].distance_to(&points[ring_next(i, n)]))
        .collect()
}

/// Total perimeter of the ring, closing edge included.
pub fn perimeter(points: &[Point]) -> f64 {
    edge_lengths(points).iter().sum()
}

/// Turning angle at vertex `i`, in radians.
///
/// Zero means the incoming and outgoing edges are collinear (the vertex
/// lies on a straight run); larger values mean sharper corners. Vertices
/// whose adjacent edges are both shorter than [`DEGENERATE_EDGE_EPSILON`]
/// report zero so they sort as most removable.
pub fn turning_angle(points: &[Point], i: usize) -> f64 {
    let n = points.len();
    let prev = points[ring_prev(i, n)];
    let curr = points[i];
    let next = points[ring_next(i, n)];

    let in_dx = curr.x - prev.x;
    let in_dy = curr.y - prev.y;
    let out_dx = next.x - curr.x;
    let out_dy = next.y - curr.y;

    let in_len = (in_dx * in_dx + in_dy * in_dy).sqrt();
    let out_len = (out_dx * out_dx + out_dy * out_dy).sqrt();
    if in_len < DEGENERATE_EDGE_EPSILON && out_len < DEGENERATE_EDGE_EPSILON {
        return 0.0;
    }
    if in_len == 0.0 || out_len == 0.0 {
        return 0.0;
    }

    let dot = (in_dx * out_dx + in_dy * out_dy) / (in_len * out_len);
    // Floating-point overshoot past +/-1 would make acos return NaN.
    dot.clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_ring_indexing_wraps() {
        assert_eq!(ring_next(0, 4), 1);
        assert_eq!(ring_next(3, 4), 0);
        assert_eq!(ring_prev(0, 4), 3);
        assert_eq!(ring_prev(2, 4), 1);
    }

    #[test]
    fn test_edge_lengths_include_closing_edge() {
        let triangle = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 3.0),
        ];
        let lengths = edge_lengths(&triangle);
        assert_eq!(lengths.len(), 3);
        assert!((lengths[0] - 4.0).abs() < 1e-9);
        assert!((lengths[1] - 3.0).abs() < 1e-9);
        assert!((lengths[2] - 5.0).abs() < 1e-9);
        assert!((perimeter(&triangle) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_turning_angle_right_corner() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        for i in 0..4 {
            assert!((turning_angle(&square, i) - FRAC_PI_2).abs() < 1e-9);
        }
    }

    #[test]
    fn test_turning_angle_straight_run() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 8.0),
        ];
        assert!(turning_angle(&points, 1).abs() < 1e-9);
    }

    #[test]
    fn test_turning_angle_degenerate_edges() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1e-4, 0.0),
            Point::new(2e-4, 1e-4),
            Point::new(5.0, 8.0),
        ];
        assert_eq!(turning_angle(&points, 1), 0.0);
    }
}
