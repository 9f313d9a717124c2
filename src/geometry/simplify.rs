//! Distance-threshold polygon simplification.
//!
//! Live preview for the simplify slider: recomputed on every threshold
//! change, so it is a single linear pass and fully deterministic for the
//! same input pair.

use crate::annotation::Point;
use crate::constants::MIN_POLYGON_VERTICES;

/// Keep only vertices at least `threshold` away from the last kept vertex.
///
/// The first vertex is always kept. If greedy filtering leaves fewer than
/// 3 vertices, falls back to keeping every `floor(n / 3)`-th original
/// vertex, which guarantees a valid ring for any input of 3 or more.
/// Rings of 3 or fewer vertices are returned unchanged.
pub fn simplify_by_distance(points: &[Point], threshold: f64) -> Vec<Point> {
    if points.len() <= MIN_POLYGON_VERTICES {
        return points.to_vec();
    }

    let mut result = vec![points[0]];
    let mut last_kept = points[0];
    for point in &points[1..] {
        if last_kept.distance_to(point) >= threshold {
            result.push(*point);
            last_kept = *point;
        }
    }

    if result.len() < MIN_POLYGON_VERTICES {
        let step = (points.len() / MIN_POLYGON_VERTICES).max(1);
        return points
            .iter()
            .enumerate()
            .filter(|(i, _)| i % step == 0)
            .map(|(_, p)| *p)
            .collect();
    }
    result
}
