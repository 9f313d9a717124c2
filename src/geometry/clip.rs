//! Clipping shapes against the image boundary.
//!
//! Every shape finalize, drag, and vertex edit is re-clipped against the
//! current image dimensions before it is committed. Polygons use
//! Sutherland-Hodgman against the four image half-planes; ellipses shrink
//! their radii toward the violated edges.

use crate::annotation::{EllipseAnnotation, Point};
use crate::constants::CLIP_PARALLEL_EPSILON;

/// One of the four image-boundary half-planes.
#[derive(Debug, Clone, Copy)]
enum Boundary {
    /// `x >= 0`
    Left,
    /// `x <= width`
    Right(f64),
    /// `y >= 0`
    Top,
    /// `y <= height`
    Bottom(f64),
}

impl Boundary {
    fn contains(&self, p: &Point) -> bool {
        match self {
            Boundary::Left => p.x >= 0.0,
            Boundary::Right(width) => p.x <= *width,
            Boundary::Top => p.y >= 0.0,
            Boundary::Bottom(height) => p.y <= *height,
        }
    }

    /// Intersection of the segment `a -> b` with this boundary line.
    ///
    /// Segments nearly parallel to the boundary produce no intersection;
    /// this is an accepted approximation, not an exact clipper.
    fn intersect(&self, a: &Point, b: &Point) -> Option<Point> {
        match self {
            Boundary::Left => intersect_vertical(a, b, 0.0),
            Boundary::Right(width) => intersect_vertical(a, b, *width),
            Boundary::Top => intersect_horizontal(a, b, 0.0),
            Boundary::Bottom(height) => intersect_horizontal(a, b, *height),
        }
    }
}

fn intersect_vertical(a: &Point, b: &Point, x: f64) -> Option<Point> {
    let dx = b.x - a.x;
    if dx.abs() < CLIP_PARALLEL_EPSILON {
        return None;
    }
    let t = (x - a.x) / dx;
    Some(Point::new(x, a.y + t * (b.y - a.y)))
}

fn intersect_horizontal(a: &Point, b: &Point, y: f64) -> Option<Point> {
    let dy = b.y - a.y;
    if dy.abs() < CLIP_PARALLEL_EPSILON {
        return None;
    }
    let t = (y - a.y) / dy;
    Some(Point::new(a.x + t * (b.x - a.x), y))
}

/// Clip a polygon ring against the image rectangle `[0, width] x [0, height]`.
///
/// Sutherland-Hodgman, clipping against left, right, top, bottom in that
/// order. A result with fewer than 3 points means the polygon lies entirely
/// outside the image; the caller must delete the annotation in that case.
pub fn clip_polygon_to_rect(points: &[Point], width: f64, height: f64) -> Vec<Point> {
    let boundaries = [
        Boundary::Left,
        Boundary::Right(width),
        Boundary::Top,
        Boundary::Bottom(height),
    ];

    let mut ring = points.to_vec();
    for boundary in boundaries {
        if ring.is_empty() {
            break;
        }
        let input = std::mem::take(&mut ring);
        let n = input.len();
        for i in 0..n {
            let current = input[i];
            let prev = input[(i + n - 1) % n];
            let current_inside = boundary.contains(&current);
            let prev_inside = boundary.contains(&prev);

            if current_inside {
                if !prev_inside {
                    // Entering: emit the crossing point, then the vertex.
                    if let Some(p) = boundary.intersect(&prev, &current) {
                        ring.push(p);
                    }
                }
                ring.push(current);
            } else if prev_inside {
                // Leaving: emit only the crossing point.
                if let Some(p) = boundary.intersect(&prev, &current) {
                    ring.push(p);
                }
            }
        }
    }
    ring
}

/// Fit an ellipse inside the image rectangle, shrinking radii toward the
/// violated edges while keeping the center in place when possible.
///
/// Returns `None` when the ellipse's bounding box lies entirely outside
/// the image, or when fitting would force a radius to zero or below; the
/// caller must delete the annotation in either case.
pub fn clip_ellipse_to_rect(
    ellipse: &EllipseAnnotation,
    width: f64,
    height: f64,
) -> Option<EllipseAnnotation> {
    let left = ellipse.x - ellipse.radius_x;
    let right = ellipse.x + ellipse.radius_x;
    let top = ellipse.y - ellipse.radius_y;
    let bottom = ellipse.y + ellipse.radius_y;

    if right < 0.0 || left > width || bottom < 0.0 || top > height {
        return None;
    }

    let mut clipped = ellipse.clone();
    let (x, radius_x) = fit_axis(ellipse.x, ellipse.radius_x, left, right, width);
    let (y, radius_y) = fit_axis(ellipse.y, ellipse.radius_y, top, bottom, height);
    clipped.x = x;
    clipped.y = y;
    clipped.radius_x = radius_x;
    clipped.radius_y = radius_y;

    if clipped.radius_x <= 0.0 || clipped.radius_y <= 0.0 {
        return None;
    }
    Some(clipped)
}

/// Fit one axis of the ellipse into `[0, extent]`.
///
/// The center is preserved and the radius shrunk to the distance from the
/// center to the violated edge. Only when the center itself sits outside
/// the image is it shifted inward, with the radius capped at half the
/// extent so the shifted ellipse still fits.
fn fit_axis(center: f64, radius: f64, low: f64, high: f64, extent: f64) -> (f64, f64) {
    if center <= 0.0 {
        let radius = radius.min(extent / 2.0);
        return (radius, radius);
    }
    if center >= extent {
        let radius = radius.min(extent / 2.0);
        return (extent - radius, radius);
    }

    let mut radius = radius;
    if low < 0.0 {
        radius = center;
    }
    if high > extent {
        radius = radius.min(extent - center);
    }
    (center, radius)
}
