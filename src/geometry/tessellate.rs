//! Ellipse-to-polygon tessellation.
//!
//! Segmentation export and other polygon-only consumers can't represent
//! ellipses; this approximates them as N-gons.

use std::f64::consts::TAU;

use crate::annotation::{EllipseAnnotation, Point, PolygonAnnotation};
use crate::constants::DEFAULT_ELLIPSE_SEGMENTS;

/// Approximate an ellipse as a polygon with `num_points` vertices.
///
/// Vertices are placed at angles `TAU * i / num_points` around the center,
/// and a duplicate of the first vertex is appended so the produced ring is
/// explicitly closed. Note this differs from hand-drawn polygons, which
/// are stored open; consumers of tessellated rings must tolerate the
/// duplicated final vertex.
///
/// Label, color, opacity, and instance id carry over from the ellipse.
pub fn ellipse_to_polygon(ellipse: &EllipseAnnotation, num_points: usize) -> PolygonAnnotation {
    let mut points = Vec::with_capacity(num_points + 1);
    for i in 0..num_points {
        let angle = TAU * i as f64 / num_points as f64;
        points.push(Point::new(
            ellipse.x + ellipse.radius_x * angle.cos(),
            ellipse.y + ellipse.radius_y * angle.sin(),
        ));
    }
    if let Some(first) = points.first().copied() {
        points.push(first);
    }

    PolygonAnnotation {
        points,
        holes: Vec::new(),
        label: ellipse.label.clone(),
        color: ellipse.color.clone(),
        opacity: ellipse.opacity,
        instance_id: ellipse.instance_id.clone(),
    }
}

/// [`ellipse_to_polygon`] with the default segment count.
pub fn ellipse_to_polygon_default(ellipse: &EllipseAnnotation) -> PolygonAnnotation {
    ellipse_to_polygon(ellipse, DEFAULT_ELLIPSE_SEGMENTS)
}
