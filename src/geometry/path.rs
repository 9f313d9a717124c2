//! Hole-aware fill path construction.
//!
//! Converts an outer ring plus hole rings into a single piece of SVG path
//! data. The renderer MUST fill the result with the even-odd rule (not
//! nonzero winding) for the hole subpaths to subtract from the outer fill;
//! that is a requirement of this encoding, not a styling preference.

use crate::annotation::Point;

/// Build one path string covering the outer ring and every non-empty hole.
///
/// Each ring becomes a `M x y L x y ... Z` subpath. Rings are emitted
/// verbatim; a duplicated closing vertex (as produced by the ellipse
/// tessellator) is harmless since `Z` closes the subpath either way.
pub fn build_path_with_holes(outer: &[Point], holes: &[Vec<Point>]) -> String {
    let mut path = String::new();
    append_ring(&mut path, outer);
    for hole in holes {
        append_ring(&mut path, hole);
    }
    path
}

fn append_ring(path: &mut String, ring: &[Point]) {
    let mut points = ring.iter();
    let Some(first) = points.next() else {
        return;
    };
    if !path.is_empty() {
        path.push(' ');
    }
    path.push_str(&format!("M {} {}", first.x, first.y));
    for p in points {
        path.push_str(&format!(" L {} {}", p.x, p.y));
    }
    path.push_str(" Z");
}
