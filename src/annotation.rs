//! Annotation data model and storage.
//!
//! This module provides the core types the geometry engine operates on:
//! - 2D points in image-pixel coordinates
//! - Polygon annotations (open rings, optionally with hole rings)
//! - Ellipse annotations (center plus radii)
//! - Label class metadata
//! - Per-image annotation storage with index-based editing
//!
//! All edits flow through pure geometry functions that return new point
//! lists; the store replaces entries wholesale and never mutates point
//! arrays in place. Undo/redo snapshotting is the caller's concern.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SHAPE_OPACITY, MIN_POLYGON_VERTICES};
use crate::geometry::clip::{clip_ellipse_to_rect, clip_polygon_to_rect};

// ============================================================================
// Core Geometry Types
// ============================================================================

/// A 2D point in image-pixel coordinates.
///
/// Screen-space mapping (pan/zoom) is handled by the host application; the
/// geometry core only ever sees image space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation toward another point, `t` in `[0, 1]`.
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

fn default_opacity() -> f64 {
    DEFAULT_SHAPE_OPACITY
}

/// A polygon annotation.
///
/// `points` is an open ring: the edge from the last point back to the first
/// is implicit and the first point is not repeated. Hole rings follow the
/// same convention and represent excluded interior regions; they are
/// accepted as-is from upstream drawing and not validated against the outer
/// ring's containment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonAnnotation {
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holes: Vec<Vec<Point>>,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
}

impl PolygonAnnotation {
    /// Create a polygon with the given ring and label, no holes.
    pub fn new(points: Vec<Point>, label: impl Into<String>) -> Self {
        Self {
            points,
            holes: Vec::new(),
            label: label.into(),
            color: None,
            opacity: DEFAULT_SHAPE_OPACITY,
            instance_id: None,
        }
    }

    /// A polygon is valid when its outer ring has at least 3 vertices.
    pub fn is_valid(&self) -> bool {
        self.points.len() >= MIN_POLYGON_VERTICES
    }
}

/// An ellipse annotation. `(x, y)` is the center, not a corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EllipseAnnotation {
    pub x: f64,
    pub y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
}

impl EllipseAnnotation {
    /// Create an ellipse with the given center, radii, and label.
    pub fn new(x: f64, y: f64, radius_x: f64, radius_y: f64, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            radius_x,
            radius_y,
            label: label.into(),
            color: None,
            opacity: DEFAULT_SHAPE_OPACITY,
            instance_id: None,
        }
    }

    /// An ellipse is valid when both radii are strictly positive.
    pub fn is_valid(&self) -> bool {
        self.radius_x > 0.0 && self.radius_y > 0.0
    }
}

// ============================================================================
// Annotation
// ============================================================================

/// A single annotation on an image.
///
/// Serializes with a `"type"` tag and flattened shape fields, matching the
/// persisted JSON layout (`{"type": "polygon", "points": [...], ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Annotation {
    Polygon(PolygonAnnotation),
    Ellipse(EllipseAnnotation),
}

impl Annotation {
    /// The annotation's label class name.
    pub fn label(&self) -> &str {
        match self {
            Annotation::Polygon(p) => &p.label,
            Annotation::Ellipse(e) => &e.label,
        }
    }

    /// The annotation's own color override, if any.
    pub fn color(&self) -> Option<&str> {
        match self {
            Annotation::Polygon(p) => p.color.as_deref(),
            Annotation::Ellipse(e) => e.color.as_deref(),
        }
    }

    /// The instance grouping id, if any.
    pub fn instance_id(&self) -> Option<&str> {
        match self {
            Annotation::Polygon(p) => p.instance_id.as_deref(),
            Annotation::Ellipse(e) => e.instance_id.as_deref(),
        }
    }

    /// Check the shape invariants (ring size, positive radii).
    pub fn is_valid(&self) -> bool {
        match self {
            Annotation::Polygon(p) => p.is_valid(),
            Annotation::Ellipse(e) => e.is_valid(),
        }
    }

    /// The shape type as a string (for log messages).
    pub fn shape_type(&self) -> &'static str {
        match self {
            Annotation::Polygon(_) => "polygon",
            Annotation::Ellipse(_) => "ellipse",
        }
    }
}

// ============================================================================
// Label Classes
// ============================================================================

/// A label class definition.
///
/// Consulted by the instance color allocator to avoid collisions; the
/// geometry core does not otherwise interpret labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelClass {
    /// Display name.
    pub name: String,
    /// Hex color, `#RRGGBB`.
    pub color: String,
}

impl LabelClass {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

// ============================================================================
// Annotation Store
// ============================================================================

/// Outcome of committing a geometry edit to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The annotation survived clipping and was replaced in place.
    Updated,
    /// The annotation clipped to nothing and was removed from the image.
    Removed,
    /// No annotation existed at the given key/index.
    NotFound,
}

/// Storage for annotations across images.
///
/// Annotations are kept per image key (an opaque file identifier) in
/// insertion order; list indices are stable handles for selection and
/// deletion until the next structural change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationStore {
    annotations: HashMap<String, Vec<Annotation>>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All annotations for an image, in insertion order.
    pub fn annotations(&self, image_key: &str) -> &[Annotation] {
        self.annotations.get(image_key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get a single annotation by image key and index.
    pub fn get(&self, image_key: &str, index: usize) -> Option<&Annotation> {
        self.annotations.get(image_key).and_then(|list| list.get(index))
    }

    /// Number of annotations on an image.
    pub fn len(&self, image_key: &str) -> usize {
        self.annotations.get(image_key).map_or(0, Vec::len)
    }

    /// Check whether an image has no annotations.
    pub fn is_empty(&self, image_key: &str) -> bool {
        self.len(image_key) == 0
    }

    /// Image keys that currently hold annotations.
    pub fn image_keys(&self) -> impl Iterator<Item = &str> {
        self.annotations.keys().map(String::as_str)
    }

    /// Total annotation count across all images.
    pub fn total_annotations(&self) -> usize {
        self.annotations.values().map(Vec::len).sum()
    }

    /// Append an annotation to an image and return its index.
    ///
    /// Invalid shapes (degenerate rings, non-positive radii) are rejected.
    pub fn add(&mut self, image_key: &str, annotation: Annotation) -> Option<usize> {
        if !annotation.is_valid() {
            log::warn!(
                "rejecting invalid {} annotation on {:?}",
                annotation.shape_type(),
                image_key
            );
            return None;
        }
        let list = self.annotations.entry(image_key.to_string()).or_default();
        list.push(annotation);
        Some(list.len() - 1)
    }

    /// Remove an annotation by index, returning it.
    pub fn remove(&mut self, image_key: &str, index: usize) -> Option<Annotation> {
        let list = self.annotations.get_mut(image_key)?;
        if index >= list.len() {
            return None;
        }
        let removed = list.remove(index);
        if list.is_empty() {
            self.annotations.remove(image_key);
        }
        Some(removed)
    }

    /// Replace an annotation at an index. Returns the previous value.
    pub fn replace(
        &mut self,
        image_key: &str,
        index: usize,
        annotation: Annotation,
    ) -> Option<Annotation> {
        let slot = self.annotations.get_mut(image_key)?.get_mut(index)?;
        Some(std::mem::replace(slot, annotation))
    }

    /// Remove all annotations for an image, returning them.
    pub fn clear_image(&mut self, image_key: &str) -> Vec<Annotation> {
        self.annotations.remove(image_key).unwrap_or_default()
    }

    /// Commit an edited annotation back to the store.
    ///
    /// The shape is re-clipped against the current image bounds before it
    /// replaces the entry. A shape that clips to nothing deletes the
    /// annotation from the image; this is the only failure signal geometry
    /// edits produce.
    pub fn commit(
        &mut self,
        image_key: &str,
        index: usize,
        edited: Annotation,
        width: f64,
        height: f64,
    ) -> CommitOutcome {
        let Some(list) = self.annotations.get_mut(image_key) else {
            return CommitOutcome::NotFound;
        };
        if index >= list.len() {
            return CommitOutcome::NotFound;
        }

        match clip_annotation(edited, width, height) {
            Some(clipped) => {
                list[index] = clipped;
                CommitOutcome::Updated
            }
            None => {
                log::debug!(
                    "annotation {} on {:?} clipped to nothing, removing",
                    index,
                    image_key
                );
                list.remove(index);
                if list.is_empty() {
                    self.annotations.remove(image_key);
                }
                CommitOutcome::Removed
            }
        }
    }

    /// Serialize the full store to a map for embedding in a task document.
    pub fn into_map(self) -> HashMap<String, Vec<Annotation>> {
        self.annotations
    }

    /// Build a store from a deserialized per-image map, dropping invalid
    /// annotations with a warning rather than failing.
    pub fn from_map(map: HashMap<String, Vec<Annotation>>) -> Self {
        let mut annotations = HashMap::new();
        for (key, list) in map {
            let before = list.len();
            let kept: Vec<Annotation> = list.into_iter().filter(Annotation::is_valid).collect();
            if kept.len() < before {
                log::warn!(
                    "dropped {} invalid annotation(s) on {:?} during import",
                    before - kept.len(),
                    key
                );
            }
            if !kept.is_empty() {
                annotations.insert(key, kept);
            }
        }
        Self { annotations }
    }
}

/// Clip an annotation against image bounds, returning `None` when it is
/// destroyed (outer ring below 3 vertices, or a radius forced to zero).
///
/// Polygon hole rings are clipped along with the outer ring; holes that
/// clip below 3 vertices are dropped without destroying the annotation.
pub fn clip_annotation(annotation: Annotation, width: f64, height: f64) -> Option<Annotation> {
    match annotation {
        Annotation::Polygon(mut polygon) => {
            let clipped = clip_polygon_to_rect(&polygon.points, width, height);
            if clipped.len() < MIN_POLYGON_VERTICES {
                return None;
            }
            polygon.points = clipped;
            polygon.holes = polygon
                .holes
                .iter()
                .map(|hole| clip_polygon_to_rect(hole, width, height))
                .filter(|hole| hole.len() >= MIN_POLYGON_VERTICES)
                .collect();
            Some(Annotation::Polygon(polygon))
        }
        Annotation::Ellipse(ellipse) => {
            clip_ellipse_to_rect(&ellipse, width, height).map(Annotation::Ellipse)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

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

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert!((p1.distance_to(&p2) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_lerp_midpoint() {
        let mid = Point::new(0.0, 0.0).lerp(&Point::new(10.0, 20.0), 0.5);
        assert_eq!(mid, Point::new(5.0, 10.0));
    }

    #[test]
    fn test_polygon_validity() {
        let poly = PolygonAnnotation::new(triangle(), "cat");
        assert!(poly.is_valid());

        let degenerate = PolygonAnnotation::new(vec![Point::new(0.0, 0.0)], "cat");
        assert!(!degenerate.is_valid());
    }

    #[test]
    fn test_ellipse_validity() {
        assert!(EllipseAnnotation::new(50.0, 50.0, 10.0, 5.0, "cell").is_valid());
        assert!(!EllipseAnnotation::new(50.0, 50.0, 0.0, 5.0, "cell").is_valid());
    }

    #[test]
    fn test_store_add_remove() {
        let mut store = AnnotationStore::new();
        let idx = store
            .add("img.png", Annotation::Polygon(PolygonAnnotation::new(triangle(), "cat")))
            .unwrap();
        assert_eq!(idx, 0);
        assert_eq!(store.len("img.png"), 1);

        let removed = store.remove("img.png", 0).unwrap();
        assert_eq!(removed.label(), "cat");
        assert!(store.is_empty("img.png"));
    }

    #[test]
    fn test_store_rejects_invalid() {
        let mut store = AnnotationStore::new();
        let result = store.add(
            "img.png",
            Annotation::Ellipse(EllipseAnnotation::new(5.0, 5.0, -1.0, 2.0, "cell")),
        );
        assert!(result.is_none());
        assert!(store.is_empty("img.png"));
    }

    #[test]
    fn test_commit_keeps_inside_shape() {
        let mut store = AnnotationStore::new();
        store
            .add("img.png", Annotation::Polygon(PolygonAnnotation::new(triangle(), "cat")))
            .unwrap();

        let edited = Annotation::Polygon(PolygonAnnotation::new(triangle(), "cat"));
        let outcome = store.commit("img.png", 0, edited, 100.0, 100.0);
        assert_eq!(outcome, CommitOutcome::Updated);
        assert_eq!(store.len("img.png"), 1);
    }

    #[test]
    fn test_commit_removes_destroyed_shape() {
        let mut store = AnnotationStore::new();
        store
            .add("img.png", Annotation::Polygon(PolygonAnnotation::new(triangle(), "cat")))
            .unwrap();

        // Dragged fully outside the image.
        let outside = vec![
            Point::new(-50.0, -50.0),
            Point::new(-40.0, -50.0),
            Point::new(-40.0, -40.0),
        ];
        let edited = Annotation::Polygon(PolygonAnnotation::new(outside, "cat"));
        let outcome = store.commit("img.png", 0, edited, 100.0, 100.0);
        assert_eq!(outcome, CommitOutcome::Removed);
        assert!(store.is_empty("img.png"));
    }

    #[test]
    fn test_commit_not_found() {
        let mut store = AnnotationStore::new();
        let edited = Annotation::Polygon(PolygonAnnotation::new(triangle(), "cat"));
        assert_eq!(
            store.commit("missing.png", 0, edited, 100.0, 100.0),
            CommitOutcome::NotFound
        );
    }

    #[test]
    fn test_clip_annotation_drops_degenerate_holes() {
        let mut polygon = PolygonAnnotation::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 100.0),
                Point::new(0.0, 100.0),
            ],
            "cat",
        );
        // One hole inside, one entirely outside the image.
        polygon.holes = vec![
            vec![
                Point::new(10.0, 10.0),
                Point::new(20.0, 10.0),
                Point::new(15.0, 20.0),
            ],
            vec![
                Point::new(-30.0, -30.0),
                Point::new(-20.0, -30.0),
                Point::new(-20.0, -20.0),
            ],
        ];

        let clipped = clip_annotation(Annotation::Polygon(polygon), 100.0, 100.0).unwrap();
        let Annotation::Polygon(clipped) = clipped else {
            panic!("expected polygon");
        };
        assert_eq!(clipped.holes.len(), 1);
    }

    #[test]
    fn test_annotation_json_shape() {
        let mut poly = PolygonAnnotation::new(triangle(), "cat");
        poly.instance_id = Some("inst-1".to_string());
        let json = serde_json::to_string(&Annotation::Polygon(poly)).unwrap();
        assert!(json.contains("\"type\":\"polygon\""));
        assert!(json.contains("\"instanceId\":\"inst-1\""));

        let ellipse = Annotation::Ellipse(EllipseAnnotation::new(5.0, 6.0, 7.0, 8.0, "cell"));
        let json = serde_json::to_string(&ellipse).unwrap();
        assert!(json.contains("\"type\":\"ellipse\""));
        assert!(json.contains("\"radiusX\":7.0"));
        assert!(json.contains("\"radiusY\":8.0"));

        let back: Annotation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ellipse);
    }

    #[test]
    fn test_opacity_defaults_on_deserialize() {
        let json = r#"{"type":"ellipse","x":1.0,"y":2.0,"radiusX":3.0,"radiusY":4.0,"label":"cell"}"#;
        let ann: Annotation = serde_json::from_str(json).unwrap();
        let Annotation::Ellipse(e) = ann else {
            panic!("expected ellipse");
        };
        assert!((e.opacity - 0.5).abs() < 1e-9);
    }
}
