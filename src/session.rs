//! Ephemeral editing sessions.
//!
//! Sessions hold the transient state between "user started an edit" and
//! "user applied or cancelled it". They own an immutable snapshot of the
//! original geometry and derive previews from it; the surrounding
//! application replaces the stored annotation only on apply. Cancellation
//! is an explicit method on the session, not a broadcast signal.

use crate::annotation::{Point, PolygonAnnotation};
use crate::constants::{
    MIN_POLYGON_VERTICES, RESAMPLE_MAX_FACTOR, RESAMPLE_MAX_POINTS, RESAMPLE_MIN_FACTOR,
};
use crate::geometry::clip::clip_polygon_to_rect;
use crate::geometry::resample::resample;
use crate::geometry::simplify::simplify_by_distance;

// ============================================================================
// Resample Session
// ============================================================================

/// Interactive point-count adjustment for one polygon ring.
///
/// Created when the user finishes drawing or opens the point adjuster.
/// Every slider tick recomputes the full preview from the original
/// snapshot, so repeated adjustments never accumulate resampling error.
#[derive(Debug, Clone)]
pub struct ResampleSession {
    original: Vec<Point>,
    preview: Vec<Point>,
    target: usize,
}

impl ResampleSession {
    /// Open a session over a snapshot of the ring being adjusted.
    pub fn new(original: Vec<Point>) -> Self {
        let target = original.len();
        Self {
            preview: original.clone(),
            original,
            target,
        }
    }

    /// The inclusive `(min, max)` range the target slider may take:
    /// `[max(3, floor(0.3 * n)), min(100, ceil(3 * n))]`.
    pub fn target_bounds(&self) -> (usize, usize) {
        let n = self.original.len() as f64;
        let min = (n * RESAMPLE_MIN_FACTOR).floor() as usize;
        let max = (n * RESAMPLE_MAX_FACTOR).ceil() as usize;
        (min.max(MIN_POLYGON_VERTICES), max.min(RESAMPLE_MAX_POINTS))
    }

    /// Set the target vertex count (clamped to [`Self::target_bounds`])
    /// and recompute the preview.
    pub fn set_target(&mut self, target: usize) {
        let (min, max) = self.target_bounds();
        self.target = target.clamp(min, max);
        self.preview = resample(&self.original, self.target);
    }

    /// Recompute the preview with a distance threshold instead of a count.
    pub fn set_distance_threshold(&mut self, threshold: f64) {
        self.preview = simplify_by_distance(&self.original, threshold);
        self.target = self.preview.len();
    }

    /// The current target vertex count.
    pub fn target(&self) -> usize {
        self.target
    }

    /// The current preview ring.
    pub fn preview(&self) -> &[Point] {
        &self.preview
    }

    /// The untouched original ring.
    pub fn original(&self) -> &[Point] {
        &self.original
    }

    /// Commit: consume the session and return the preview for storage.
    pub fn apply(self) -> Vec<Point> {
        self.preview
    }

    /// Roll back: consume the session and return the original snapshot.
    pub fn cancel(self) -> Vec<Point> {
        self.original
    }
}

// ============================================================================
// Drawing Session
// ============================================================================

/// A polygon being drawn, vertex by vertex.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    points: Vec<Point>,
    label: String,
}

impl DrawingSession {
    /// Start drawing a polygon with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            points: Vec::new(),
            label: label.into(),
        }
    }

    /// Add a vertex at the clicked position.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Move the last vertex (pointer drag before the next click).
    pub fn update_last(&mut self, point: Point) {
        if let Some(last) = self.points.last_mut() {
            *last = point;
        }
    }

    /// Vertices placed so far.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether the next click near the first vertex would close the ring.
    pub fn can_close(&self) -> bool {
        self.points.len() >= MIN_POLYGON_VERTICES
    }

    /// Finish drawing: clip against the image bounds and build the
    /// annotation. Returns `None` when too few vertices were placed or the
    /// ring clips to nothing.
    pub fn finish(self, width: f64, height: f64) -> Option<PolygonAnnotation> {
        if self.points.len() < MIN_POLYGON_VERTICES {
            return None;
        }
        let clipped = clip_polygon_to_rect(&self.points, width, height);
        if clipped.len() < MIN_POLYGON_VERTICES {
            log::debug!("drawn polygon clipped to nothing, discarding");
            return None;
        }
        Some(PolygonAnnotation::new(clipped, self.label))
    }

    /// Abandon the drawing, discarding all placed vertices.
    pub fn cancel(self) {
        log::debug!("drawing cancelled with {} vertex(es)", self.points.len());
    }
}
