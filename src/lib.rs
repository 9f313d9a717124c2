//! polyedit - polygon/shape editing geometry core for image annotation.
//!
//! This crate is the geometry engine behind an annotation tool's shape
//! editing: resampling a polygon to a new vertex count, distance-based
//! simplification, Sutherland-Hodgman clipping against the image
//! boundary, hole-aware fill paths, ellipse tessellation, instance color
//! allocation, and the annotation data model plus JSON task format those
//! algorithms operate on.
//!
//! Everything is synchronous and allocation-only: functions take plain
//! point data, return new data, and never touch caller-owned arrays.
//! Rendering, hit-testing, undo/redo, and network I/O all live in the
//! host application.

pub mod annotation;
pub mod color;
pub mod constants;
pub mod format;
pub mod geometry;
pub mod session;

pub use annotation::{
    Annotation, AnnotationStore, CommitOutcome, EllipseAnnotation, LabelClass, Point,
    PolygonAnnotation, clip_annotation,
};
pub use color::{allocate_unique_color, default_class_color};
pub use format::{FormatError, TaskDocument};
pub use geometry::{
    build_path_with_holes, clip_ellipse_to_rect, clip_polygon_to_rect, ellipse_to_polygon,
    resample, simplify_by_distance,
};
pub use session::{DrawingSession, ResampleSession};
