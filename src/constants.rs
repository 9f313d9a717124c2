//! Global constants for the geometry core.
//!
//! The epsilon values are empirically chosen tolerances, not derived
//! quantities. Changing them changes clipping and simplification behavior
//! at the margins.

/// Minimum number of vertices required for a valid polygon ring.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Edges closer than this to parallel with a clip line produce no
/// intersection point during boundary clipping.
pub const CLIP_PARALLEL_EPSILON: f64 = 1e-8;

/// Adjacent edges both shorter than this mark a vertex as degenerate
/// (significance zero) during resampling.
pub const DEGENERATE_EDGE_EPSILON: f64 = 1e-3;

/// Maximum attempts when searching for a collision-free instance color.
pub const COLOR_ALLOC_MAX_ATTEMPTS: usize = 100;

/// Default vertex count when tessellating an ellipse into a polygon.
pub const DEFAULT_ELLIPSE_SEGMENTS: usize = 20;

/// Default fill opacity for shapes that don't specify one.
pub const DEFAULT_SHAPE_OPACITY: f64 = 0.5;

/// Lower bound factor for the interactive resample target range.
pub const RESAMPLE_MIN_FACTOR: f64 = 0.3;

/// Upper bound factor for the interactive resample target range.
pub const RESAMPLE_MAX_FACTOR: f64 = 3.0;

/// Hard cap on the interactive resample target.
pub const RESAMPLE_MAX_POINTS: usize = 100;
