//! Pure 2D geometry for interactive shape editing.
//!
//! Every function here takes plain point data and returns new data; input
//! slices are never mutated. All functions run to completion synchronously
//! and are cheap enough to recompute on every pointer move or slider tick.

pub mod clip;
pub mod path;
pub mod resample;
pub mod ring;
pub mod simplify;
pub mod tessellate;

pub use clip::{clip_ellipse_to_rect, clip_polygon_to_rect};
pub use path::build_path_with_holes;
pub use resample::resample;
pub use ring::{edge_lengths, perimeter, ring_next, ring_prev, turning_angle};
pub use simplify::simplify_by_distance;
pub use tessellate::{ellipse_to_polygon, ellipse_to_polygon_default};
