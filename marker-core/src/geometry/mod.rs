mod orientation;
mod transformation;

pub mod geo_traits;
pub mod primitives;

#[doc(inline)]
pub use orientation::Orientation;
#[doc(inline)]
pub use orientation::Rotation;
#[doc(inline)]
pub use transformation::Transformation;

/// Distance (in cm) under which two outlines are considered to touch.
/// Touching outlines intersect, both in the exact test and in the bounding-box pre-check.
pub const GEOM_TOLERANCE: f64 = 1e-6;
