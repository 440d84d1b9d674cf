use ordered_float::NotNan;

use marker_core::geometry::primitives::Rect;

/// The score assigned to a compacted placement option, lower is better.
/// The x_max of the shape, with the y_min added as a small tie-breaker.
#[derive(PartialEq, PartialOrd, Copy, Clone, Debug, Eq, Ord)]
pub struct PlacementScore(NotNan<f64>);

impl PlacementScore {
    pub fn new(x_max: f64, y_min: f64, y_weight: f64) -> Self {
        let score = x_max + y_weight * y_min;
        PlacementScore(NotNan::new(score).expect("score is NaN"))
    }

    pub fn from_bbox(bbox: &Rect, y_weight: f64) -> Self {
        PlacementScore::new(bbox.x_max, bbox.y_min, y_weight)
    }

    pub fn value(&self) -> f64 {
        self.0.into_inner()
    }
}
