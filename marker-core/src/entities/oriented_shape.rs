use float_cmp::approx_eq;

use crate::geometry::Orientation;
use crate::geometry::Transformation;
use crate::geometry::geo_traits::{Shape, Transformable};
use crate::geometry::primitives::SPolygon;

/// A panel's shape in one [`Orientation`], normalized so that its bounding box starts at the origin.
#[derive(Clone, Debug)]
pub struct OrientedShape {
    pub orientation: Orientation,
    pub shape: SPolygon,
}

impl OrientedShape {
    /// Rotates and (optionally) mirrors `base` around its centroid, then moves it to the origin.
    pub fn new(base: &SPolygon, orientation: Orientation) -> Self {
        let mut shape = base.transform_clone(&orientation.transformation_around(base.centroid()));
        let bbox = shape.bbox();
        shape.transform(&Transformation::from_translation((-bbox.x_min, -bbox.y_min)));

        debug_assert!(approx_eq!(
            f64,
            SPolygon::calculate_area(&shape.points),
            base.area(),
            epsilon = 1e-6 * base.area().max(1.0)
        ));
        debug_assert!(shape.bbox().x_min == 0.0 && shape.bbox().y_min == 0.0);

        OrientedShape { orientation, shape }
    }

    pub fn width(&self) -> f64 {
        self.shape.bbox().width()
    }

    pub fn height(&self) -> f64 {
        self.shape.bbox().height()
    }
}
