use crate::entities::OrientedShape;
use crate::geometry::geo_traits::{AlmostCollidesWith, Transformable};
use crate::geometry::{Orientation, Transformation};
use crate::geometry::primitives::{Rect, SPolygon};

/// A panel's shape at a definitive position on the [`Sheet`](crate::entities::Sheet).
#[derive(Clone, Debug)]
pub struct Placement {
    /// Index of the panel in the list handed to the run
    pub panel_idx: usize,
    pub orientation: Orientation,
    /// Translation applied to the normalized [`OrientedShape`](crate::entities::OrientedShape)
    pub offset: (f64, f64),
    pub shape: SPolygon,
}

impl Placement {
    /// Places `oriented` on the sheet by translating it over `offset`.
    pub fn new(panel_idx: usize, oriented: &OrientedShape, offset: (f64, f64)) -> Self {
        let shape = oriented
            .shape
            .transform_clone(&Transformation::from_translation(offset));
        Placement {
            panel_idx,
            orientation: oriented.orientation,
            offset,
            shape,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.shape.bbox
    }

    /// Bounding boxes are compared first, the exact polygon test only runs when they overlap.
    #[inline(always)]
    pub fn conflicts_with(&self, shape: &SPolygon) -> bool {
        self.shape.bbox.almost_collides_with(&shape.bbox) && self.shape.almost_collides_with(shape)
    }
}
