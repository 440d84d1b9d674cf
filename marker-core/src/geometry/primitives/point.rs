use crate::geometry::Transformation;
use crate::geometry::geo_traits::{Transformable, TransformableFrom};

/// Geometric primitive representing a point
#[derive(Debug, Clone, PartialEq, Copy, Default)]
pub struct Point(pub f64, pub f64);

impl Transformable for Point {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        let Point(x, y) = self;
        (*x, *y) = transform_formula(*x, *y, t);
        self
    }
}

impl TransformableFrom for Point {
    fn transform_from(&mut self, reference: &Self, t: &Transformation) -> &mut Self {
        let Point(x, y) = self;
        (*x, *y) = transform_formula(reference.0, reference.1, t);
        self
    }
}

#[inline(always)]
fn transform_formula(x: f64, y: f64, t: &Transformation) -> (f64, f64) {
    let m = t.matrix();

    let t_x = m[0][0].into_inner() * x + m[0][1].into_inner() * y + m[0][2].into_inner();
    let t_y = m[1][0].into_inner() * x + m[1][1].into_inner() * y + m[1][2].into_inner();

    (t_x, t_y)
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.0, p.1)
    }
}

impl From<(f64, f64)> for Point {
    fn from(p: (f64, f64)) -> Self {
        Point(p.0, p.1)
    }
}
