use crate::geometry::GEOM_TOLERANCE;
use crate::geometry::geo_traits::{AlmostCollidesWith, CollidesWith};
use crate::geometry::primitives::Point;
use anyhow::Result;
use anyhow::ensure;

///Axis-aligned rectangle
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    pub fn try_new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self> {
        ensure!(
            x_min < x_max && y_min < y_max,
            "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Returns the four corners of `self`, counterclockwise starting from the bottom left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point(self.x_min, self.y_min),
            Point(self.x_max, self.y_min),
            Point(self.x_max, self.y_max),
            Point(self.x_min, self.y_max),
        ]
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// The larger of both dimensions
    pub fn extent(&self) -> f64 {
        f64::max(self.width(), self.height())
    }

    /// True if `other` lies within `self`, allowing [`GEOM_TOLERANCE`] of overshoot on every side.
    pub fn almost_contains(&self, other: &Rect) -> bool {
        other.x_min >= self.x_min - GEOM_TOLERANCE
            && other.y_min >= self.y_min - GEOM_TOLERANCE
            && other.x_max <= self.x_max + GEOM_TOLERANCE
            && other.y_max <= self.y_max + GEOM_TOLERANCE
    }
}

impl CollidesWith<Rect> for Rect {
    #[inline(always)]
    fn collides_with(&self, other: &Rect) -> bool {
        f64::max(self.x_min, other.x_min) <= f64::min(self.x_max, other.x_max)
            && f64::max(self.y_min, other.y_min) <= f64::min(self.y_max, other.y_max)
    }
}

impl AlmostCollidesWith<Rect> for Rect {
    #[inline(always)]
    fn almost_collides_with(&self, other: &Rect) -> bool {
        f64::max(self.x_min, other.x_min) <= f64::min(self.x_max, other.x_max) + GEOM_TOLERANCE
            && f64::max(self.y_min, other.y_min)
                <= f64::min(self.y_max, other.y_max) + GEOM_TOLERANCE
    }
}

impl CollidesWith<Point> for Rect {
    #[inline(always)]
    fn collides_with(&self, point: &Point) -> bool {
        let Point(x, y) = *point;
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_rects_almost_collide() {
        let a = Rect::try_new(0.0, 0.0, 4.0, 4.0).unwrap();
        let b = Rect::try_new(4.0, 0.0, 8.0, 4.0).unwrap();
        let c = Rect::try_new(4.5, 0.0, 8.5, 4.0).unwrap();
        assert!(a.almost_collides_with(&b));
        assert!(!a.almost_collides_with(&c));
        assert!(!a.collides_with(&c));
    }

    #[test]
    fn extent_is_the_larger_dimension() {
        let r = Rect::try_new(1.0, -1.0, 5.0, 7.0).unwrap();
        assert_eq!(r.width(), 4.0);
        assert_eq!(r.extent(), 8.0);
        assert!(Rect::try_new(0.0, 0.0, 3.0, 0.0).is_err());
    }

    #[test]
    fn containment_allows_tolerance() {
        let sheet = Rect::try_new(0.0, 0.0, 10.0, 4.0).unwrap();
        let inside = Rect::try_new(6.0, 0.0, 10.0 + 1e-9, 4.0).unwrap();
        let outside = Rect::try_new(6.5, 0.0, 10.5, 4.0).unwrap();
        assert!(sheet.almost_contains(&inside));
        assert!(!sheet.almost_contains(&outside));
    }
}
