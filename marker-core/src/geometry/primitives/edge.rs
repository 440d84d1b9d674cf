use crate::geometry::GEOM_TOLERANCE;
use crate::geometry::geo_traits::{AlmostCollidesWith, CollidesWith, DistanceTo};
use crate::geometry::primitives::Point;
use anyhow::Result;
use anyhow::ensure;

/// Line segment between two [`Point`]s
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    pub fn new(start: Point, end: Point) -> Result<Self> {
        ensure!(start != end, "degenerate edge, {start:?} == {end:?}");
        Ok(Edge { start, end })
    }

    /// Returns the closest point which lies on the edge to the given point
    pub fn closest_point_on_edge(&self, point: &Point) -> Point {
        //from https://stackoverflow.com/a/6853926
        let Point(x1, y1) = self.start;
        let Point(x2, y2) = self.end;
        let Point(x, y) = point;

        let a = x - x1;
        let b = y - y1;
        let c = x2 - x1;
        let d = y2 - y1;

        let dot = a * c + b * d;
        let len_sq = c * c + d * d;
        let mut param = -1.0;
        if len_sq != 0.0 {
            param = dot / len_sq;
        }
        let (xx, yy) = match param {
            p if p < 0.0 => (x1, y1),              //start is the closest point
            p if p > 1.0 => (x2, y2),              //end is the closest point
            _ => (x1 + param * c, y1 + param * d), //closest point is on the edge
        };

        Point(xx, yy)
    }

    pub fn x_min(&self) -> f64 {
        f64::min(self.start.0, self.end.0)
    }

    pub fn y_min(&self) -> f64 {
        f64::min(self.start.1, self.end.1)
    }

    pub fn x_max(&self) -> f64 {
        f64::max(self.start.0, self.end.0)
    }

    pub fn y_max(&self) -> f64 {
        f64::max(self.start.1, self.end.1)
    }
}

impl DistanceTo<Point> for Edge {
    #[inline(always)]
    fn distance_to(&self, point: &Point) -> f64 {
        f64::sqrt(self.sq_distance_to(point))
    }

    #[inline(always)]
    fn sq_distance_to(&self, point: &Point) -> f64 {
        let Point(x, y) = point;
        let Point(xx, yy) = self.closest_point_on_edge(point);

        let (dx, dy) = (x - xx, y - yy);
        dx.powi(2) + dy.powi(2)
    }
}

impl DistanceTo<Edge> for Edge {
    #[inline(always)]
    fn distance_to(&self, other: &Edge) -> f64 {
        f64::sqrt(self.sq_distance_to(other))
    }

    fn sq_distance_to(&self, other: &Edge) -> f64 {
        if self.collides_with(other) {
            return 0.0;
        }
        //non-crossing segments: the minimum distance is attained at one of the four endpoints
        [
            self.sq_distance_to(&other.start),
            self.sq_distance_to(&other.end),
            other.sq_distance_to(&self.start),
            other.sq_distance_to(&self.end),
        ]
        .into_iter()
        .fold(f64::INFINITY, f64::min)
    }
}

impl CollidesWith<Edge> for Edge {
    /// True if both segments properly cross each other.
    /// Touching and collinear overlap are left to [`AlmostCollidesWith`].
    #[inline(always)]
    fn collides_with(&self, other: &Edge) -> bool {
        if f64::max(self.x_min(), other.x_min()) > f64::min(self.x_max(), other.x_max())
            || f64::max(self.y_min(), other.y_min()) > f64::min(self.y_max(), other.y_max())
        {
            //bounding boxes do not overlap
            return false;
        }
        let o1 = orientation(self.start, self.end, other.start);
        let o2 = orientation(self.start, self.end, other.end);
        let o3 = orientation(other.start, other.end, self.start);
        let o4 = orientation(other.start, other.end, self.end);

        o1 * o2 < 0.0 && o3 * o4 < 0.0
    }
}

impl AlmostCollidesWith<Edge> for Edge {
    #[inline(always)]
    fn almost_collides_with(&self, other: &Edge) -> bool {
        if f64::max(self.x_min(), other.x_min()) > f64::min(self.x_max(), other.x_max()) + GEOM_TOLERANCE
            || f64::max(self.y_min(), other.y_min())
                > f64::min(self.y_max(), other.y_max()) + GEOM_TOLERANCE
        {
            return false;
        }
        self.sq_distance_to(other) <= GEOM_TOLERANCE * GEOM_TOLERANCE
    }
}

/// Twice the signed area of the triangle (a, b, c): positive if c lies left of a→b.
#[inline(always)]
fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: (f64, f64), b: (f64, f64)) -> Edge {
        Edge::new(a.into(), b.into()).unwrap()
    }

    #[test]
    fn crossing_edges_collide() {
        let e1 = edge((0.0, 0.0), (2.0, 2.0));
        let e2 = edge((0.0, 2.0), (2.0, 0.0));
        assert!(e1.collides_with(&e2));
        assert!(e1.almost_collides_with(&e2));
        assert_eq!(e1.sq_distance_to(&e2), 0.0);
    }

    #[test]
    fn touching_edges_only_almost_collide() {
        let e1 = edge((0.0, 0.0), (2.0, 0.0));
        let e2 = edge((2.0, 0.0), (2.0, 2.0));
        assert!(!e1.collides_with(&e2));
        assert!(e1.almost_collides_with(&e2));

        let collinear = edge((1.0, 0.0), (3.0, 0.0));
        assert!(!e1.collides_with(&collinear));
        assert!(e1.almost_collides_with(&collinear));
    }

    #[test]
    fn separated_edges_do_not_collide() {
        let e1 = edge((0.0, 0.0), (2.0, 0.0));
        let e2 = edge((0.0, 0.5), (2.0, 0.5));
        assert!(!e1.almost_collides_with(&e2));
        assert!((e1.distance_to(&e2) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn degenerate_edge_is_rejected() {
        assert!(Edge::new(Point(1.0, 1.0), Point(1.0, 1.0)).is_err());
    }
}
