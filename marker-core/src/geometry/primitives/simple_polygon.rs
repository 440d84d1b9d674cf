use std::borrow::Borrow;

use anyhow::{Result, ensure};

use crate::geometry::GEOM_TOLERANCE;
use crate::geometry::Transformation;
use crate::geometry::geo_traits::{
    AlmostCollidesWith, CollidesWith, Shape, Transformable, TransformableFrom,
};
use crate::geometry::primitives::Edge;
use crate::geometry::primitives::Point;
use crate::geometry::primitives::Rect;

/// Geometric primitive representing a simple polygon: <https://en.wikipedia.org/wiki/Simple_polygon>
#[derive(Clone, Debug)]
pub struct SPolygon {
    /// Vertices of the polygon, ordered counterclockwise, without a repeated closing point
    pub points: Vec<Point>,
    /// Bounding box
    pub bbox: Rect,
    pub area: f64,
}

impl SPolygon {
    /// Creates a new simple polygon from its outline.
    /// Repeated consecutive points (including a closing point equal to the first) are dropped,
    /// clockwise outlines are reversed.
    /// Fails if fewer than 3 distinct points remain or if the outline encloses no area.
    pub fn try_new(points: Vec<Point>) -> Result<Self> {
        ensure!(
            points.iter().all(|p| p.0.is_finite() && p.1.is_finite()),
            "simple polygon contains non-finite coordinates: {:?}",
            points
        );
        let mut points = points;
        points.dedup();
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        ensure!(
            points.len() >= 3,
            "simple polygon must have at least 3 distinct points, got {}",
            points.len()
        );

        let area = SPolygon::calculate_area(&points);
        ensure!(
            area.is_finite(),
            "simple polygon area overflows: {:?}",
            points
        );
        let area = match area {
            area if area.abs() <= GEOM_TOLERANCE => {
                anyhow::bail!("simple polygon has no area: {:?}", points)
            }
            area if area < 0.0 => {
                //edges should always be ordered counterclockwise (positive area)
                points.reverse();
                -area
            }
            area => area,
        };
        let bbox = SPolygon::generate_bounding_box(&points);

        Ok(SPolygon { points, bbox, area })
    }

    pub fn get_point(&self, i: usize) -> Point {
        self.points[i]
    }

    pub fn get_edge(&self, i: usize) -> Edge {
        let j = (i + 1) % self.n_points();
        Edge {
            start: self.points[i],
            end: self.points[j],
        }
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.n_points()).map(move |i| self.get_edge(i))
    }

    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    fn generate_bounding_box(points: &[Point]) -> Rect {
        let (mut x_min, mut y_min) = (f64::MAX, f64::MAX);
        let (mut x_max, mut y_max) = (f64::MIN, f64::MIN);

        for point in points.iter() {
            x_min = x_min.min(point.0);
            y_min = y_min.min(point.1);
            x_max = x_max.max(point.0);
            y_max = y_max.max(point.1);
        }
        Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    //https://en.wikipedia.org/wiki/Shoelace_formula
    //counterclockwise = positive area, clockwise = negative area
    pub fn calculate_area(points: &[Point]) -> f64 {
        let mut sigma: f64 = 0.0;
        for i in 0..points.len() {
            //next point
            let j = (i + 1) % points.len();

            let (x_i, y_i) = points[i].into();
            let (x_j, y_j) = points[j].into();

            sigma += (y_i + y_j) * (x_i - x_j)
        }

        0.5 * sigma
    }
}

impl Shape for SPolygon {
    fn centroid(&self) -> Point {
        //based on: https://en.wikipedia.org/wiki/Centroid#Of_a_polygon

        let area = self.area();
        let mut c_x = 0.0;
        let mut c_y = 0.0;

        for i in 0..self.n_points() {
            let j = if i == self.n_points() - 1 { 0 } else { i + 1 };
            let Point(x_i, y_i) = self.get_point(i);
            let Point(x_j, y_j) = self.get_point(j);
            c_x += (x_i + x_j) * (x_i * y_j - x_j * y_i);
            c_y += (y_i + y_j) * (x_i * y_j - x_j * y_i);
        }

        c_x /= 6.0 * area;
        c_y /= 6.0 * area;

        (c_x, c_y).into()
    }

    fn area(&self) -> f64 {
        self.area
    }

    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl Transformable for SPolygon {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        //destructuring pattern to ensure that the code is updated when the struct changes
        let SPolygon {
            points,
            bbox,
            area: _,
        } = self;

        points.iter_mut().for_each(|p| {
            p.transform(t);
        });

        if t.is_reflection() {
            //a reflection flips the winding order, restore counterclockwise
            points.reverse();
        }

        *bbox = SPolygon::generate_bounding_box(points);

        self
    }
}

impl TransformableFrom for SPolygon {
    fn transform_from(&mut self, reference: &Self, t: &Transformation) -> &mut Self {
        //destructuring pattern to ensure that the code is updated when the struct changes
        let SPolygon {
            points,
            bbox,
            area: _,
        } = self;

        for (p, ref_p) in points.iter_mut().zip(&reference.points) {
            p.transform_from(ref_p, t);
        }

        if t.is_reflection() {
            points.reverse();
        }

        *bbox = SPolygon::generate_bounding_box(points);

        self
    }
}

impl CollidesWith<Point> for SPolygon {
    fn collides_with(&self, point: &Point) -> bool {
        //based on the ray casting algorithm: https://en.wikipedia.org/wiki/Point_in_polygon#Ray_casting_algorithm
        if !self.bbox.collides_with(point) {
            return false;
        }
        let Point(p_x, p_y) = *point;
        let mut inside = false;
        for edge in self.edge_iter() {
            let Point(s_x, s_y) = edge.start;
            let Point(e_x, e_y) = edge.end;
            //half-open rule: a vertex exactly at the height of the ray is only counted once
            if (s_y > p_y) != (e_y > p_y) {
                let x_cross = s_x + (p_y - s_y) * (e_x - s_x) / (e_y - s_y);
                if p_x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

impl AlmostCollidesWith<SPolygon> for SPolygon {
    /// Both polygons are treated as closed sets: outlines that touch, or come within
    /// [`GEOM_TOLERANCE`] of each other, collide.
    fn almost_collides_with(&self, other: &SPolygon) -> bool {
        if !self.bbox.almost_collides_with(&other.bbox) {
            return false;
        }

        //any pair of (almost) touching edges
        for e1 in self.edge_iter() {
            let e1_bbox = Rect {
                x_min: e1.x_min(),
                y_min: e1.y_min(),
                x_max: e1.x_max(),
                y_max: e1.y_max(),
            };
            if !e1_bbox.almost_collides_with(&other.bbox) {
                continue;
            }
            if other.edge_iter().any(|e2| e1.almost_collides_with(&e2)) {
                return true;
            }
        }

        //outlines are apart, the only remaining possibility is full containment
        self.collides_with(&other.points[0]) || other.collides_with(&self.points[0])
    }
}

impl<T> From<T> for SPolygon
where
    T: Borrow<Rect>,
{
    fn from(r: T) -> Self {
        let r = r.borrow();
        SPolygon {
            points: r.corners().to_vec(),
            bbox: *r,
            area: r.width() * r.height(),
        }
    }
}
