use crate::geometry::Transformation;
use crate::geometry::primitives::Point;
use crate::geometry::primitives::Rect;

/// Trait for types that can detect collisions between `Self` and `T`.
pub trait CollidesWith<T> {
    fn collides_with(&self, other: &T) -> bool;
}

/// Trait for types that can detect 'almost-collisions' between `Self` and `T`.
///
/// Two objects that are within [`GEOM_TOLERANCE`](crate::geometry::GEOM_TOLERANCE) of each other
/// are considered as colliding. This errs on the side of false positives, so that floating point
/// noise never lets two shapes slide into each other.
pub trait AlmostCollidesWith<T> {
    fn almost_collides_with(&self, other: &T) -> bool;
}

/// Trait for types that can compute the minimum distance between `Self` and `T`.
pub trait DistanceTo<T> {
    /// Minimum distance between two primitives. Will be 0 in case of a collision.
    fn distance_to(&self, other: &T) -> f64;

    /// Squared version of [DistanceTo::distance_to]
    fn sq_distance_to(&self, other: &T) -> f64;
}

/// Trait for types that can be modified by a [`Transformation`].
pub trait Transformable: Clone {
    /// Applies a transformation to `self`.
    fn transform(&mut self, t: &Transformation) -> &mut Self;

    /// Applies a transformation to a clone.
    fn transform_clone(&self, t: &Transformation) -> Self {
        let mut clone = self.clone();
        clone.transform(t);
        clone
    }
}

/// Trait for types that can be modified based on a reference object with a [`Transformation`] applied.
///
/// Useful when repeatedly transforming a single shape without having to reallocate new memory each time.
/// Because every call starts again from the reference, no floating point error accumulates.
pub trait TransformableFrom: Transformable {
    /// Applies a transformation on the reference object and stores the result in `self`.
    fn transform_from(&mut self, reference: &Self, t: &Transformation) -> &mut Self;
}

/// Trait for shared properties of geometric primitives.
pub trait Shape {
    /// Geometric center of the shape
    fn centroid(&self) -> Point;

    /// Area of the interior of the shape
    fn area(&self) -> f64;

    /// Bounding box of the shape
    fn bbox(&self) -> Rect;
}
