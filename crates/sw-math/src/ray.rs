use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A half-line used to pick points on a tessellated surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Ray starting at `origin` and passing through `target`.
    pub fn towards(origin: Point3, target: Point3) -> Self {
        Self::new(origin, target - origin)
    }

    /// Point along the ray at distance `t`.
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Distance from a point to the ray (clamped to the ray origin).
    pub fn distance_to_point(&self, point: Point3) -> f64 {
        let t = (point - self.origin).dot(self.direction).max(0.0);
        (point - self.at(t)).length()
    }
}
