pub mod ray;
pub mod vector;

pub use glam::{DQuat, DVec2, DVec3};
pub use ray::Ray;
pub use vector::{project_on_plane, rotate_about_axis};

/// A `(u, v)` pair inside a surface chart.
pub type LocalCoordinate = DVec2;
/// A tangent vector expressed in local `(du, dv)` components.
pub type LocalTangent = DVec2;
pub type Point3 = DVec3;
pub type Vector3 = DVec3;
