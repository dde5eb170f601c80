//! Elliptic paraboloid surface.

use serde::{Deserialize, Serialize};
use sw_core::Result;
use sw_math::{DVec3, LocalCoordinate, LocalTangent, Point3, Vector3};

use super::{ShapeParameters, SurfaceGeometry, SurfaceKind};

/// An upward-opening elliptic paraboloid `y/C = (x/A)² + (z/B)²` in polar
/// form.
///
/// `X(u, v) = (A v cos(u), C v², B v sin(u))`
///
/// `u` is the angle around the y axis and `v` the scaled radial distance.
/// The apex `v = 0` collapses every `u` to one point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EllipticParaboloid {
    params: ShapeParameters,
    singular_radius: f64,
}

impl EllipticParaboloid {
    /// Radius in `v` around the apex treated as singular.
    pub const DEFAULT_SINGULAR_RADIUS: f64 = 0.05;

    pub fn new(params: ShapeParameters) -> Self {
        Self {
            params,
            singular_radius: Self::DEFAULT_SINGULAR_RADIUS,
        }
    }

    pub fn with_singular_radius(mut self, radius: f64) -> Self {
        self.singular_radius = radius;
        self
    }

    pub fn singular_radius(&self) -> f64 {
        self.singular_radius
    }
}

impl SurfaceGeometry for EllipticParaboloid {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::EllipticParaboloid
    }

    fn parameters(&self) -> ShapeParameters {
        self.params
    }

    fn set_parameters(&mut self, params: ShapeParameters) {
        tracing::debug!(?params, "paraboloid parameters updated");
        self.params = params;
    }

    fn mapping(&self, local: LocalCoordinate) -> Point3 {
        let ShapeParameters { a, b, c } = self.params;
        let (su, cu) = local.x.sin_cos();
        let v = local.y;
        DVec3::new(a * v * cu, c * v * v, b * v * su)
    }

    fn pushforward(&self, local: LocalCoordinate, tangent: LocalTangent) -> Vector3 {
        let ShapeParameters { a, b, c } = self.params;
        let (su, cu) = local.x.sin_cos();
        let v = local.y;
        let xu = DVec3::new(-a * v * su, 0.0, b * v * cu);
        let xv = DVec3::new(a * cu, 2.0 * c * v, b * su);
        xu * tangent.x + xv * tangent.y
    }

    fn pullback(&self, local: LocalCoordinate, tangent: Vector3) -> LocalTangent {
        let ShapeParameters { a, b, .. } = self.params;
        let (su, cu) = local.x.sin_cos();
        let (sx, sz) = (tangent.x / a, tangent.z / b);
        LocalTangent::new((sz * cu - sx * su) / local.y, sx * cu + sz * su)
    }

    fn form2_e(&self, local: LocalCoordinate) -> f64 {
        let ShapeParameters { a, b, .. } = self.params;
        let (su, cu) = local.x.sin_cos();
        let v = local.y;
        let xuu = DVec3::new(-a * v * cu, 0.0, -b * v * su);
        xuu.dot(self.unit_normal(local))
    }

    fn form2_f(&self, local: LocalCoordinate) -> f64 {
        let ShapeParameters { a, b, .. } = self.params;
        let (su, cu) = local.x.sin_cos();
        let xuv = DVec3::new(-a * su, 0.0, b * cu);
        xuv.dot(self.unit_normal(local))
    }

    fn form2_g(&self, local: LocalCoordinate) -> f64 {
        2.0 * self.params.c * self.unit_normal(local).y
    }

    fn unit_normal(&self, local: LocalCoordinate) -> Vector3 {
        let ShapeParameters { a, b, c } = self.params;
        let (su, cu) = local.x.sin_cos();
        let v = local.y;
        // Gradient of y/C - (x/A)² - (z/B)², pointing into the bowl.
        DVec3::new(-2.0 * v * cu / a, 1.0 / c, -2.0 * v * su / b).normalize()
    }

    fn in_singular_region(&self, local: LocalCoordinate) -> Result<bool> {
        Ok(local.y.abs() < self.singular_radius)
    }
}
