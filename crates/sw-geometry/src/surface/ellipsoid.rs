//! Ellipsoid surface.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use sw_core::Result;
use sw_math::{DVec3, LocalCoordinate, LocalTangent, Point3, Vector3};

use super::{ShapeParameters, SurfaceGeometry, SurfaceKind};

/// An ellipsoid with semi-axes `A` (x), `C` (y, up) and `B` (z).
///
/// `X(u, v) = (A cos(u) sin(v), C cos(v), B sin(u) sin(v))`
///
/// `u` is longitude and `v` is the polar angle measured from +y. The chart
/// breaks down at the poles, `v ≡ 0 (mod π)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ellipsoid {
    params: ShapeParameters,
    singular_radius: f64,
}

impl Ellipsoid {
    /// Angular radius around each pole treated as singular.
    pub const DEFAULT_SINGULAR_RADIUS: f64 = 0.05;

    pub fn new(params: ShapeParameters) -> Self {
        Self {
            params,
            singular_radius: Self::DEFAULT_SINGULAR_RADIUS,
        }
    }

    pub fn sphere(radius: f64) -> Self {
        Self::new(ShapeParameters::uniform(radius))
    }

    pub fn with_singular_radius(mut self, radius: f64) -> Self {
        self.singular_radius = radius;
        self
    }

    pub fn singular_radius(&self) -> f64 {
        self.singular_radius
    }

    fn partials(&self, local: LocalCoordinate) -> (Vector3, Vector3) {
        let ShapeParameters { a, b, c } = self.params;
        let (su, cu) = local.x.sin_cos();
        let (sv, cv) = local.y.sin_cos();
        let xu = DVec3::new(-a * su * sv, 0.0, b * cu * sv);
        let xv = DVec3::new(a * cu * cv, -c * sv, b * su * cv);
        (xu, xv)
    }
}

impl SurfaceGeometry for Ellipsoid {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Ellipsoid
    }

    fn parameters(&self) -> ShapeParameters {
        self.params
    }

    fn set_parameters(&mut self, params: ShapeParameters) {
        tracing::debug!(?params, "ellipsoid parameters updated");
        self.params = params;
    }

    fn mapping(&self, local: LocalCoordinate) -> Point3 {
        let ShapeParameters { a, b, c } = self.params;
        let (su, cu) = local.x.sin_cos();
        let (sv, cv) = local.y.sin_cos();
        DVec3::new(a * cu * sv, c * cv, b * su * sv)
    }

    fn pushforward(&self, local: LocalCoordinate, tangent: LocalTangent) -> Vector3 {
        let (xu, xv) = self.partials(local);
        xu * tangent.x + xv * tangent.y
    }

    fn pullback(&self, local: LocalCoordinate, tangent: Vector3) -> LocalTangent {
        let ShapeParameters { a, b, c } = self.params;
        let (su, cu) = local.x.sin_cos();
        let sv = local.y.sin();
        // Both components divide by sin(v), which vanishes at the poles.
        let du = (tangent.z / b * cu - tangent.x / a * su) / sv;
        let dv = -tangent.y / (c * sv);
        LocalTangent::new(du, dv)
    }

    fn form2_e(&self, local: LocalCoordinate) -> f64 {
        let ShapeParameters { a, b, .. } = self.params;
        let (su, cu) = local.x.sin_cos();
        let sv = local.y.sin();
        let xuu = DVec3::new(-a * cu * sv, 0.0, -b * su * sv);
        xuu.dot(self.unit_normal(local))
    }

    fn form2_f(&self, local: LocalCoordinate) -> f64 {
        let ShapeParameters { a, b, .. } = self.params;
        let (su, cu) = local.x.sin_cos();
        let cv = local.y.cos();
        let xuv = DVec3::new(-a * su * cv, 0.0, b * cu * cv);
        xuv.dot(self.unit_normal(local))
    }

    fn form2_g(&self, local: LocalCoordinate) -> f64 {
        // X_vv = -X for this parameterization.
        -self.mapping(local).dot(self.unit_normal(local))
    }

    fn unit_normal(&self, local: LocalCoordinate) -> Vector3 {
        let ShapeParameters { a, b, c } = self.params;
        let (su, cu) = local.x.sin_cos();
        let (sv, cv) = local.y.sin_cos();
        // Inward gradient of x²/A² + y²/C² + z²/B².
        -DVec3::new(cu * sv / a, cv / c, su * sv / b).normalize()
    }

    fn in_singular_region(&self, local: LocalCoordinate) -> Result<bool> {
        let r = local.y.rem_euclid(PI);
        Ok(r < self.singular_radius || PI - r < self.singular_radius)
    }
}
