//! One-sheeted hyperboloid surface.

use serde::{Deserialize, Serialize};
use sw_core::{Result, SurfError};
use sw_math::{DVec3, LocalCoordinate, LocalTangent, Point3, Vector3};

use super::{ShapeParameters, SurfaceGeometry, SurfaceKind};

/// A one-sheeted hyperboloid `(x/A)² + (z/B)² - (y/C)² = 1` around the y
/// axis.
///
/// `X(u, v) = (A cosh(v) cos(u), C sinh(v), B cosh(v) sin(u))`
///
/// No singular-region test is established for this chart, so
/// [`in_singular_region`](SurfaceGeometry::in_singular_region) always fails
/// with [`SurfError::Unsupported`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneSheetedHyperboloid {
    params: ShapeParameters,
}

impl OneSheetedHyperboloid {
    pub fn new(params: ShapeParameters) -> Self {
        Self { params }
    }
}

impl SurfaceGeometry for OneSheetedHyperboloid {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::OneSheetedHyperboloid
    }

    fn parameters(&self) -> ShapeParameters {
        self.params
    }

    fn set_parameters(&mut self, params: ShapeParameters) {
        tracing::debug!(?params, "hyperboloid parameters updated");
        self.params = params;
    }

    fn mapping(&self, local: LocalCoordinate) -> Point3 {
        let ShapeParameters { a, b, c } = self.params;
        let (su, cu) = local.x.sin_cos();
        let (sh, ch) = (local.y.sinh(), local.y.cosh());
        DVec3::new(a * ch * cu, c * sh, b * ch * su)
    }

    fn pushforward(&self, local: LocalCoordinate, tangent: LocalTangent) -> Vector3 {
        let ShapeParameters { a, b, c } = self.params;
        let (su, cu) = local.x.sin_cos();
        let (sh, ch) = (local.y.sinh(), local.y.cosh());
        let xu = DVec3::new(-a * ch * su, 0.0, b * ch * cu);
        let xv = DVec3::new(a * sh * cu, c * ch, b * sh * su);
        xu * tangent.x + xv * tangent.y
    }

    fn pullback(&self, local: LocalCoordinate, tangent: Vector3) -> LocalTangent {
        let ShapeParameters { a, b, c } = self.params;
        let (su, cu) = local.x.sin_cos();
        let ch = local.y.cosh();
        let du = (tangent.z / b * cu - tangent.x / a * su) / ch;
        let dv = tangent.y / (c * ch);
        LocalTangent::new(du, dv)
    }

    fn form2_e(&self, local: LocalCoordinate) -> f64 {
        let ShapeParameters { a, b, .. } = self.params;
        let (su, cu) = local.x.sin_cos();
        let ch = local.y.cosh();
        let xuu = DVec3::new(-a * ch * cu, 0.0, -b * ch * su);
        xuu.dot(self.unit_normal(local))
    }

    fn form2_f(&self, local: LocalCoordinate) -> f64 {
        let ShapeParameters { a, b, .. } = self.params;
        let (su, cu) = local.x.sin_cos();
        let sh = local.y.sinh();
        let xuv = DVec3::new(-a * sh * su, 0.0, b * sh * cu);
        xuv.dot(self.unit_normal(local))
    }

    fn form2_g(&self, local: LocalCoordinate) -> f64 {
        // X_vv = X for this parameterization.
        self.mapping(local).dot(self.unit_normal(local))
    }

    fn unit_normal(&self, local: LocalCoordinate) -> Vector3 {
        let ShapeParameters { a, b, c } = self.params;
        let (su, cu) = local.x.sin_cos();
        let (sh, ch) = (local.y.sinh(), local.y.cosh());
        // Negated gradient of (x/A)² + (z/B)² - (y/C)², pointing at the axis.
        DVec3::new(-ch * cu / a, sh / c, -ch * su / b).normalize()
    }

    fn in_singular_region(&self, _local: LocalCoordinate) -> Result<bool> {
        Err(SurfError::Unsupported {
            surface: SurfaceKind::OneSheetedHyperboloid.name(),
            operation: "in_singular_region",
        })
    }
}
