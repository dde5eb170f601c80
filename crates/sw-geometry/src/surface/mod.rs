//! Surface geometry contract and the quadric implementations.

mod ellipsoid;
mod elliptic_paraboloid;
mod one_sheeted_hyperboloid;

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};
use sw_core::{Result, SurfError, Validate};
use sw_math::{DVec2, LocalCoordinate, LocalTangent, Point3, Vector3};

use crate::forms::FundamentalForms;

pub use ellipsoid::Ellipsoid;
pub use elliptic_paraboloid::EllipticParaboloid;
pub use one_sheeted_hyperboloid::OneSheetedHyperboloid;

/// The three scalars `(A, B, C)` that pick one member of a surface family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl ShapeParameters {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// `A = B = C = value`.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value)
    }
}

impl Default for ShapeParameters {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

impl Validate for ShapeParameters {
    fn validate(&self) -> Result<()> {
        for (name, value) in [("a", self.a), ("b", self.b), ("c", self.c)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SurfError::InvalidParameter(format!(
                    "shape parameter {name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Rectangular window `[u_min, u_max] x [v_min, v_max]` of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterDomain {
    pub u_min: f64,
    pub u_max: f64,
    pub v_min: f64,
    pub v_max: f64,
}

impl ParameterDomain {
    pub fn new(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Self {
            u_min,
            u_max,
            v_min,
            v_max,
        }
    }

    pub fn contains(&self, local: LocalCoordinate) -> bool {
        local.x >= self.u_min.min(self.u_max)
            && local.x <= self.u_min.max(self.u_max)
            && local.y >= self.v_min.min(self.v_max)
            && local.y <= self.v_min.max(self.v_max)
    }
}

impl Validate for ParameterDomain {
    fn validate(&self) -> Result<()> {
        let all_finite = [self.u_min, self.u_max, self.v_min, self.v_max]
            .iter()
            .all(|x| x.is_finite());
        if !all_finite {
            return Err(SurfError::InvalidParameter(format!(
                "parameter domain must be finite, got {self:?}"
            )));
        }
        Ok(())
    }
}

/// Surface families a host can select by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Ellipsoid,
    EllipticParaboloid,
    OneSheetedHyperboloid,
}

impl SurfaceKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Ellipsoid => "Ellipsoid",
            Self::EllipticParaboloid => "EllipticParaboloid",
            Self::OneSheetedHyperboloid => "OneSheetedHyperboloid",
        }
    }

    /// Instantiate the surface with the given parameters.
    pub fn build(self, params: ShapeParameters) -> Box<dyn SurfaceGeometry> {
        match self {
            Self::Ellipsoid => Box::new(Ellipsoid::new(params)),
            Self::EllipticParaboloid => Box::new(EllipticParaboloid::new(params)),
            Self::OneSheetedHyperboloid => Box::new(OneSheetedHyperboloid::new(params)),
        }
    }

    /// Chart window covering the usual extent of the surface.
    pub fn default_domain(self) -> ParameterDomain {
        match self {
            Self::Ellipsoid => ParameterDomain::new(0.0, TAU, 0.0, PI),
            Self::EllipticParaboloid => ParameterDomain::new(0.0, TAU, 0.0, 1.0),
            Self::OneSheetedHyperboloid => ParameterDomain::new(0.0, TAU, -1.0, 1.0),
        }
    }
}

/// A parametric surface `X(u, v)` with closed-form first and second
/// derivatives.
///
/// Every method is a pure function of the local coordinate and the current
/// [`ShapeParameters`]. Near a singular region the chart degenerates and
/// [`pushforward`](Self::pushforward)/[`pullback`](Self::pullback) may return
/// non-finite values; callers consult
/// [`in_singular_region`](Self::in_singular_region) before moving into one.
pub trait SurfaceGeometry: Send + Sync {
    fn kind(&self) -> SurfaceKind;

    fn parameters(&self) -> ShapeParameters;

    fn set_parameters(&mut self, params: ShapeParameters);

    /// The parameterization `X(u, v)`.
    fn mapping(&self, local: LocalCoordinate) -> Point3;

    /// Apply the Jacobian of `X` at `local` to a local tangent vector.
    fn pushforward(&self, local: LocalCoordinate, tangent: LocalTangent) -> Vector3;

    /// Left inverse of [`pushforward`](Self::pushforward).
    ///
    /// `tangent` must already lie in the tangent plane; any normal component
    /// produces meaningless output.
    fn pullback(&self, local: LocalCoordinate, tangent: Vector3) -> LocalTangent;

    fn form2_e(&self, local: LocalCoordinate) -> f64;

    fn form2_f(&self, local: LocalCoordinate) -> f64;

    fn form2_g(&self, local: LocalCoordinate) -> f64;

    /// Unit normal the second fundamental form is measured against.
    ///
    /// It points to the concave side of the quadric, so a sphere has
    /// positive normal curvature everywhere. Defined at chart singularities
    /// too.
    fn unit_normal(&self, local: LocalCoordinate) -> Vector3;

    /// Whether the chart degenerates at `local`.
    ///
    /// # Errors
    /// [`SurfError::Unsupported`] when the variant has no established test.
    fn in_singular_region(&self, local: LocalCoordinate) -> Result<bool>;

    /// Same as [`mapping`](Self::mapping) without building a coordinate.
    fn surface_point(&self, u: f64, v: f64) -> Point3 {
        self.mapping(DVec2::new(u, v))
    }

    /// Second fundamental form evaluated on a global tangent vector.
    fn form2(&self, local: LocalCoordinate, tangent: Vector3) -> f64 {
        let t = self.pullback(local, tangent);
        self.form2_e(local) * t.x * t.x
            + 2.0 * self.form2_f(local) * t.x * t.y
            + self.form2_g(local) * t.y * t.y
    }

    /// Normal curvature in the direction of `tangent` (any nonzero length).
    fn normal_curvature(&self, local: LocalCoordinate, tangent: Vector3) -> f64 {
        self.form2(local, tangent.normalize())
    }

    /// First and second fundamental form coefficients at `local`.
    fn fundamental_forms(&self, local: LocalCoordinate) -> FundamentalForms {
        let xu = self.pushforward(local, DVec2::X);
        let xv = self.pushforward(local, DVec2::Y);
        FundamentalForms {
            e_big: xu.dot(xu),
            f_big: xu.dot(xv),
            g_big: xv.dot(xv),
            e: self.form2_e(local),
            f: self.form2_f(local),
            g: self.form2_g(local),
        }
    }
}
