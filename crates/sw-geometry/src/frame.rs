//! A tracked point on a surface with its tangent frame.

use sw_core::{Result, SurfError};
use sw_math::{
    project_on_plane, rotate_about_axis, DVec2, LocalCoordinate, LocalTangent, Point3, Vector3,
};

use crate::surface::SurfaceGeometry;

/// One point on a surface, tracked in local coordinates.
///
/// The global position, tangents, normal and forward direction are always
/// the image of the current local coordinate; every mutation recomputes
/// them. The forward direction is carried along by projecting it onto each
/// new tangent plane, a first-order approximation of parallel transport that
/// drifts with step size and path curvature.
#[derive(Clone)]
pub struct SurfaceFrame<'g> {
    geometry: &'g dyn SurfaceGeometry,
    local: LocalCoordinate,
    position: Point3,
    u_tangent: Vector3,
    v_tangent: Vector3,
    normal: Vector3,
    forward: Vector3,
}

impl<'g> SurfaceFrame<'g> {
    /// Frame at the chart origin `(0, 0)`.
    pub fn new(geometry: &'g dyn SurfaceGeometry) -> Self {
        Self::at(geometry, LocalCoordinate::ZERO)
    }

    /// Frame at `local`. The initial forward direction is the image of the
    /// local v direction.
    pub fn at(geometry: &'g dyn SurfaceGeometry, local: LocalCoordinate) -> Self {
        let forward = geometry.pushforward(local, DVec2::Y).normalize_or_zero();
        let mut frame = Self {
            geometry,
            local,
            position: Point3::ZERO,
            u_tangent: Vector3::ZERO,
            v_tangent: Vector3::ZERO,
            normal: Vector3::ZERO,
            forward,
        };
        frame.recompute();
        frame
    }

    /// Re-evaluate every derived field from the local coordinate.
    ///
    /// Call after the geometry's parameters change.
    pub fn recompute(&mut self) {
        let g = self.geometry;
        self.position = g.mapping(self.local);
        self.u_tangent = g.pushforward(self.local, DVec2::X);
        self.v_tangent = g.pushforward(self.local, DVec2::Y);
        self.normal = self.u_tangent.cross(self.v_tangent);

        let transported = project_on_plane(self.forward, self.normal).normalize_or_zero();
        // Forward parallel to the normal has no tangent image; restart from u.
        self.forward = if transported == Vector3::ZERO {
            self.u_tangent.normalize_or_zero()
        } else {
            transported
        };
    }

    /// Move to `local` without consulting the singular-region test.
    ///
    /// Moving into a singular region yields non-finite frame data; use
    /// [`try_move_to`](Self::try_move_to) for a checked move.
    pub fn move_to(&mut self, local: LocalCoordinate) {
        self.local = local;
        self.recompute();
    }

    /// Unchecked move by a local offset.
    pub fn move_by(&mut self, delta: LocalTangent) {
        self.move_to(self.local + delta);
    }

    /// Move to `local` unless it lies in a singular region.
    ///
    /// # Errors
    /// [`SurfError::SingularRegion`] leaves the frame unchanged. Surfaces
    /// without a singular-region test propagate [`SurfError::Unsupported`].
    pub fn try_move_to(&mut self, local: LocalCoordinate) -> Result<()> {
        if self.geometry.in_singular_region(local)? {
            tracing::debug!(u = local.x, v = local.y, "rejected move into singular region");
            return Err(SurfError::SingularRegion {
                u: local.x,
                v: local.y,
            });
        }
        self.move_to(local);
        Ok(())
    }

    /// Local offset that walks `distance` along `direction` projected onto
    /// the current tangent plane.
    pub fn step(&self, direction: Vector3, distance: f64) -> LocalTangent {
        let planar = project_on_plane(direction, self.normal).normalize_or_zero() * distance;
        self.geometry.pullback(self.local, planar)
    }

    /// Checked walk of `distance` along `direction`.
    ///
    /// # Errors
    /// Same as [`try_move_to`](Self::try_move_to).
    pub fn walk(&mut self, direction: Vector3, distance: f64) -> Result<()> {
        let delta = self.step(direction, distance);
        self.try_move_to(self.local + delta)
    }

    /// Rotate the forward direction by `degrees` about the normal.
    pub fn turn(&mut self, degrees: f64) {
        self.forward = rotate_about_axis(self.forward, self.normal, degrees);
    }

    pub fn geometry(&self) -> &'g dyn SurfaceGeometry {
        self.geometry
    }

    pub fn local(&self) -> LocalCoordinate {
        self.local
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn u_tangent(&self) -> Vector3 {
        self.u_tangent
    }

    pub fn v_tangent(&self) -> Vector3 {
        self.v_tangent
    }

    /// `u_tangent x v_tangent`, not normalized.
    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    pub fn unit_normal(&self) -> Vector3 {
        self.normal.normalize_or_zero()
    }

    /// Unit forward direction carried by approximate parallel transport.
    pub fn forward(&self) -> Vector3 {
        self.forward
    }
}

impl std::fmt::Debug for SurfaceFrame<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceFrame")
            .field("surface", &self.geometry.kind())
            .field("local", &self.local)
            .field("position", &self.position)
            .field("normal", &self.normal)
            .field("forward", &self.forward)
            .finish()
    }
}
