//! Ray picking against tessellated meshes.

use serde::{Deserialize, Serialize};
use sw_core::Tolerance;
use sw_math::{Point3, Ray};

use crate::MeshBuffers;

/// Nearest intersection of a ray with a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub point: Point3,
    /// Distance along the ray.
    pub distance: f64,
    pub triangle: usize,
}

impl MeshBuffers {
    /// Closest hit of `ray` on any triangle, ignoring face orientation.
    pub fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        self.raycast_with(ray, &Tolerance::default())
    }

    /// [`raycast`](Self::raycast) with an explicit parallel-ray threshold.
    pub fn raycast_with(&self, ray: &Ray, tolerance: &Tolerance) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;
        for t in 0..self.triangle_count() {
            let Some([p0, p1, p2]) = self.triangle(t) else {
                continue;
            };
            let Some(distance) = intersect_triangle(ray, [p0, p1, p2], tolerance) else {
                continue;
            };
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(RayHit {
                    point: ray.at(distance),
                    distance,
                    triangle: t,
                });
            }
        }
        best
    }
}

/// Möller–Trumbore ray/triangle test. Returns the distance along the ray.
fn intersect_triangle(
    ray: &Ray,
    [p0, p1, p2]: [Point3; 3],
    tolerance: &Tolerance,
) -> Option<f64> {
    let e1 = p1 - p0;
    let e2 = p2 - p0;
    let pvec = ray.direction.cross(e2);
    let det = e1.dot(pvec);
    if tolerance.is_parallel(det) {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = ray.origin - p0;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(e1);
    let v = ray.direction.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(qvec) * inv_det;
    (t >= 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_math::DVec3;

    fn floor_quad() -> MeshBuffers {
        MeshBuffers {
            positions: vec![
                DVec3::new(-1.0, 0.0, -1.0),
                DVec3::new(-1.0, 0.0, 1.0),
                DVec3::new(1.0, 0.0, -1.0),
                DVec3::new(1.0, 0.0, 1.0),
            ],
            uvs: vec![],
            indices: vec![0, 2, 3, 0, 3, 1],
            normals: vec![],
            grid: (2, 2),
        }
    }

    #[test]
    fn test_hit_from_above_and_below() {
        let mesh = floor_quad();
        let down = Ray::new(DVec3::new(0.2, 5.0, 0.3), DVec3::new(0.0, -1.0, 0.0));
        let hit = mesh.raycast(&down).unwrap();
        assert!((hit.point - DVec3::new(0.2, 0.0, 0.3)).length() < 1e-12);
        assert!((hit.distance - 5.0).abs() < 1e-12);

        let up = Ray::new(DVec3::new(0.2, -2.0, 0.3), DVec3::new(0.0, 1.0, 0.0));
        assert!(mesh.raycast(&up).is_some());
    }

    #[test]
    fn test_miss() {
        let mesh = floor_quad();
        let outside = Ray::new(DVec3::new(3.0, 5.0, 0.0), DVec3::new(0.0, -1.0, 0.0));
        assert!(mesh.raycast(&outside).is_none());
        let away = Ray::new(DVec3::new(0.0, 5.0, 0.0), DVec3::new(0.0, 1.0, 0.0));
        assert!(mesh.raycast(&away).is_none());
        let parallel = Ray::new(DVec3::new(-5.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0));
        assert!(mesh.raycast(&parallel).is_none());
    }

    #[test]
    fn test_grazing_ray_respects_parallel_tolerance() {
        let mesh = floor_quad();
        // Determinant is about 4e-3 for this nearly horizontal ray.
        let grazing = Ray::new(DVec3::new(-5.0, 0.005, 0.3), DVec3::new(1.0, -1e-3, 0.0));
        assert!(mesh.raycast(&grazing).is_some());
        let strict = Tolerance {
            parallel: 1e-2,
            ..Tolerance::default()
        };
        assert!(mesh.raycast_with(&grazing, &strict).is_none());
    }

    #[test]
    fn test_skips_triangles_with_bad_indices() {
        let mut mesh = floor_quad();
        let mut indices = vec![0, 2, 42];
        indices.extend_from_slice(&mesh.indices);
        mesh.indices = indices;
        let down = Ray::new(DVec3::new(0.2, 5.0, 0.3), DVec3::new(0.0, -1.0, 0.0));
        let hit = mesh.raycast(&down).unwrap();
        assert!(hit.triangle >= 1);
    }

    #[test]
    fn test_nearest_of_two_layers() {
        let mut mesh = floor_quad();
        let lifted: Vec<_> = mesh
            .positions
            .iter()
            .map(|p| *p + DVec3::new(0.0, 2.0, 0.0))
            .collect();
        mesh.positions.extend(lifted);
        mesh.indices.extend([4, 6, 7, 4, 7, 5]);
        let down = Ray::new(DVec3::new(0.1, 5.0, 0.1), DVec3::new(0.0, -1.0, 0.0));
        let hit = mesh.raycast(&down).unwrap();
        assert!((hit.point.y - 2.0).abs() < 1e-12);
        assert!(hit.triangle >= 2);
    }
}
