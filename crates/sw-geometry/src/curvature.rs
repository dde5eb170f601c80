//! Normal-curvature sampling around a surface point.
//!
//! The sampler evaluates the normal curvature along `N` evenly spaced
//! tangent directions and takes the largest and smallest samples as the
//! principal curvatures. The estimate converges to the exact values as `N`
//! grows; [`FundamentalForms`](crate::FundamentalForms) gives the closed
//! form for comparison.

use serde::{Deserialize, Serialize};
use sw_core::{Result, SurfError};
use sw_math::{rotate_about_axis, LocalCoordinate, Point3, Vector3};

use crate::frame::SurfaceFrame;

/// Normal curvature measured along one unit tangent direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvatureSample {
    pub curvature: f64,
    pub direction: Vector3,
}

/// Line segment visualizing one sample: from the surface point along the
/// sampled direction, scaled by the curvature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvatureMarker {
    pub origin: Point3,
    pub tip: Point3,
    pub curvature: f64,
}

/// Ring of normal-curvature samples at a frame's current point.
#[derive(Debug, Clone)]
pub struct CurvatureSampler {
    directions: usize,
    local: LocalCoordinate,
    origin: Point3,
    basis: (Vector3, Vector3),
    samples: Vec<CurvatureSample>,
    max_index: usize,
    min_index: usize,
}

impl CurvatureSampler {
    /// Sample `directions` tangent directions at the frame's current point.
    ///
    /// # Errors
    /// [`SurfError::InvalidParameter`] when `directions` is zero.
    pub fn new(frame: &SurfaceFrame<'_>, directions: usize) -> Result<Self> {
        if directions == 0 {
            return Err(SurfError::InvalidParameter(
                "curvature sampler needs at least one direction".into(),
            ));
        }
        let mut sampler = Self {
            directions,
            local: frame.local(),
            origin: frame.position(),
            basis: (Vector3::ZERO, Vector3::ZERO),
            samples: Vec::with_capacity(directions),
            max_index: 0,
            min_index: 0,
        };
        sampler.compute_curvatures(frame);
        Ok(sampler)
    }

    /// Resample at the frame's current point, reusing the buffers.
    pub fn compute_curvatures(&mut self, frame: &SurfaceFrame<'_>) {
        let geometry = frame.geometry();
        let normal = frame.normal();
        let basis1 = frame.u_tangent().normalize();
        let basis2 = normal.cross(basis1).normalize();

        self.local = frame.local();
        self.origin = frame.position();
        self.basis = (basis1, basis2);
        self.samples.clear();

        let step = 360.0 / self.directions as f64;
        for i in 0..self.directions {
            let direction = rotate_about_axis(basis1, normal, i as f64 * step).normalize();
            let curvature = geometry.normal_curvature(self.local, direction);
            self.samples.push(CurvatureSample {
                curvature,
                direction,
            });
        }

        // First occurrence wins on ties.
        self.max_index = 0;
        self.min_index = 0;
        for i in 1..self.samples.len() {
            let k = self.samples[i].curvature;
            if k > self.samples[self.max_index].curvature {
                self.max_index = i;
            }
            if k < self.samples[self.min_index].curvature {
                self.min_index = i;
            }
        }

        tracing::trace!(
            directions = self.directions,
            max = self.samples[self.max_index].curvature,
            min = self.samples[self.min_index].curvature,
            "sampled curvature"
        );
    }

    pub fn direction_count(&self) -> usize {
        self.directions
    }

    /// Local coordinate the samples were taken at.
    pub fn local(&self) -> LocalCoordinate {
        self.local
    }

    /// Orthonormal tangent basis `(basis1, basis2)` the ring starts from.
    pub fn tangent_basis(&self) -> (Vector3, Vector3) {
        self.basis
    }

    pub fn samples(&self) -> &[CurvatureSample] {
        &self.samples
    }

    /// Sample `index`.
    ///
    /// # Errors
    /// [`SurfError::IndexOutOfRange`] when `index >= direction_count()`.
    pub fn curvature(&self, index: usize) -> Result<CurvatureSample> {
        self.samples
            .get(index)
            .copied()
            .ok_or(SurfError::IndexOutOfRange {
                index,
                len: self.samples.len(),
            })
    }

    pub fn max_index(&self) -> usize {
        self.max_index
    }

    pub fn min_index(&self) -> usize {
        self.min_index
    }

    /// Largest sampled normal curvature.
    pub fn principal_max(&self) -> CurvatureSample {
        self.samples[self.max_index]
    }

    /// Smallest sampled normal curvature.
    pub fn principal_min(&self) -> CurvatureSample {
        self.samples[self.min_index]
    }

    pub fn gaussian_curvature(&self) -> f64 {
        self.principal_max().curvature * self.principal_min().curvature
    }

    pub fn mean_curvature(&self) -> f64 {
        0.5 * (self.principal_max().curvature + self.principal_min().curvature)
    }

    /// Principal-curvature difference; zero at an umbilical point.
    pub fn umbilical_distance(&self) -> f64 {
        self.principal_max().curvature - self.principal_min().curvature
    }

    /// One marker per sample, with tip length `curvature * scale`.
    pub fn markers(&self, scale: f64) -> Vec<CurvatureMarker> {
        self.samples
            .iter()
            .map(|s| CurvatureMarker {
                origin: self.origin,
                tip: self.origin + s.direction * (s.curvature * scale),
                curvature: s.curvature,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Ellipsoid, ShapeParameters};
    use std::f64::consts::PI;
    use sw_math::DVec2;

    #[test]
    fn test_zero_directions_rejected() {
        let sphere = Ellipsoid::sphere(1.0);
        let frame = SurfaceFrame::at(&sphere, DVec2::new(0.0, 1.0));
        assert!(matches!(
            CurvatureSampler::new(&frame, 0),
            Err(SurfError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_single_direction() {
        let sphere = Ellipsoid::sphere(1.0);
        let frame = SurfaceFrame::at(&sphere, DVec2::new(0.0, 1.0));
        let sampler = CurvatureSampler::new(&frame, 1).unwrap();
        assert_eq!(sampler.samples().len(), 1);
        assert_eq!(sampler.max_index(), 0);
        assert_eq!(sampler.min_index(), 0);
    }

    #[test]
    fn test_out_of_range() {
        let sphere = Ellipsoid::sphere(1.0);
        let frame = SurfaceFrame::at(&sphere, DVec2::new(0.0, 1.0));
        let sampler = CurvatureSampler::new(&frame, 8).unwrap();
        assert!(sampler.curvature(7).is_ok());
        assert!(matches!(
            sampler.curvature(8),
            Err(SurfError::IndexOutOfRange { index: 8, len: 8 })
        ));
    }

    #[test]
    fn test_directions_are_unit_and_tangent() {
        let ellipsoid = Ellipsoid::new(ShapeParameters::new(1.0, 2.0, 3.0));
        let frame = SurfaceFrame::at(&ellipsoid, DVec2::new(0.4, 1.2));
        let sampler = CurvatureSampler::new(&frame, 12).unwrap();
        let n = frame.unit_normal();
        for s in sampler.samples() {
            assert!((s.direction.length() - 1.0).abs() < 1e-12);
            assert!(s.direction.dot(n).abs() < 1e-12);
        }
        let (b1, b2) = sampler.tangent_basis();
        assert!(b1.dot(b2).abs() < 1e-12);
        assert!((sampler.samples()[0].direction - b1).length() < 1e-12);
    }

    #[test]
    fn test_opposite_samples_agree() {
        let ellipsoid = Ellipsoid::new(ShapeParameters::new(1.0, 2.0, 3.0));
        let frame = SurfaceFrame::at(&ellipsoid, DVec2::new(0.4, 1.2));
        let sampler = CurvatureSampler::new(&frame, 16).unwrap();
        for i in 0..8 {
            let a = sampler.curvature(i).unwrap().curvature;
            let b = sampler.curvature(i + 8).unwrap().curvature;
            assert!((a - b).abs() < 1e-10, "sample {} = {}, sample {} = {}", i, a, i + 8, b);
        }
    }

    #[test]
    fn test_ties_keep_first_index() {
        // Opposite directions tie exactly on a sphere-like ring, so the scan
        // must report the earliest extremum it sees.
        let sphere = Ellipsoid::sphere(3.0);
        let frame = SurfaceFrame::at(&sphere, DVec2::new(0.0, PI / 2.0));
        let sampler = CurvatureSampler::new(&frame, 4).unwrap();
        let max = sampler.principal_max().curvature;
        let first_max = sampler
            .samples()
            .iter()
            .position(|s| s.curvature == max)
            .unwrap();
        assert_eq!(sampler.max_index(), first_max);
        let min = sampler.principal_min().curvature;
        let first_min = sampler
            .samples()
            .iter()
            .position(|s| s.curvature == min)
            .unwrap();
        assert_eq!(sampler.min_index(), first_min);
    }

    #[test]
    fn test_resample_tracks_frame() {
        let ellipsoid = Ellipsoid::new(ShapeParameters::new(1.0, 1.0, 3.0));
        let mut frame = SurfaceFrame::at(&ellipsoid, DVec2::new(0.0, PI / 2.0));
        let mut sampler = CurvatureSampler::new(&frame, 36).unwrap();
        let equator = sampler.gaussian_curvature();
        frame.move_to(DVec2::new(0.0, 0.3));
        sampler.compute_curvatures(&frame);
        assert_eq!(sampler.local(), DVec2::new(0.0, 0.3));
        assert!((sampler.gaussian_curvature() - equator).abs() > 1e-3);
    }

    #[test]
    fn test_markers() {
        let sphere = Ellipsoid::sphere(2.0);
        let frame = SurfaceFrame::at(&sphere, DVec2::new(0.0, PI / 2.0));
        let sampler = CurvatureSampler::new(&frame, 6).unwrap();
        let markers = sampler.markers(2.0);
        assert_eq!(markers.len(), 6);
        for m in &markers {
            assert_eq!(m.origin, frame.position());
            assert!(((m.tip - m.origin).length() - 1.0).abs() < 1e-9);
        }
    }
}
