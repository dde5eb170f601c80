//! Tangent-plane pursuit: recover the local coordinate of a 3D point.
//!
//! Each step projects the remaining offset to the target onto the current
//! tangent plane, pulls it back to local coordinates and moves there. Near
//! flat regions this behaves like a Newton step; there is no line search,
//! damping or divergence detection, so callers judge success from the
//! residual.

use serde::{Deserialize, Serialize};
use sw_core::{Result, SurfError, Tolerance, Validate};
use sw_math::{project_on_plane, LocalCoordinate, Point3};

use crate::frame::SurfaceFrame;
use crate::surface::SurfaceGeometry;

/// Stopping rule for [`InverseMapSolver::run`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub distance_threshold: f64,
    pub max_iterations: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            distance_threshold: Tolerance::DEFAULT_DISTANCE,
            max_iterations: 32,
        }
    }
}

impl Validate for SolverSettings {
    fn validate(&self) -> Result<()> {
        if !self.distance_threshold.is_finite() || self.distance_threshold < 0.0 {
            return Err(SurfError::InvalidParameter(format!(
                "distance threshold must be finite and non-negative, got {}",
                self.distance_threshold
            )));
        }
        Ok(())
    }
}

/// Result of [`InverseMapSolver::run_until`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolveOutcome {
    /// Best local coordinate reached.
    pub local: LocalCoordinate,
    /// Distance from `mapping(local)` to the target.
    pub residual: f64,
    /// Steps taken by this run.
    pub iterations: usize,
    /// Whether the residual ended at or below the threshold.
    pub converged: bool,
}

/// Iteratively inverts `mapping` for one target point.
///
/// The solver owns its own [`SurfaceFrame`]; the caller's frame is never
/// touched.
#[derive(Debug, Clone)]
pub struct InverseMapSolver<'g> {
    frame: SurfaceFrame<'g>,
    target: Point3,
    iterations: usize,
}

impl<'g> InverseMapSolver<'g> {
    pub fn new(geometry: &'g dyn SurfaceGeometry, start: LocalCoordinate, target: Point3) -> Self {
        Self {
            frame: SurfaceFrame::at(geometry, start),
            target,
            iterations: 0,
        }
    }

    /// Start from the current point of an existing frame.
    pub fn from_frame(frame: &SurfaceFrame<'g>, target: Point3) -> Self {
        Self::new(frame.geometry(), frame.local(), target)
    }

    /// One tangent-plane step. Returns the residual afterwards.
    pub fn iterate(&mut self) -> f64 {
        let direction = self.target - self.frame.position();
        let planar = project_on_plane(direction, self.frame.normal());
        let delta = self.frame.geometry().pullback(self.frame.local(), planar);
        self.frame.move_by(delta);
        self.iterations += 1;
        self.residual()
    }

    /// Iterate while the residual exceeds `distance_threshold` and fewer than
    /// `max_iterations` steps have been taken in this call.
    ///
    /// Hitting the iteration cap is not an error; inspect
    /// [`SolveOutcome::converged`] or the residual.
    pub fn run_until(&mut self, distance_threshold: f64, max_iterations: usize) -> SolveOutcome {
        let mut steps = 0;
        let mut residual = self.residual();
        while residual > distance_threshold && steps < max_iterations {
            residual = self.iterate();
            steps += 1;
        }

        let converged = residual <= distance_threshold;
        if converged {
            tracing::debug!(steps, residual, "inverse map converged");
        } else {
            tracing::debug!(
                steps,
                residual,
                threshold = distance_threshold,
                "inverse map stopped without converging"
            );
        }

        SolveOutcome {
            local: self.frame.local(),
            residual,
            iterations: steps,
            converged,
        }
    }

    pub fn run(&mut self, settings: &SolverSettings) -> SolveOutcome {
        self.run_until(settings.distance_threshold, settings.max_iterations)
    }

    /// Distance from the current estimate to the target.
    pub fn residual(&self) -> f64 {
        (self.frame.position() - self.target).length()
    }

    pub fn local(&self) -> LocalCoordinate {
        self.frame.local()
    }

    pub fn target(&self) -> Point3 {
        self.target
    }

    /// Total steps taken since construction.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn frame(&self) -> &SurfaceFrame<'g> {
        &self.frame
    }
}
