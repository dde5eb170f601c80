//! Probe session configuration, read from a JSON file.
//!
//! Every section is optional; missing values fall back to defaults chosen
//! for the selected surface kind.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sw_core::{Result, SurfError, Tolerance, Validate};
use sw_geometry::{ShapeParameters, SolverSettings, SurfaceGeometry, SurfaceKind};
use sw_math::{DVec2, DVec3, Ray};
use sw_mesh::TessellationSettings;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub surface: SurfaceConfig,
    pub curvature: CurvatureConfig,
    pub walk: WalkConfig,
    pub probe: ProbeConfig,
    pub solver: SolverSettings,
    /// Defaults to [`TessellationSettings::for_kind`].
    pub tessellation: Option<TessellationSettings>,
    /// Thresholds for mesh picking.
    pub tolerance: Tolerance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub kind: SurfaceKind,
    pub parameters: ShapeParameters,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            kind: SurfaceKind::Ellipsoid,
            parameters: ShapeParameters::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurvatureConfig {
    pub directions: usize,
    pub marker_scale: f64,
}

impl Default for CurvatureConfig {
    fn default() -> Self {
        Self {
            directions: 36,
            marker_scale: 0.25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Starting local coordinate; defaults per surface kind.
    pub start: Option<DVec2>,
    /// Turn applied to the initial forward direction, in degrees.
    pub heading_degrees: f64,
    pub step_length: f64,
    pub steps: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            start: None,
            heading_degrees: 30.0,
            step_length: 0.05,
            steps: 20,
        }
    }
}

/// Pick ray fired at the tessellated mesh. Without an explicit origin the
/// ray is aimed at the walk's start point from outside the surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub origin: Option<DVec3>,
    pub direction: Option<DVec3>,
    pub standoff: f64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            origin: None,
            direction: None,
            standoff: 2.0,
        }
    }
}

impl SessionConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn start(&self) -> DVec2 {
        self.walk.start.unwrap_or(match self.surface.kind {
            SurfaceKind::Ellipsoid => DVec2::new(0.3, 1.3),
            SurfaceKind::EllipticParaboloid => DVec2::new(0.3, 0.55),
            SurfaceKind::OneSheetedHyperboloid => DVec2::new(0.3, 0.1),
        })
    }

    pub fn tessellation(&self) -> TessellationSettings {
        self.tessellation
            .unwrap_or_else(|| TessellationSettings::for_kind(self.surface.kind))
    }

    /// Resolve the pick ray against the surface it will be fired at.
    pub fn probe_ray(&self, surface: &dyn SurfaceGeometry) -> Ray {
        let aim = self.start();
        let target = surface.mapping(aim);
        let inward = surface.unit_normal(aim);
        let origin = self
            .probe
            .origin
            .unwrap_or(target - inward * self.probe.standoff);
        let direction = self.probe.direction.unwrap_or(target - origin);
        Ray::new(origin, direction)
    }
}

impl Validate for SessionConfig {
    fn validate(&self) -> Result<()> {
        self.surface.parameters.validate()?;
        self.solver.validate()?;
        self.tessellation().validate()?;
        if self.curvature.directions == 0 {
            return Err(SurfError::Config(
                "curvature.directions must be at least 1".into(),
            ));
        }
        if !self.walk.step_length.is_finite() || self.walk.step_length < 0.0 {
            return Err(SurfError::Config(format!(
                "walk.step_length must be finite and non-negative, got {}",
                self.walk.step_length
            )));
        }
        if !self.probe.standoff.is_finite() || self.probe.standoff <= 0.0 {
            return Err(SurfError::Config(format!(
                "probe.standoff must be finite and positive, got {}",
                self.probe.standoff
            )));
        }
        if !(self.tolerance.parallel >= 0.0 && self.tolerance.degenerate >= 0.0) {
            return Err(SurfError::Config(
                "tolerance thresholds must be non-negative".into(),
            ));
        }
        if self.probe.direction == Some(DVec3::ZERO) {
            return Err(SurfError::Config("probe.direction must be nonzero".into()));
        }
        Ok(())
    }
}
