//! One probe session: walk, sample, tessellate, pick, invert.

use serde::Serialize;
use sw_core::{Result, SurfError};
use sw_geometry::{
    CurvatureMarker, CurvatureSampler, InverseMapSolver, ShapeParameters, SolveOutcome,
    SurfaceFrame, SurfaceKind,
};
use sw_math::{DVec2, Point3};
use sw_mesh::{RayHit, Tessellator};

use crate::config::SessionConfig;

#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub surface: SurfaceKind,
    pub parameters: ShapeParameters,
    pub walk: Vec<WalkSample>,
    /// Why the walk ended before the configured number of steps, if it did.
    pub walk_stopped: Option<String>,
    pub markers: Vec<CurvatureMarker>,
    pub exact_principal: (f64, f64),
    pub mesh: MeshSummary,
    pub hit: Option<RayHit>,
    pub solve: Option<SolveOutcome>,
    /// Whether the solved coordinate lies inside the tessellated window.
    pub solve_in_window: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WalkSample {
    pub local: DVec2,
    pub position: Point3,
    pub principal_max: f64,
    pub principal_min: f64,
    pub gaussian: f64,
    pub umbilical_distance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeshSummary {
    pub vertices: usize,
    pub triangles: usize,
}

fn sample(frame: &SurfaceFrame<'_>, sampler: &CurvatureSampler) -> WalkSample {
    WalkSample {
        local: frame.local(),
        position: frame.position(),
        principal_max: sampler.principal_max().curvature,
        principal_min: sampler.principal_min().curvature,
        gaussian: sampler.gaussian_curvature(),
        umbilical_distance: sampler.umbilical_distance(),
    }
}

/// Run the session described by `config`.
pub fn run(config: &SessionConfig) -> Result<ProbeReport> {
    let kind = config.surface.kind;
    let geometry = kind.build(config.surface.parameters);
    let geometry = geometry.as_ref();

    let mut frame = SurfaceFrame::at(geometry, config.start());
    frame.turn(config.walk.heading_degrees);
    let mut sampler = CurvatureSampler::new(&frame, config.curvature.directions)?;
    let mut walk = vec![sample(&frame, &sampler)];
    let mut walk_stopped = None;
    let mut warned_unguarded = false;

    for step in 0..config.walk.steps {
        match frame.walk(frame.forward(), config.walk.step_length) {
            Ok(()) => {}
            Err(SurfError::Unsupported { .. }) => {
                if !warned_unguarded {
                    tracing::warn!(
                        surface = kind.name(),
                        "no singular-region test for this surface; walking unguarded"
                    );
                    warned_unguarded = true;
                }
                let delta = frame.step(frame.forward(), config.walk.step_length);
                frame.move_by(delta);
            }
            Err(err @ SurfError::SingularRegion { .. }) => {
                tracing::warn!(step, %err, "walk stopped");
                walk_stopped = Some(err.to_string());
                break;
            }
            Err(err) => return Err(err),
        }
        sampler.compute_curvatures(&frame);
        walk.push(sample(&frame, &sampler));
    }

    let markers = sampler.markers(config.curvature.marker_scale);
    let exact_principal = geometry
        .fundamental_forms(frame.local())
        .principal_curvatures();

    let tessellation = config.tessellation();
    let mesh = Tessellator::new(&tessellation).tessellate(geometry);
    let ray = config.probe_ray(geometry);
    let hit = mesh.raycast_with(&ray, &config.tolerance);
    let solve = hit.map(|hit| {
        let mut solver = InverseMapSolver::from_frame(&frame, hit.point);
        solver.run(&config.solver)
    });
    let solve_in_window = solve.map(|outcome| tessellation.domain.contains(outcome.local));
    if solve_in_window == Some(false) {
        tracing::warn!("solved coordinate lies outside the tessellated window");
    }

    match (&hit, &solve) {
        (Some(hit), Some(outcome)) => tracing::info!(
            distance = hit.distance,
            residual = outcome.residual,
            converged = outcome.converged,
            "probe ray resolved"
        ),
        _ => tracing::info!("probe ray missed the mesh"),
    }

    Ok(ProbeReport {
        surface: kind,
        parameters: geometry.parameters(),
        walk,
        walk_stopped,
        markers,
        exact_principal,
        mesh: MeshSummary {
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
        },
        hit,
        solve,
        solve_in_window,
    })
}
