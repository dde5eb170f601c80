//! Uniform chart tessellation.
//!
//! The mesh is a `(u_res + 1) x (v_res + 1)` vertex grid in u-major order,
//! two triangles per cell, rebuilt from scratch on every call. Chart
//! singularities are not collapsed: a pole shows up as a row of coincident
//! vertices.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sw_core::{Result, SurfError, Validate};
use sw_geometry::{ParameterDomain, SurfaceGeometry, SurfaceKind};
use sw_math::DVec2;

use crate::MeshBuffers;

/// Grid resolution, chart window and face orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TessellationSettings {
    /// Cells along u; values below 1 are clamped to 1.
    pub u_res: i32,
    /// Cells along v; values below 1 are clamped to 1.
    pub v_res: i32,
    pub domain: ParameterDomain,
    /// Flip every triangle, e.g. when the chart is mirrored.
    #[serde(default)]
    pub reverse_orientation: bool,
}

impl TessellationSettings {
    pub fn new(u_res: i32, v_res: i32, domain: ParameterDomain) -> Self {
        Self {
            u_res,
            v_res,
            domain,
            reverse_orientation: false,
        }
    }

    /// Default resolution over the usual chart window of `kind`.
    pub fn for_kind(kind: SurfaceKind) -> Self {
        Self::new(32, 16, kind.default_domain())
    }

    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse_orientation = reverse;
        self
    }
}

impl TessellationSettings {
    /// Largest vertex grid whose indices fit in the `u32` index buffer.
    pub const MAX_VERTICES: u64 = u32::MAX as u64 + 1;

    /// `(u_res + 1) * (v_res + 1)` after clamping.
    pub fn vertex_count(&self) -> u64 {
        let u = self.u_res.max(1) as u64 + 1;
        let v = self.v_res.max(1) as u64 + 1;
        u * v
    }
}

impl Validate for TessellationSettings {
    fn validate(&self) -> Result<()> {
        if self.u_res < 1 || self.v_res < 1 {
            return Err(SurfError::InvalidParameter(format!(
                "tessellation resolution must be at least 1x1, got {}x{}",
                self.u_res, self.v_res
            )));
        }
        if self.vertex_count() > Self::MAX_VERTICES {
            return Err(SurfError::InvalidParameter(format!(
                "tessellation grid {}x{} exceeds the u32 index range",
                self.u_res, self.v_res
            )));
        }
        self.domain.validate()
    }
}

/// Builds [`MeshBuffers`] for a surface over a rectangular chart window.
///
/// Indices are `u32`, so the grid must stay within
/// [`TessellationSettings::MAX_VERTICES`]; validate settings that come from
/// outside the program before building.
#[derive(Debug, Clone)]
pub struct Tessellator {
    u_res: usize,
    v_res: usize,
    domain: ParameterDomain,
    reverse_orientation: bool,
}

impl Tessellator {
    pub fn new(settings: &TessellationSettings) -> Self {
        Self {
            u_res: settings.u_res.max(1) as usize,
            v_res: settings.v_res.max(1) as usize,
            domain: settings.domain,
            reverse_orientation: settings.reverse_orientation,
        }
    }

    /// Clamped resolution `(u_res, v_res)`.
    pub fn resolution(&self) -> (usize, usize) {
        (self.u_res, self.v_res)
    }

    /// Chart coordinate of grid vertex `(i, j)`.
    pub fn grid_coordinate(&self, i: usize, j: usize) -> DVec2 {
        let d = &self.domain;
        let du = (d.u_max - d.u_min) / self.u_res as f64;
        let dv = (d.v_max - d.v_min) / self.v_res as f64;
        DVec2::new(d.u_min + i as f64 * du, d.v_min + j as f64 * dv)
    }

    /// Evaluate the grid and emit positions, UVs, indices and normals.
    pub fn tessellate(&self, surface: &dyn SurfaceGeometry) -> MeshBuffers {
        let (u_res, v_res) = (self.u_res, self.v_res);
        let u_count = u_res + 1;
        let v_count = v_res + 1;
        let total_verts = u_count * v_count;

        // Each vertex is independent; indexed collect keeps grid order.
        let positions: Vec<_> = (0..total_verts)
            .into_par_iter()
            .map(|k| {
                let local = self.grid_coordinate(k / v_count, k % v_count);
                surface.surface_point(local.x, local.y)
            })
            .collect();

        let mut uvs = Vec::with_capacity(total_verts);
        for i in 0..u_count {
            for j in 0..v_count {
                uvs.push(DVec2::new(
                    i as f64 / u_res as f64,
                    (v_res - j) as f64 / v_res as f64,
                ));
            }
        }

        let mut indices = Vec::with_capacity(u_res * v_res * 6);
        for i in 0..u_res {
            for j in 0..v_res {
                let idx = |ii: usize, jj: usize| -> u32 { (ii * v_count + jj) as u32 };
                let (a, b, c, d) = (idx(i, j), idx(i + 1, j), idx(i + 1, j + 1), idx(i, j + 1));
                if self.reverse_orientation {
                    indices.extend_from_slice(&[a, c, b, a, d, c]);
                } else {
                    indices.extend_from_slice(&[a, b, c, a, c, d]);
                }
            }
        }

        let mut mesh = MeshBuffers {
            positions,
            uvs,
            indices,
            normals: Vec::new(),
            grid: (u_count, v_count),
        };
        mesh.compute_normals();

        tracing::debug!(
            surface = surface.kind().name(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "tessellated surface"
        );
        mesh
    }
}
