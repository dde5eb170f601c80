use sw_core::Tolerance;
use sw_math::{DVec2, Point3, Vector3};

/// Vertex, UV and index buffers handed to rendering and collision.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    /// Grid-major vertex positions.
    pub positions: Vec<Point3>,
    pub uvs: Vec<DVec2>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
    pub normals: Vec<Vector3>,
    /// Vertex grid dimensions `(u_count, v_count)`.
    pub grid: (usize, usize),
}

impl MeshBuffers {
    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Flat index of grid vertex `(i, j)`.
    pub fn grid_index(&self, i: usize, j: usize) -> usize {
        i * self.grid.1 + j
    }

    /// Position of grid vertex `(i, j)`, if it exists.
    pub fn vertex(&self, i: usize, j: usize) -> Option<Point3> {
        if i >= self.grid.0 || j >= self.grid.1 {
            return None;
        }
        self.positions.get(self.grid_index(i, j)).copied()
    }

    /// Vertex positions of triangle `t`, or `None` when the triangle does
    /// not exist or references a missing vertex.
    pub fn triangle(&self, t: usize) -> Option<[Point3; 3]> {
        let tri = self.indices.get(t * 3..t * 3 + 3)?;
        Some([
            *self.positions.get(tri[0] as usize)?,
            *self.positions.get(tri[1] as usize)?,
            *self.positions.get(tri[2] as usize)?,
        ])
    }

    /// Area-weighted vertex normals following the triangle winding.
    ///
    /// Vertices touched only by degenerate triangles (chart poles) keep a
    /// zero normal. Triangles with out-of-range indices are skipped.
    pub fn compute_normals(&mut self) {
        let tolerance = Tolerance::default();
        self.normals.clear();
        self.normals.resize(self.positions.len(), Vector3::ZERO);

        for t in 0..self.triangle_count() {
            let Some([p0, p1, p2]) = self.triangle(t) else {
                continue;
            };
            let normal = (p1 - p0).cross(p2 - p0);
            for &i in &self.indices[t * 3..t * 3 + 3] {
                self.normals[i as usize] += normal;
            }
        }

        for n in &mut self.normals {
            let len = n.length();
            if !tolerance.is_degenerate(len) {
                *n /= len;
            }
        }
    }
}
