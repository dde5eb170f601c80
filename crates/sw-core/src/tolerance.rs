/// Numeric thresholds for the mesh queries and their defaults.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Ray/triangle determinant below which the pair is treated as parallel
    pub parallel: f64,
    /// Length below which a vector has no usable direction
    pub degenerate: f64,
}

impl Tolerance {
    /// Default residual distance at which an inverse map counts as converged.
    pub const DEFAULT_DISTANCE: f64 = 1e-6;
    pub const DEFAULT_PARALLEL: f64 = 1e-12;
    pub const DEFAULT_DEGENERATE: f64 = 1e-12;

    /// Whether a ray/triangle determinant is too small to divide by.
    pub fn is_parallel(self, determinant: f64) -> bool {
        determinant.abs() < self.parallel
    }

    /// Whether a vector of this length should be left unnormalized.
    pub fn is_degenerate(self, length: f64) -> bool {
        length <= self.degenerate
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            parallel: Self::DEFAULT_PARALLEL,
            degenerate: Self::DEFAULT_DEGENERATE,
        }
    }
}
