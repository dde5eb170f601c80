//! Closed-form curvature from the first and second fundamental forms.

use serde::{Deserialize, Serialize};

/// First (`E`, `F`, `G`) and second (`e`, `f`, `g`) fundamental form
/// coefficients at one point of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundamentalForms {
    pub e_big: f64,
    pub f_big: f64,
    pub g_big: f64,
    pub e: f64,
    pub f: f64,
    pub g: f64,
}

impl FundamentalForms {
    /// `EG - F²`; zero where the chart is singular.
    pub fn metric_determinant(&self) -> f64 {
        self.e_big * self.g_big - self.f_big * self.f_big
    }

    /// `K = (eg - f²) / (EG - F²)`
    pub fn gaussian_curvature(&self) -> f64 {
        (self.e * self.g - self.f * self.f) / self.metric_determinant()
    }

    /// `H = (eG - 2fF + gE) / (2 (EG - F²))`
    pub fn mean_curvature(&self) -> f64 {
        (self.e * self.g_big - 2.0 * self.f * self.f_big + self.g * self.e_big)
            / (2.0 * self.metric_determinant())
    }

    /// Exact principal curvatures `(max, min)`, the eigenvalues of the shape
    /// operator.
    pub fn principal_curvatures(&self) -> (f64, f64) {
        let h = self.mean_curvature();
        let k = self.gaussian_curvature();
        // Rounding can push H² - K slightly negative at umbilics.
        let spread = (h * h - k).max(0.0).sqrt();
        (h + spread, h - spread)
    }
}
