//! SurfWalk geometry: parametric surfaces and the differential-geometry
//! machinery that runs on them.

pub mod curvature;
pub mod forms;
pub mod frame;
pub mod pursuit;
pub mod surface;

pub use curvature::{CurvatureMarker, CurvatureSample, CurvatureSampler};
pub use forms::FundamentalForms;
pub use frame::SurfaceFrame;
pub use pursuit::{InverseMapSolver, SolveOutcome, SolverSettings};
pub use surface::{
    Ellipsoid, EllipticParaboloid, OneSheetedHyperboloid, ParameterDomain, ShapeParameters,
    SurfaceGeometry, SurfaceKind,
};
