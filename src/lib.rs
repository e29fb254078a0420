pub mod error;
pub mod geometry;
pub mod math;
pub mod sampling;
pub mod spline;

pub use error::{Result, SplineError};
pub use spline::{CatmullRomSpline, SplineSample, SplineType};
