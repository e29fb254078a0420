use crate::error::Result;
use crate::math::{GeometricOperations, TimeOperations};
use crate::spline::{CatmullRomSpline, SplineLocation, SplineSample};

use super::{SampleBetween, DEFAULT_MIN_SEGMENTS};

/// Samples a whole spline at uniform arc-length spacing.
///
/// Equivalent to [`SampleBetween`] from `0` to the spline length.
#[derive(Debug, Clone, Copy)]
pub struct SampleEvery {
    spacing: f64,
    min_segments: usize,
}

impl SampleEvery {
    /// Creates a new `SampleEvery` operation.
    #[must_use]
    pub fn new(spacing: f64) -> Self {
        Self {
            spacing,
            min_segments: DEFAULT_MIN_SEGMENTS,
        }
    }

    /// Sets the minimum number of sub-ranges (values below 1 count as 1).
    #[must_use]
    pub fn with_min_segments(mut self, min_segments: usize) -> Self {
        self.min_segments = min_segments.max(1);
        self
    }

    fn between<O, T>(&self, spline: &CatmullRomSpline<O, T>) -> SampleBetween
    where
        O: GeometricOperations,
        T: TimeOperations<O>,
    {
        SampleBetween::new(SplineLocation::ZERO, SplineLocation(spline.length()), self.spacing)
            .with_min_segments(self.min_segments)
    }

    /// Executes the sampling.
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::InvalidSpacing`](crate::error::SamplingError::InvalidSpacing)
    /// for a non-positive or non-finite spacing.
    pub fn execute<'a, O, T>(
        &self,
        spline: &'a CatmullRomSpline<O, T>,
    ) -> Result<Vec<SplineSample<'a, O, T>>>
    where
        O: GeometricOperations,
        T: TimeOperations<O>,
    {
        self.between(spline).execute(spline)
    }

    /// Executes the sampling, returning positions only.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn positions<O, T>(&self, spline: &CatmullRomSpline<O, T>) -> Result<Vec<O::Pos>>
    where
        O: GeometricOperations,
        T: TimeOperations<O>,
    {
        self.between(spline).positions(spline)
    }
}
