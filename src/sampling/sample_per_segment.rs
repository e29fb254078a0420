use tracing::debug;

use crate::error::{Result, SamplingError};
use crate::math::{GeometricOperations, TimeOperations};
use crate::spline::{CatmullRomSpline, SplineSample, SplineSegmentIndex};

/// Samples every segment at uniform progress steps.
///
/// With `n` samples per segment and `k` segments the result holds
/// `n * k + 1` samples; segment boundaries appear once.
#[derive(Debug, Clone, Copy)]
pub struct SamplePerSegment {
    samples_per_segment: usize,
}

impl SamplePerSegment {
    /// Creates a new `SamplePerSegment` operation.
    #[must_use]
    pub fn new(samples_per_segment: usize) -> Self {
        Self {
            samples_per_segment,
        }
    }

    /// Executes the sampling.
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::NoSamplesPerSegment`] when configured with zero.
    pub fn execute<'a, O, T>(
        &self,
        spline: &'a CatmullRomSpline<O, T>,
    ) -> Result<Vec<SplineSample<'a, O, T>>>
    where
        O: GeometricOperations,
        T: TimeOperations<O>,
    {
        let n = self.samples_per_segment;
        if n == 0 {
            return Err(SamplingError::NoSamplesPerSegment.into());
        }
        let count = spline.segment_count();
        let mut samples = Vec::with_capacity(n * count + 1);
        for segment in 0..count {
            let segment = &spline[SplineSegmentIndex(segment)];
            samples.extend((0..n).map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let progress = i as f64 / n as f64;
                SplineSample::new(spline, segment, progress)
            }));
        }
        let last = &spline[SplineSegmentIndex(count - 1)];
        samples.push(SplineSample::new(spline, last, 1.0));
        debug!(samples = samples.len(), segments = count, "sampled spline per segment");
        Ok(samples)
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
        Ok(self
            .execute(spline)?
            .iter()
            .map(SplineSample::position)
            .collect())
    }
}
