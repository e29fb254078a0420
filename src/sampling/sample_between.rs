use tracing::debug;

use crate::error::{Result, SamplingError};
use crate::math::{GeometricOperations, TimeOperations};
use crate::spline::{CatmullRomSpline, SplineLocation, SplineSample};

use super::{DEFAULT_MIN_SEGMENTS, MAX_SAMPLE_SEGMENTS};

/// Samples a spline at uniform arc-length spacing between two locations.
///
/// The range is split into `round(|to - from| / spacing)` equal parts (at
/// least `min_segments`), so the actual spacing is adjusted to hit both
/// ends exactly. A range with `to < from` is sampled in that direction:
/// the first sample lies at `from`.
#[derive(Debug, Clone, Copy)]
pub struct SampleBetween {
    from: SplineLocation,
    to: SplineLocation,
    spacing: f64,
    min_segments: usize,
}

impl SampleBetween {
    /// Creates a new `SampleBetween` operation.
    #[must_use]
    pub fn new(from: SplineLocation, to: SplineLocation, spacing: f64) -> Self {
        Self {
            from,
            to,
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

    /// Computes the sample locations in requested order.
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::InvalidSpacing`] for a non-positive or
    /// non-finite spacing, [`SamplingError::NonFiniteBound`] for a NaN or
    /// infinite range end, and [`SamplingError::TooManySamples`] when the
    /// range holds more than [`MAX_SAMPLE_SEGMENTS`] spacings.
    pub fn locations(&self) -> Result<Vec<SplineLocation>> {
        let mut locations = self.ascending_locations()?;
        if self.is_reversed() {
            locations.reverse();
        }
        Ok(locations)
    }

    fn is_reversed(&self) -> bool {
        self.to < self.from
    }

    fn ascending_locations(&self) -> Result<Vec<SplineLocation>> {
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(SamplingError::InvalidSpacing(self.spacing).into());
        }
        if let Some(bound) = [self.from, self.to]
            .into_iter()
            .map(SplineLocation::value)
            .find(|v| !v.is_finite())
        {
            return Err(SamplingError::NonFiniteBound(bound).into());
        }
        let (from, to) = if self.is_reversed() {
            (self.to, self.from)
        } else {
            (self.from, self.to)
        };
        let range = to - from;

        let requested = (range / self.spacing).round();
        #[allow(clippy::cast_precision_loss)]
        let (limit, min) = (MAX_SAMPLE_SEGMENTS as f64, self.min_segments as f64);
        if !(requested <= limit && min <= limit) {
            return Err(SamplingError::TooManySamples {
                requested: requested.max(min),
                max: MAX_SAMPLE_SEGMENTS,
            }
            .into());
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let segments = (requested as usize).max(self.min_segments);
        #[allow(clippy::cast_precision_loss)]
        let step = range / segments as f64;

        let mut locations: Vec<_> = (0..segments)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let offset = step * i as f64;
                from + offset
            })
            .collect();
        locations.push(to);
        Ok(locations)
    }

    /// Executes the sampling, returning one sample per location.
    ///
    /// # Errors
    ///
    /// Returns an error if the spacing is invalid or either end lies outside
    /// the spline.
    pub fn execute<'a, O, T>(
        &self,
        spline: &'a CatmullRomSpline<O, T>,
    ) -> Result<Vec<SplineSample<'a, O, T>>>
    where
        O: GeometricOperations,
        T: TimeOperations<O>,
    {
        let locations = self.ascending_locations()?;
        let normalized = spline.bulk_normalized_locations_ordered(&locations)?;
        let mut samples = normalized
            .into_iter()
            .map(|n| spline.at_normalized(n))
            .collect::<Result<Vec<_>>>()?;
        if self.is_reversed() {
            samples.reverse();
        }
        debug!(
            samples = samples.len(),
            spacing = self.spacing,
            "sampled spline range"
        );
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
