use crate::math::{GeometricOperations, TimeOperations};

use super::catmull_rom_spline::CatmullRomSpline;
use super::location::{NormalizedSplineLocation, SplineLocation};
use super::segment::SplineSegment;

/// A point on a spline together with its derivatives.
///
/// Borrowed from the spline and computed on demand; nothing is stored.
/// Derivatives "in segment" are taken with respect to segment progress;
/// [`velocity`](Self::velocity) and [`acceleration`](Self::acceleration)
/// are taken with respect to time.
#[derive(Debug)]
pub struct SplineSample<'a, O: GeometricOperations, T: TimeOperations<O>> {
    spline: &'a CatmullRomSpline<O, T>,
    segment: &'a SplineSegment<O, T::Time>,
    progress: f64,
}

impl<O: GeometricOperations, T: TimeOperations<O>> Clone for SplineSample<'_, O, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: GeometricOperations, T: TimeOperations<O>> Copy for SplineSample<'_, O, T> {}

impl<'a, O: GeometricOperations, T: TimeOperations<O>> SplineSample<'a, O, T> {
    pub(crate) fn new(
        spline: &'a CatmullRomSpline<O, T>,
        segment: &'a SplineSegment<O, T::Time>,
        progress: f64,
    ) -> Self {
        Self {
            spline,
            segment,
            progress,
        }
    }

    /// Returns the segment this sample lies on.
    #[must_use]
    pub fn segment(&self) -> &'a SplineSegment<O, T::Time> {
        self.segment
    }

    /// Returns progress within the segment, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Segment index plus progress of this sample.
    #[must_use]
    pub fn normalized_location(&self) -> NormalizedSplineLocation {
        NormalizedSplineLocation::from(self.segment.index()) + self.progress
    }

    /// Arc-length location of this sample.
    #[must_use]
    pub fn location(&self) -> SplineLocation {
        let offset = self.spline.spatial_offsets()[self.segment.index().value()];
        SplineLocation(offset + self.segment.polynomial().length_at_progress(self.progress))
    }

    /// Time at which the spline reaches this sample.
    #[must_use]
    pub fn time(&self) -> T::Time {
        let time_ops = self.spline.time_ops();
        let offset = &self.spline.temporal_offsets()[self.segment.index().value()];
        time_ops.add(offset, &time_ops.scale(self.segment.duration(), self.progress))
    }

    /// Position on the curve.
    #[must_use]
    pub fn position(&self) -> O::Pos {
        self.segment.polynomial().evaluate(self.progress)
    }

    /// First derivative with respect to segment progress.
    #[must_use]
    pub fn derivative_in_segment(&self) -> O::Diff {
        self.segment.polynomial().evaluate_derivative(self.progress)
    }

    /// Second derivative with respect to segment progress.
    #[must_use]
    pub fn second_derivative_in_segment(&self) -> O::Diff {
        self.segment.polynomial().evaluate_second_derivative(self.progress)
    }

    /// `n`-th derivative with respect to segment progress; `None` for `n == 0`.
    #[must_use]
    pub fn nth_derivative_in_segment(&self, n: usize) -> Option<O::Diff> {
        self.segment
            .polynomial()
            .evaluate_nth_derivative(self.progress, n)
    }

    /// Time derivative of the position.
    ///
    /// A zero segment duration yields a non-finite velocity.
    #[must_use]
    pub fn velocity(&self) -> T::Velocity {
        self.spline.time_ops().per_time(
            self.spline.ops(),
            &self.derivative_in_segment(),
            self.segment.duration(),
        )
    }

    /// Second time derivative of the position.
    #[must_use]
    pub fn acceleration(&self) -> T::Velocity {
        let ops = self.spline.ops();
        let time_ops = self.spline.time_ops();
        let duration = self.segment.duration();
        let units = time_ops.ratio(duration, &time_ops.unit());
        let per_unit = ops.div(&self.second_derivative_in_segment(), units);
        time_ops.per_time(ops, &per_unit, duration)
    }
}
