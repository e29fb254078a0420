use crate::geometry::Polynomial;
use crate::math::GeometricOperations;

use super::index::SplineSegmentIndex;

/// One segment of a spline: its polynomial and how long it takes.
///
/// The arc length is computed on first use by the polynomial and cached.
#[derive(Debug, Clone)]
pub struct SplineSegment<O: GeometricOperations, Time> {
    index: SplineSegmentIndex,
    polynomial: Polynomial<O>,
    duration: Time,
}

impl<O: GeometricOperations, Time> SplineSegment<O, Time> {
    #[must_use]
    pub(crate) fn new(index: SplineSegmentIndex, polynomial: Polynomial<O>, duration: Time) -> Self {
        Self {
            index,
            polynomial,
            duration,
        }
    }

    /// Returns the segment index within its spline.
    #[must_use]
    pub fn index(&self) -> SplineSegmentIndex {
        self.index
    }

    /// Returns the polynomial backing this segment.
    #[must_use]
    pub fn polynomial(&self) -> &Polynomial<O> {
        &self.polynomial
    }

    /// Returns this segment's share of the spline's total time.
    #[must_use]
    pub fn duration(&self) -> &Time {
        &self.duration
    }

    /// Returns the arc length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.polynomial.arc_length()
    }

    /// Position at progress `t ∈ [0, 1]`.
    #[must_use]
    pub fn position(&self, t: f64) -> O::Pos {
        self.polynomial.evaluate(t)
    }

    /// Derivative with respect to progress at `t`.
    #[must_use]
    pub fn derivative(&self, t: f64) -> O::Diff {
        self.polynomial.evaluate_derivative(t)
    }
}
