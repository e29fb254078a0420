use std::fmt;
use std::ops::{Add, Sub};

use super::index::{SplineHandleIndex, SplineSegmentIndex};

/// Arc-length distance from the spatial start of a spline.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct SplineLocation(pub f64);

/// Segment index plus progress within that segment.
///
/// The integer part selects the segment, the fractional part is progress
/// along it. `segment_count` itself is only reached at the very end.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct NormalizedSplineLocation(pub f64);

impl SplineLocation {
    /// The spline start.
    pub const ZERO: Self = Self(0.0);

    /// Creates a location at `value` arc length from the start.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the arc length from the start.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl NormalizedSplineLocation {
    /// The spline start.
    pub const ZERO: Self = Self(0.0);

    /// Creates a location from segment index plus progress.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns segment index plus progress as one number.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Splits into the first handle of a four-handle window and the
    /// overshoot past it.
    ///
    /// Negative values map to handle 0 with zero overshoot.
    #[must_use]
    pub fn as_handle_index(self) -> (SplineHandleIndex, f64) {
        let clamped = self.0.max(0.0);
        let base = clamped.floor();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = SplineHandleIndex(base as usize);
        (index, clamped - base)
    }

    /// Splits into a segment index and progress within it.
    ///
    /// The exact end (`value == segment_count`) resolves to the last
    /// segment with progress `1.0`; progress is clamped to `[0, 1]`.
    #[must_use]
    pub fn as_segment_index(self, segment_count: usize) -> (SplineSegmentIndex, f64) {
        let last = segment_count.saturating_sub(1);
        let (handle, _) = self.as_handle_index();
        let index = handle.value().min(last);
        #[allow(clippy::cast_precision_loss)]
        let progress = (self.0 - index as f64).clamp(0.0, 1.0);
        (SplineSegmentIndex(index), progress)
    }
}

impl From<f64> for SplineLocation {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<f64> for NormalizedSplineLocation {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<SplineSegmentIndex> for NormalizedSplineLocation {
    #[allow(clippy::cast_precision_loss)]
    fn from(index: SplineSegmentIndex) -> Self {
        Self(index.value() as f64)
    }
}

macro_rules! location_arithmetic {
    ($ty:ident) => {
        impl Add<f64> for $ty {
            type Output = $ty;

            fn add(self, rhs: f64) -> $ty {
                $ty(self.0 + rhs)
            }
        }

        impl Sub<f64> for $ty {
            type Output = $ty;

            fn sub(self, rhs: f64) -> $ty {
                $ty(self.0 - rhs)
            }
        }

        impl Sub for $ty {
            type Output = f64;

            fn sub(self, rhs: $ty) -> f64 {
                self.0 - rhs.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

location_arithmetic!(SplineLocation);
location_arithmetic!(NormalizedSplineLocation);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn segment_index_inside() {
        let (seg, t) = NormalizedSplineLocation(1.25).as_segment_index(3);
        assert_eq!(seg, SplineSegmentIndex(1));
        assert_relative_eq!(t, 0.25);
    }

    #[test]
    fn exact_end_resolves_to_last_segment() {
        let (seg, t) = NormalizedSplineLocation(3.0).as_segment_index(3);
        assert_eq!(seg, SplineSegmentIndex(2));
        assert_relative_eq!(t, 1.0);
    }

    #[test]
    fn overshoot_clamps_progress() {
        let (seg, t) = NormalizedSplineLocation(3.005).as_segment_index(3);
        assert_eq!(seg, SplineSegmentIndex(2));
        assert_relative_eq!(t, 1.0);
    }

    #[test]
    fn handle_index_keeps_overshoot() {
        let (handle, overshoot) = NormalizedSplineLocation(2.5).as_handle_index();
        assert_eq!(handle, SplineHandleIndex(2));
        assert_relative_eq!(overshoot, 0.5);
    }

    #[test]
    fn location_arithmetic() {
        let a = SplineLocation(2.0) + 0.5;
        assert_relative_eq!(a - SplineLocation(1.0), 1.5);
        assert!(NormalizedSplineLocation(0.2) < NormalizedSplineLocation(0.3));
    }
}
