use std::fmt;
use std::ops::{Add, Sub};

/// Index into a spline's full handle sequence, margin handles included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SplineHandleIndex(pub usize);

/// Index of a spline segment.
///
/// Segment `i` interpolates handles `i + 1` and `i + 2`; handles `i` and
/// `i + 3` only shape its tangents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SplineSegmentIndex(pub usize);

impl SplineHandleIndex {
    /// Returns the raw index.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl SplineSegmentIndex {
    /// Returns the raw index.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Returns the first handle of this segment's four-handle window.
    #[must_use]
    pub fn window_start(self) -> SplineHandleIndex {
        SplineHandleIndex(self.0)
    }
}

macro_rules! index_arithmetic {
    ($ty:ident) => {
        impl Add<usize> for $ty {
            type Output = $ty;

            fn add(self, rhs: usize) -> $ty {
                $ty(self.0 + rhs)
            }
        }

        impl Sub<usize> for $ty {
            type Output = $ty;

            fn sub(self, rhs: usize) -> $ty {
                $ty(self.0 - rhs)
            }
        }

        impl Sub for $ty {
            type Output = usize;

            fn sub(self, rhs: $ty) -> usize {
                self.0 - rhs.0
            }
        }

        impl From<usize> for $ty {
            fn from(value: usize) -> Self {
                $ty(value)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

index_arithmetic!(SplineHandleIndex);
index_arithmetic!(SplineSegmentIndex);
