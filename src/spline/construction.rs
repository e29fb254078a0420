use crate::error::{ConstructionError, Result};
use crate::math::{GeometricOperations, ScalarTime, TimeOperations};

use super::catmull_rom_spline::CatmullRomSpline;
use super::{SegmentDurations, SplineType};

/// Minimum number of interpolated (non-margin) handles of a spline.
pub const MIN_INTERPOLATED_HANDLES: usize = 2;

/// How margin handles are generated from the interpolated handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleMargins {
    /// Reflect the second handle through the first (`2·P0 - P1`), and the
    /// second-to-last through the last.
    #[default]
    Reflected,
    /// Close the curve: the first handle is repeated at the end if needed,
    /// the begin margin is the second-to-last handle and the end margin is
    /// the second handle.
    Looping,
}

impl HandleMargins {
    /// Surrounds `handles` with margin handles.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InsufficientHandles`] if fewer than
    /// [`MIN_INTERPOLATED_HANDLES`] handles are given.
    pub fn apply<O: GeometricOperations>(
        self,
        ops: &O,
        mut handles: Vec<O::Pos>,
        epsilon: f64,
    ) -> Result<Vec<O::Pos>> {
        if handles.len() < MIN_INTERPOLATED_HANDLES {
            return Err(ConstructionError::InsufficientHandles {
                provided: handles.len(),
                required: MIN_INTERPOLATED_HANDLES,
            }
            .into());
        }
        let n = handles.len();
        let (begin, end) = match self {
            Self::Reflected => (
                ops.lerp(&handles[1], &handles[0], 2.0),
                ops.lerp(&handles[n - 2], &handles[n - 1], 2.0),
            ),
            Self::Looping => {
                if ops.distance(&handles[0], &handles[n - 1]) >= epsilon {
                    handles.push(handles[0].clone());
                }
                let n = handles.len();
                (handles[n - 2].clone(), handles[1].clone())
            }
        };
        let mut all = Vec::with_capacity(handles.len() + 2);
        all.push(begin);
        all.append(&mut handles);
        all.push(end);
        Ok(all)
    }
}

impl<O: GeometricOperations> CatmullRomSpline<O, ScalarTime> {
    /// Builds a spline through `handles`, generating the margin handles.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InsufficientHandles`] if fewer than two
    /// handles are given.
    pub fn try_from_handles(
        handles: impl IntoIterator<Item = O::Pos>,
        ops: O,
        spline_type: SplineType,
        margins: HandleMargins,
    ) -> Result<Self> {
        let epsilon = super::SplineParams::default().coincidence_epsilon;
        let all = margins.apply(&ops, handles.into_iter().collect(), epsilon)?;
        Self::try_from_parts(all, ops, ScalarTime, spline_type, SegmentDurations::Uniform)
    }

    /// Builds a spline through `handles`, generating the margin handles.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two handles are given. Use
    /// [`try_from_handles`](Self::try_from_handles) to handle that case.
    #[must_use]
    pub fn from_handles(
        handles: impl IntoIterator<Item = O::Pos>,
        ops: O,
        spline_type: SplineType,
        margins: HandleMargins,
    ) -> Self {
        match Self::try_from_handles(handles, ops, spline_type, margins) {
            Ok(spline) => spline,
            Err(err) => panic!("{err}"),
        }
    }

    /// Builds a spline from a handle sequence whose first and last entries
    /// are the margin handles.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InsufficientHandles`] if fewer than four
    /// handles are given.
    pub fn try_from_handles_including_margin(
        handles: impl IntoIterator<Item = O::Pos>,
        ops: O,
        spline_type: SplineType,
    ) -> Result<Self> {
        Self::try_from_parts(
            handles.into_iter().collect(),
            ops,
            ScalarTime,
            spline_type,
            SegmentDurations::Uniform,
        )
    }

    /// Builds a spline from a handle sequence whose first and last entries
    /// are the margin handles.
    ///
    /// # Panics
    ///
    /// Panics if fewer than four handles are given.
    #[must_use]
    pub fn from_handles_including_margin(
        handles: impl IntoIterator<Item = O::Pos>,
        ops: O,
        spline_type: SplineType,
    ) -> Self {
        match Self::try_from_handles_including_margin(handles, ops, spline_type) {
            Ok(spline) => spline,
            Err(err) => panic!("{err}"),
        }
    }

    /// Builds a spline from explicit margins and the interpolated handles
    /// between them.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InsufficientHandles`] if fewer than two
    /// interpolated handles are given.
    pub fn try_new(
        begin_margin: O::Pos,
        handles: impl IntoIterator<Item = O::Pos>,
        end_margin: O::Pos,
        ops: O,
        spline_type: SplineType,
    ) -> Result<Self> {
        let all = std::iter::once(begin_margin)
            .chain(handles)
            .chain(std::iter::once(end_margin));
        Self::try_from_handles_including_margin(all, ops, spline_type)
    }
}

impl<O: GeometricOperations, T: TimeOperations<O>> CatmullRomSpline<O, T> {
    /// Builds a temporal spline through `handles` where segment `i` takes
    /// `durations[i]` to traverse.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InsufficientHandles`] if fewer than two
    /// handles are given, [`ConstructionError::DurationCountMismatch`] if
    /// `durations` does not have one entry per segment, and
    /// [`ConstructionError::NegativeDuration`] for negative durations, and
    /// [`ConstructionError::InvalidDuration`] for durations that do not
    /// compare with zero.
    pub fn try_from_timed_handles(
        handles: impl IntoIterator<Item = O::Pos>,
        durations: Vec<T::Time>,
        ops: O,
        time_ops: T,
        spline_type: SplineType,
        margins: HandleMargins,
    ) -> Result<Self> {
        let epsilon = super::SplineParams::default().coincidence_epsilon;
        let all = margins.apply(&ops, handles.into_iter().collect(), epsilon)?;
        Self::try_from_parts(
            all,
            ops,
            time_ops,
            spline_type,
            SegmentDurations::Explicit(durations),
        )
    }
}
