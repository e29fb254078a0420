use tracing::debug;

use crate::error::Result;
use crate::math::{GeometricOperations, TimeOperations};
use crate::sampling::SampleEvery;

use super::catmull_rom_spline::CatmullRomSpline;
use super::construction::HandleMargins;
use super::index::SplineSegmentIndex;
use super::SegmentDurations;

impl<O: GeometricOperations, T: TimeOperations<O>> CatmullRomSpline<O, T> {
    /// Returns the same curve traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut handles = self.all_handles().to_vec();
        handles.reverse();
        let durations = match self.durations() {
            SegmentDurations::Uniform => SegmentDurations::Uniform,
            SegmentDurations::Explicit(list) => {
                SegmentDurations::Explicit(list.iter().rev().cloned().collect())
            }
        };
        debug!(handles = handles.len(), "reversed spline");
        self.with_handles(handles, durations)
    }

    /// Moves every handle against an offset derived from the local tangent.
    ///
    /// Each handle `h` becomes `h - offset(tangent)`, where `tangent` is the
    /// derivative in segment at that handle. Margin handles use the tangent
    /// of the adjacent interpolated handle.
    #[must_use]
    pub fn copy_with_offset<F>(&self, offset: F) -> Self
    where
        F: Fn(&O::Diff) -> O::Diff,
    {
        let last_segment = self.segment_count() - 1;
        let handles = self
            .all_handles()
            .iter()
            .enumerate()
            .map(|(h, handle)| {
                let (segment, t) = if h <= 1 {
                    (0, 0.0)
                } else {
                    ((h - 2).min(last_segment), 1.0)
                };
                let tangent = self[SplineSegmentIndex(segment)].derivative(t);
                self.ops().sub_diff(handle, &offset(&tangent))
            })
            .collect();
        debug!(handles = self.handle_count(), "offset spline along tangents");
        self.with_handles(handles, self.durations().clone())
    }

    /// Translates every handle, margins included, by `offset`.
    #[must_use]
    pub fn copy_with_static_offset(&self, offset: &O::Diff) -> Self {
        let handles = self
            .all_handles()
            .iter()
            .map(|h| self.ops().add(h, offset))
            .collect();
        self.with_handles(handles, self.durations().clone())
    }

    /// Rebuilds the spline with handles placed at uniform arc-length
    /// `spacing` along the current curve.
    ///
    /// At least three handles are produced. Margins are regenerated by
    /// reflection. Explicit durations are spread evenly over the new
    /// segments so the total duration is kept.
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::InvalidSpacing`](crate::error::SamplingError::InvalidSpacing)
    /// for a non-positive or non-finite spacing.
    pub fn copy_with_different_handle_distance(&self, spacing: f64) -> Result<Self> {
        let points = SampleEvery::new(spacing)
            .with_min_segments(2)
            .positions(self)?;
        let segment_count = points.len() - 1;
        let handles =
            HandleMargins::Reflected.apply(self.ops(), points, self.params().coincidence_epsilon)?;

        let durations = match self.durations() {
            SegmentDurations::Uniform => SegmentDurations::Uniform,
            SegmentDurations::Explicit(_) => {
                #[allow(clippy::cast_precision_loss)]
                let share = 1.0 / segment_count as f64;
                let each = self.time_ops().scale(&self.total_duration(), share);
                SegmentDurations::Explicit(vec![each; segment_count])
            }
        };
        debug!(
            spacing,
            old_segments = self.segment_count(),
            new_segments = segment_count,
            "resampled spline handles"
        );
        Ok(self.with_handles(handles, durations))
    }

    /// Converts the spline to another position algebra, keeping its type,
    /// parameters and durations.
    #[must_use]
    pub fn map<O2, F>(&self, f: F, ops: O2) -> CatmullRomSpline<O2, T>
    where
        O2: GeometricOperations,
        T: TimeOperations<O2, Time = <T as TimeOperations<O>>::Time>,
        F: FnMut(&O::Pos) -> O2::Pos,
    {
        let handles = self.all_handles().iter().map(f).collect();
        CatmullRomSpline::from_validated_parts(
            handles,
            ops,
            self.time_ops().clone(),
            self.spline_type(),
            self.durations().clone(),
            *self.params(),
        )
    }

    fn with_handles(&self, handles: Vec<O::Pos>, durations: SegmentDurations<T::Time>) -> Self {
        Self::from_validated_parts(
            handles,
            self.ops().clone(),
            self.time_ops().clone(),
            self.spline_type(),
            durations,
            *self.params(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{SamplingError, SplineError};
    use crate::math::{Euclidean2, Euclidean3, Point2, Point3, ScalarTime, Vector2};
    use crate::spline::{NormalizedSplineLocation, SplineLocation, SplineType};
    use approx::assert_relative_eq;

    fn wave() -> CatmullRomSpline<Euclidean2> {
        CatmullRomSpline::from_handles(
            [
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(2.5, 0.5),
                Point2::new(4.0, 2.0),
                Point2::new(5.0, 0.0),
            ],
            Euclidean2::default(),
            SplineType::Centripetal,
            HandleMargins::Reflected,
        )
    }

    #[test]
    fn reversing_twice_restores_the_spline() {
        let spline = wave();
        let back = spline.reversed().reversed();
        assert_eq!(back, spline);
    }

    #[test]
    fn reversed_spline_runs_backwards() {
        let spline = wave();
        let reversed = spline.reversed();
        assert_eq!(reversed.first_handle(), spline.last_handle());
        assert_relative_eq!(reversed.length(), spline.length(), epsilon = 1e-9);

        let end = 4.0;
        for s in [0.0, 0.3, 1.5, 2.75, 4.0] {
            let a = spline.at_normalized(NormalizedSplineLocation(s)).unwrap();
            let b = reversed.at_normalized(NormalizedSplineLocation(end - s)).unwrap();
            assert_relative_eq!(a.position(), b.position(), epsilon = 1e-9);
            assert_relative_eq!(a.velocity(), -b.velocity(), epsilon = 1e-9);
        }
    }

    #[test]
    fn reversal_reverses_explicit_durations() {
        let spline = CatmullRomSpline::try_from_timed_handles(
            [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(3.0, 0.0)],
            vec![1.0, 4.0],
            Euclidean2::default(),
            ScalarTime,
            SplineType::Centripetal,
            HandleMargins::Reflected,
        )
        .unwrap();
        let reversed = spline.reversed();
        assert_eq!(*reversed.durations(), SegmentDurations::Explicit(vec![4.0, 1.0]));
    }

    #[test]
    fn static_offset_moves_every_handle() {
        let spline = wave();
        let offset = Vector2::new(3.0, -2.0);
        let moved = spline.copy_with_static_offset(&offset);
        assert_eq!(moved.handle_count(), spline.handle_count());
        for (m, h) in moved.all_handles().iter().zip(spline.all_handles()) {
            assert_eq!(*m, h + offset);
        }
    }

    #[test]
    fn tangent_offset_shifts_line_sideways() {
        let spline = CatmullRomSpline::from_handles(
            (0..4).map(|i| Point2::new(f64::from(i), 0.0)),
            Euclidean2::default(),
            SplineType::Centripetal,
            HandleMargins::Reflected,
        );
        // right-hand normal, subtracted: shifts to the left of travel
        let shifted = spline.copy_with_offset(|d| Vector2::new(d.y, -d.x).normalize());
        for (s, h) in shifted.all_handles().iter().zip(spline.all_handles()) {
            assert_relative_eq!(*s, h + Vector2::new(0.0, 1.0), epsilon = 1e-9);
        }
    }

    #[test]
    fn resampling_spaces_handles_evenly() {
        let spline = CatmullRomSpline::from_handles(
            (0..=4).map(|i| Point2::new(f64::from(i), 0.0)),
            Euclidean2::default(),
            SplineType::Centripetal,
            HandleMargins::Reflected,
        );
        let resampled = spline.copy_with_different_handle_distance(0.5).unwrap();
        assert_eq!(resampled.handles().len(), 9);
        assert_relative_eq!(resampled.length(), spline.length(), epsilon = 1e-6);
        for pair in resampled.handles().windows(2) {
            assert_relative_eq!((pair[1] - pair[0]).norm(), 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn resampling_keeps_at_least_three_handles() {
        let resampled = wave().copy_with_different_handle_distance(1000.0).unwrap();
        assert_eq!(resampled.handles().len(), 3);
        assert_relative_eq!(*resampled.first_handle(), *wave().first_handle(), epsilon = 1e-9);
        assert_relative_eq!(*resampled.last_handle(), *wave().last_handle(), epsilon = 1e-9);
    }

    #[test]
    fn resampling_spreads_explicit_durations() {
        let spline = CatmullRomSpline::try_from_timed_handles(
            [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(2.0, 0.0)],
            vec![2.0, 2.0],
            Euclidean2::default(),
            ScalarTime,
            SplineType::Centripetal,
            HandleMargins::Reflected,
        )
        .unwrap();
        let resampled = spline.copy_with_different_handle_distance(0.5).unwrap();
        assert_eq!(
            *resampled.durations(),
            SegmentDurations::Explicit(vec![1.0; 4])
        );
        assert_relative_eq!(resampled.total_duration(), 4.0);
    }

    #[test]
    fn resampling_rejects_bad_spacing() {
        let err = wave().copy_with_different_handle_distance(0.0).unwrap_err();
        assert!(matches!(
            err,
            SplineError::Sampling(SamplingError::InvalidSpacing(_))
        ));
    }

    #[test]
    fn map_lifts_into_three_dimensions() {
        let spline = wave();
        let lifted = spline.map(|p| Point3::new(p.x, p.y, 0.0), Euclidean3::default());
        assert_eq!(lifted.handle_count(), spline.handle_count());
        assert_eq!(lifted.spline_type(), spline.spline_type());
        assert_relative_eq!(lifted.length(), spline.length(), epsilon = 1e-9);
        let p = lifted.at(SplineLocation(1.0)).unwrap().position();
        let q = spline.at(SplineLocation(1.0)).unwrap().position();
        assert_relative_eq!(p, Point3::new(q.x, q.y, 0.0), epsilon = 1e-9);
    }
}
