use std::cmp::Ordering;
use std::ops::Index;
use std::sync::OnceLock;

use tracing::{debug, trace};

use crate::error::{ConstructionError, LocationError, Result};
use crate::math::{GeometricOperations, ScalarTime, TimeOperations};

use super::catmull_rom::{catmull_rom_polynomial, CatmullRomSegment, TemporalWeights};
use super::construction::MIN_INTERPOLATED_HANDLES;
use super::index::{SplineHandleIndex, SplineSegmentIndex};
use super::location::{NormalizedSplineLocation, SplineLocation};
use super::sample::SplineSample;
use super::segment::SplineSegment;
use super::{SegmentDurations, SplineParams, SplineType};

/// A Catmull-Rom spline over an injected position algebra `O` and time
/// algebra `T`.
///
/// The handle sequence includes one margin handle at each end; margins shape
/// the end tangents but are not interpolated. Segment `i` runs from handle
/// `i + 1` to handle `i + 2`, so there are `handle_count - 3` segments.
///
/// The spline is immutable once built. Segment polynomials, arc lengths and
/// the cumulative spatial and temporal offsets are computed on first access
/// and cached for the lifetime of the instance. The caches use
/// [`OnceLock`], so a spline can be shared across threads.
///
/// Three location systems address the curve: [`SplineLocation`] (arc length),
/// [`NormalizedSplineLocation`] (segment + progress), and time.
#[derive(Debug, Clone)]
pub struct CatmullRomSpline<O: GeometricOperations, T: TimeOperations<O> = ScalarTime> {
    handles: Vec<O::Pos>,
    ops: O,
    time_ops: T,
    spline_type: SplineType,
    durations: SegmentDurations<T::Time>,
    params: SplineParams,
    segments: Box<[OnceLock<SplineSegment<O, T::Time>>]>,
    spatial_offsets: OnceLock<Vec<f64>>,
    temporal_offsets: OnceLock<Vec<T::Time>>,
}

impl<O: GeometricOperations, T: TimeOperations<O>> CatmullRomSpline<O, T> {
    /// Builds a spline from a full handle sequence, margins included.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InsufficientHandles`] if fewer than two
    /// handles remain after removing the margins, and
    /// [`ConstructionError::DurationCountMismatch`] or
    /// [`ConstructionError::NegativeDuration`] or
    /// [`ConstructionError::InvalidDuration`] for invalid explicit durations.
    pub fn try_from_parts(
        handles: Vec<O::Pos>,
        ops: O,
        time_ops: T,
        spline_type: SplineType,
        durations: SegmentDurations<T::Time>,
    ) -> Result<Self> {
        let interpolated = handles.len().saturating_sub(2);
        if interpolated < MIN_INTERPOLATED_HANDLES {
            return Err(ConstructionError::InsufficientHandles {
                provided: interpolated,
                required: MIN_INTERPOLATED_HANDLES,
            }
            .into());
        }
        let segment_count = handles.len() - 3;

        if let SegmentDurations::Explicit(list) = &durations {
            if list.len() != segment_count {
                return Err(ConstructionError::DurationCountMismatch {
                    provided: list.len(),
                    expected: segment_count,
                }
                .into());
            }
            let zero = time_ops.zero();
            for (index, d) in list.iter().enumerate() {
                match d.partial_cmp(&zero) {
                    None => return Err(ConstructionError::InvalidDuration { index }.into()),
                    Some(Ordering::Less) => {
                        return Err(ConstructionError::NegativeDuration { index }.into())
                    }
                    Some(_) => {}
                }
            }
        }

        debug!(
            handles = handles.len(),
            segments = segment_count,
            spline_type = %spline_type,
            explicit_durations = durations.is_explicit(),
            "built catmull-rom spline"
        );

        Ok(Self::from_validated_parts(
            handles,
            ops,
            time_ops,
            spline_type,
            durations,
            SplineParams::default(),
        ))
    }

    /// Assembles a spline whose handle and duration counts are already known
    /// to be consistent.
    pub(crate) fn from_validated_parts(
        handles: Vec<O::Pos>,
        ops: O,
        time_ops: T,
        spline_type: SplineType,
        durations: SegmentDurations<T::Time>,
        params: SplineParams,
    ) -> Self {
        debug_assert!(handles.len() >= MIN_INTERPOLATED_HANDLES + 2);
        let segment_count = handles.len() - 3;
        Self {
            handles,
            ops,
            time_ops,
            spline_type,
            durations,
            params,
            segments: (0..segment_count).map(|_| OnceLock::new()).collect(),
            spatial_offsets: OnceLock::new(),
            temporal_offsets: OnceLock::new(),
        }
    }

    /// Replaces the numeric parameters, discarding any cached results.
    #[must_use]
    pub fn with_params(mut self, params: SplineParams) -> Self {
        self.params = params;
        self.reset_caches();
        self
    }

    /// Switches the knot parameterization, discarding any cached results.
    #[must_use]
    pub fn with_spline_type(mut self, spline_type: SplineType) -> Self {
        self.spline_type = spline_type;
        self.reset_caches();
        self
    }

    fn reset_caches(&mut self) {
        self.segments = (0..self.segment_count()).map(|_| OnceLock::new()).collect();
        self.spatial_offsets = OnceLock::new();
        self.temporal_offsets = OnceLock::new();
    }

    /// Returns the position algebra.
    #[must_use]
    pub fn ops(&self) -> &O {
        &self.ops
    }

    /// Returns the time algebra.
    #[must_use]
    pub fn time_ops(&self) -> &T {
        &self.time_ops
    }

    /// Returns the knot parameterization.
    #[must_use]
    pub fn spline_type(&self) -> SplineType {
        self.spline_type
    }

    /// Returns the numeric parameters.
    #[must_use]
    pub fn params(&self) -> &SplineParams {
        &self.params
    }

    /// Returns the segment durations.
    #[must_use]
    pub fn durations(&self) -> &SegmentDurations<T::Time> {
        &self.durations
    }

    /// Number of handles, margins included.
    #[must_use]
    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    /// Number of segments, `handle_count - 3`.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.handles.len() - 3
    }

    /// All handles, margins included.
    #[must_use]
    pub fn all_handles(&self) -> &[O::Pos] {
        &self.handles
    }

    /// The interpolated handles, margins excluded.
    #[must_use]
    pub fn handles(&self) -> &[O::Pos] {
        &self.handles[1..self.handles.len() - 1]
    }

    /// The margin handle before the first interpolated handle.
    #[must_use]
    pub fn begin_margin_handle(&self) -> &O::Pos {
        &self.handles[0]
    }

    /// The margin handle after the last interpolated handle.
    #[must_use]
    pub fn end_margin_handle(&self) -> &O::Pos {
        &self.handles[self.handles.len() - 1]
    }

    /// The first interpolated handle, where the curve starts.
    #[must_use]
    pub fn first_handle(&self) -> &O::Pos {
        &self.handles[1]
    }

    /// The last interpolated handle, where the curve ends.
    #[must_use]
    pub fn last_handle(&self) -> &O::Pos {
        &self.handles[self.handles.len() - 2]
    }

    /// Returns a handle, or `None` if the index is out of range.
    #[must_use]
    pub fn handle(&self, index: SplineHandleIndex) -> Option<&O::Pos> {
        self.handles.get(index.value())
    }

    /// Returns a segment, building its polynomial on first access.
    #[must_use]
    pub fn segment(&self, index: SplineSegmentIndex) -> Option<&SplineSegment<O, T::Time>> {
        let i = index.value();
        let cell = self.segments.get(i)?;
        Some(cell.get_or_init(|| self.build_segment(i)))
    }

    /// Iterates over all segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &SplineSegment<O, T::Time>> + '_ {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, cell)| cell.get_or_init(|| self.build_segment(i)))
    }

    fn build_segment(&self, i: usize) -> SplineSegment<O, T::Time> {
        trace!(segment = i, "building segment polynomial");
        let window = [
            &self.handles[i],
            &self.handles[i + 1],
            &self.handles[i + 2],
            &self.handles[i + 3],
        ];
        let weights = self.temporal_weights(i);
        let polynomial = catmull_rom_polynomial(
            &self.ops,
            window,
            self.spline_type,
            weights,
            self.params.coincidence_epsilon,
        )
        .with_arc_length_samples(self.params.arc_length_samples);
        SplineSegment::new(SplineSegmentIndex(i), polynomial, self.segment_duration(i))
    }

    fn temporal_weights(&self, i: usize) -> TemporalWeights {
        let SegmentDurations::Explicit(list) = &self.durations else {
            return TemporalWeights::default();
        };
        let share = |own: &T::Time, other: Option<&T::Time>| {
            let other = other?;
            let w = self.time_ops.ratio(own, &self.time_ops.add(own, other));
            w.is_finite().then_some(w)
        };
        let own = &list[i];
        TemporalWeights {
            start: share(own, i.checked_sub(1).and_then(|p| list.get(p))),
            end: share(own, list.get(i + 1)),
        }
    }

    fn segment_duration(&self, i: usize) -> T::Time {
        match &self.durations {
            SegmentDurations::Uniform => self.time_ops.unit(),
            SegmentDurations::Explicit(list) => list[i].clone(),
        }
    }

    /// Cumulative arc length at the start of each segment, plus the total.
    #[must_use]
    pub fn spatial_offsets(&self) -> &[f64] {
        self.spatial_offsets.get_or_init(|| {
            trace!(segments = self.segment_count(), "computing spatial offsets");
            let mut offsets = Vec::with_capacity(self.segment_count() + 1);
            let mut total = 0.0;
            offsets.push(total);
            for segment in self.segments() {
                total += segment.length();
                offsets.push(total);
            }
            offsets
        })
    }

    /// Cumulative time at the start of each segment, plus the total.
    #[must_use]
    pub fn temporal_offsets(&self) -> &[T::Time] {
        self.temporal_offsets.get_or_init(|| {
            trace!(segments = self.segment_count(), "computing temporal offsets");
            let mut offsets = Vec::with_capacity(self.segment_count() + 1);
            let mut total = self.time_ops.zero();
            offsets.push(total.clone());
            for i in 0..self.segment_count() {
                total = self.time_ops.add(&total, &self.segment_duration(i));
                offsets.push(total.clone());
            }
            offsets
        })
    }

    /// Total arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.spatial_offsets()[self.segment_count()]
    }

    /// Total time needed to traverse the spline.
    #[must_use]
    pub fn total_duration(&self) -> T::Time {
        self.temporal_offsets()[self.segment_count()].clone()
    }

    #[allow(clippy::cast_precision_loss)]
    fn normalized_end(&self) -> f64 {
        self.segment_count() as f64
    }

    /// Arc length past the end accepted as overshoot.
    fn length_tolerance(&self) -> f64 {
        let last = self.segment_count() - 1;
        self.segment(SplineSegmentIndex(last))
            .map_or(0.0, |s| s.length() * self.params.end_overshoot_tolerance)
    }

    /// Returns the four-handle window containing `location`, or `None` if the
    /// location lies outside the spline.
    #[must_use]
    pub fn catmull_rom_segment_at(
        &self,
        location: NormalizedSplineLocation,
    ) -> Option<CatmullRomSegment<'_, O::Pos>> {
        CatmullRomSegment::at(&self.handles, location, self.params.end_overshoot_tolerance)
    }

    /// Samples the spline at a normalized location.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::OutOfRange`] for negative locations and
    /// locations past `segment_count` by more than the overshoot tolerance.
    pub fn at_normalized(
        &self,
        location: NormalizedSplineLocation,
    ) -> Result<SplineSample<'_, O, T>> {
        let window = self
            .catmull_rom_segment_at(location)
            .ok_or_else(|| self.normalized_out_of_range(location))?;
        let segment = self
            .segment(SplineSegmentIndex(window.start.value()))
            .ok_or_else(|| self.normalized_out_of_range(location))?;
        Ok(SplineSample::new(self, segment, window.overshoot))
    }

    /// Samples the spline at an arc-length location.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::OutOfRange`] outside `[0, length]`.
    pub fn at(&self, location: SplineLocation) -> Result<SplineSample<'_, O, T>> {
        let normalized = self.normalize(location)?;
        self.at_normalized(normalized)
    }

    /// Samples the spline at a point in time.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::TimeOutOfRange`] outside
    /// `[0, total_duration]`.
    pub fn at_time(&self, time: &T::Time) -> Result<SplineSample<'_, O, T>> {
        let normalized = self.normalized_from_time(time)?;
        self.at_normalized(normalized)
    }

    /// Converts an arc-length location into a normalized one.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::OutOfRange`] outside `[0, length]`.
    pub fn normalize(&self, location: SplineLocation) -> Result<NormalizedSplineLocation> {
        let offsets = self.spatial_offsets();
        let value = location.value();
        let length = self.length();
        if !(0.0..=length + self.length_tolerance()).contains(&value) {
            return Err(LocationError::OutOfRange {
                kind: "spline",
                value,
                min: 0.0,
                max: length,
            }
            .into());
        }
        let index = offsets
            .partition_point(|&o| o <= value)
            .saturating_sub(1)
            .min(self.segment_count() - 1);
        Ok(self.normalize_in_segment(index, value - offsets[index]))
    }

    fn normalize_in_segment(&self, index: usize, within: f64) -> NormalizedSplineLocation {
        let progress = self
            .segment(SplineSegmentIndex(index))
            .map_or(0.0, |s| s.polynomial().progress_at_length(within));
        NormalizedSplineLocation::from(SplineSegmentIndex(index)) + progress
    }

    /// Converts a normalized location into an arc-length location.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::OutOfRange`] for locations outside the
    /// spline.
    pub fn denormalize(&self, location: NormalizedSplineLocation) -> Result<SplineLocation> {
        let sample = self.at_normalized(location)?;
        Ok(sample.location())
    }

    /// Converts ascending arc-length locations into normalized locations in
    /// one forward pass.
    ///
    /// The input must be sorted ascending; this is checked in debug builds
    /// only. Unsorted input in release builds gives meaningless results.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::OutOfRange`] for the first location outside
    /// `[0, length]`.
    pub fn bulk_normalized_locations_ordered(
        &self,
        locations: &[SplineLocation],
    ) -> Result<Vec<NormalizedSplineLocation>> {
        debug_assert!(
            locations.windows(2).all(|w| w[0].partial_cmp(&w[1]) != Some(Ordering::Greater)),
            "locations must be sorted ascending"
        );
        let offsets = self.spatial_offsets();
        let length = self.length();
        let max = length + self.length_tolerance();
        let last = self.segment_count() - 1;

        let mut index = 0;
        let mut result = Vec::with_capacity(locations.len());
        for location in locations {
            let value = location.value();
            if !(0.0..=max).contains(&value) {
                return Err(LocationError::OutOfRange {
                    kind: "spline",
                    value,
                    min: 0.0,
                    max: length,
                }
                .into());
            }
            while index < last && offsets[index + 1] <= value {
                index += 1;
            }
            result.push(self.normalize_in_segment(index, value - offsets[index]));
        }
        Ok(result)
    }

    /// Converts a time into a normalized location.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::TimeOutOfRange`] outside
    /// `[0, total_duration]`.
    pub fn normalized_from_time(&self, time: &T::Time) -> Result<NormalizedSplineLocation> {
        let offsets = self.temporal_offsets();
        let last = self.segment_count() - 1;
        let total = &offsets[last + 1];
        let tolerance = self
            .time_ops
            .scale(&self.segment_duration(last), self.params.end_overshoot_tolerance);
        let zero = self.time_ops.zero();
        let max = self.time_ops.add(total, &tolerance);
        if !(zero <= *time && *time <= max) {
            return Err(LocationError::TimeOutOfRange {
                value: format!("{time:?}"),
                max: format!("{total:?}"),
            }
            .into());
        }
        let index = offsets.partition_point(|o| o <= time).saturating_sub(1).min(last);
        let within = self.time_ops.sub(time, &offsets[index]);
        let progress = self.time_ops.ratio(&within, &self.segment_duration(index));
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Ok(NormalizedSplineLocation::from(SplineSegmentIndex(index)) + progress)
    }

    /// Converts a normalized location into the time it is reached.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::OutOfRange`] for locations outside the
    /// spline.
    pub fn time_of(&self, location: NormalizedSplineLocation) -> Result<T::Time> {
        let sample = self.at_normalized(location)?;
        Ok(sample.time())
    }

    fn normalized_out_of_range(&self, location: NormalizedSplineLocation) -> crate::SplineError {
        LocationError::OutOfRange {
            kind: "normalized",
            value: location.value(),
            min: 0.0,
            max: self.normalized_end(),
        }
        .into()
    }
}

impl<O: GeometricOperations, T: TimeOperations<O>> Index<SplineHandleIndex> for CatmullRomSpline<O, T> {
    type Output = O::Pos;

    fn index(&self, index: SplineHandleIndex) -> &O::Pos {
        &self.handles[index.value()]
    }
}

impl<O: GeometricOperations, T: TimeOperations<O>> Index<SplineSegmentIndex> for CatmullRomSpline<O, T> {
    type Output = SplineSegment<O, T::Time>;

    /// # Panics
    ///
    /// Panics if `index >= segment_count()`.
    fn index(&self, index: SplineSegmentIndex) -> &Self::Output {
        let i = index.value();
        self.segments[i].get_or_init(|| self.build_segment(i))
    }
}

impl<O, T> PartialEq for CatmullRomSpline<O, T>
where
    O: GeometricOperations + PartialEq,
    O::Pos: PartialEq,
    T: TimeOperations<O> + PartialEq,
    T::Time: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.handles == other.handles
            && self.spline_type == other.spline_type
            && self.durations == other.durations
            && self.ops == other.ops
            && self.time_ops == other.time_ops
    }
}
