use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::{GeometricOperations, TimeOperations};

use super::catmull_rom_spline::CatmullRomSpline;
use super::{SegmentDurations, SplineParams, SplineType};

/// Serializable form of a [`CatmullRomSpline`].
///
/// Holds everything except the position and time algebras, which are
/// supplied again by [`CatmullRomSpline::from_data`]. Caches are never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplineData<Pos, Time> {
    /// All handles, margins included.
    pub handles: Vec<Pos>,
    pub spline_type: SplineType,
    pub durations: SegmentDurations<Time>,
    #[serde(default)]
    pub params: SplineParams,
}

impl<O: GeometricOperations, T: TimeOperations<O>> CatmullRomSpline<O, T> {
    /// Extracts the serializable data of this spline.
    #[must_use]
    pub fn to_data(&self) -> SplineData<O::Pos, T::Time> {
        SplineData {
            handles: self.all_handles().to_vec(),
            spline_type: self.spline_type(),
            durations: self.durations().clone(),
            params: *self.params(),
        }
    }

    /// Rebuilds a spline from deserialized data.
    ///
    /// # Errors
    ///
    /// Fails with the same validation errors as
    /// [`try_from_parts`](Self::try_from_parts).
    pub fn from_data(data: SplineData<O::Pos, T::Time>, ops: O, time_ops: T) -> Result<Self> {
        let spline =
            Self::try_from_parts(data.handles, ops, time_ops, data.spline_type, data.durations)?;
        Ok(spline.with_params(data.params))
    }
}
