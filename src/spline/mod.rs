mod catmull_rom;
mod catmull_rom_spline;
mod construction;
mod copy;
mod index;
mod location;
mod sample;
mod segment;
#[cfg(feature = "serde")]
mod serial;

use std::fmt;
use std::str::FromStr;

pub use catmull_rom::{catmull_rom_polynomial, CatmullRomSegment, TemporalWeights};
pub use catmull_rom_spline::CatmullRomSpline;
pub use construction::{HandleMargins, MIN_INTERPOLATED_HANDLES};
pub use index::{SplineHandleIndex, SplineSegmentIndex};
pub use location::{NormalizedSplineLocation, SplineLocation};
pub use sample::SplineSample;
pub use segment::SplineSegment;
#[cfg(feature = "serde")]
pub use serial::SplineData;

use crate::error::SplineTypeError;
use crate::geometry::DEFAULT_ARC_LENGTH_SAMPLES;

/// Catmull-Rom knot parameterization.
///
/// Selects the exponent `α` applied to handle distances when estimating
/// tangents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SplineType {
    /// `α = 0`; may form cusps and loops within a segment.
    Uniform,
    /// `α = 0.5`; never self-intersects within a segment.
    #[default]
    Centripetal,
    /// `α = 1`.
    Chordal,
}

impl SplineType {
    /// Returns the knot exponent `α`.
    #[must_use]
    pub fn alpha(self) -> f64 {
        match self {
            Self::Uniform => 0.0,
            Self::Centripetal => 0.5,
            Self::Chordal => 1.0,
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Centripetal => "centripetal",
            Self::Chordal => "chordal",
        }
    }
}

impl fmt::Display for SplineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SplineType {
    type Err = SplineTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "centripetal" => Ok(Self::Centripetal),
            "chordal" => Ok(Self::Chordal),
            _ => Err(SplineTypeError::Unsupported(s.to_owned())),
        }
    }
}

impl TryFrom<u8> for SplineType {
    type Error = SplineTypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Uniform),
            1 => Ok(Self::Centripetal),
            2 => Ok(Self::Chordal),
            other => Err(SplineTypeError::Unsupported(other.to_string())),
        }
    }
}

/// Parameters controlling numeric behaviour of a spline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplineParams {
    /// Sub-intervals of each segment's arc-length table.
    pub arc_length_samples: usize,
    /// How far past the end (in segments) a normalized query may overshoot.
    pub end_overshoot_tolerance: f64,
    /// Handle gaps shorter than this count as coincident.
    pub coincidence_epsilon: f64,
}

impl Default for SplineParams {
    fn default() -> Self {
        Self {
            arc_length_samples: DEFAULT_ARC_LENGTH_SAMPLES,
            end_overshoot_tolerance: 0.01,
            coincidence_epsilon: 1e-6,
        }
    }
}

/// How long each segment of a spline takes to traverse.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentDurations<Time> {
    /// Every segment lasts one time unit; time equals normalized location.
    Uniform,
    /// One duration per segment.
    Explicit(Vec<Time>),
}

impl<Time> SegmentDurations<Time> {
    /// Returns whether durations were given explicitly.
    #[must_use]
    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn alpha_per_type() {
        assert!(SplineType::Uniform.alpha().abs() < 1e-12);
        assert!((SplineType::Centripetal.alpha() - 0.5).abs() < 1e-12);
        assert!((SplineType::Chordal.alpha() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Chordal".parse::<SplineType>().unwrap(), SplineType::Chordal);
        assert_eq!(
            SplineType::from_str(&SplineType::Uniform.to_string()).unwrap(),
            SplineType::Uniform
        );
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert_eq!(
            "bezier".parse::<SplineType>(),
            Err(SplineTypeError::Unsupported("bezier".into()))
        );
        assert_eq!(
            SplineType::try_from(7),
            Err(SplineTypeError::Unsupported("7".into()))
        );
        assert_eq!(SplineType::try_from(1).unwrap(), SplineType::Centripetal);
    }

    #[test]
    fn default_params() {
        let p = SplineParams::default();
        assert_eq!(p.arc_length_samples, DEFAULT_ARC_LENGTH_SAMPLES);
        assert!((p.end_overshoot_tolerance - 0.01).abs() < 1e-12);
    }
}
