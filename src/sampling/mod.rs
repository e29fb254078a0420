mod sample_between;
mod sample_every;
mod sample_per_segment;

pub use sample_between::SampleBetween;
pub use sample_every::SampleEvery;
pub use sample_per_segment::SamplePerSegment;

/// Fewest sub-ranges a uniform sampling produces.
///
/// One sub-range gives two samples. Resampling into a new spline needs at
/// least three points, so it asks for two.
pub const DEFAULT_MIN_SEGMENTS: usize = 1;

/// Most sub-ranges a single uniform sampling may produce.
pub const MAX_SAMPLE_SEGMENTS: usize = 1 << 24;
