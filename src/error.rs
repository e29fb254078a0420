use thiserror::Error;

/// Top-level error type for spline construction and queries.
#[derive(Debug, Error)]
pub enum SplineError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    SplineType(#[from] SplineTypeError),

    #[error(transparent)]
    Sampling(#[from] SamplingError),
}

/// Errors raised while building a spline from handles.
#[derive(Debug, Error, PartialEq)]
pub enum ConstructionError {
    /// Counts are interpolated handles, margins excluded.
    #[error("not enough handles: {provided} provided, at least {required} required")]
    InsufficientHandles { provided: usize, required: usize },

    #[error("expected {expected} segment durations, got {provided}")]
    DurationCountMismatch { provided: usize, expected: usize },

    #[error("duration of segment {index} is negative")]
    NegativeDuration { index: usize },

    #[error("duration of segment {index} is not a comparable time")]
    InvalidDuration { index: usize },
}

/// Errors raised by location and time queries.
#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("{kind} location {value} is out of range [{min}, {max}]")]
    OutOfRange {
        kind: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("time {value} is out of range [0, {max}]")]
    TimeOutOfRange { value: String, max: String },
}

/// Errors related to spline type lookup.
#[derive(Debug, Error, PartialEq)]
pub enum SplineTypeError {
    #[error("unsupported spline type: {0}")]
    Unsupported(String),
}

/// Errors related to sampling parameters.
#[derive(Debug, Error, PartialEq)]
pub enum SamplingError {
    #[error("sample spacing must be positive and finite, got {0}")]
    InvalidSpacing(f64),

    #[error("at least one sample per segment is required")]
    NoSamplesPerSegment,

    #[error("sample range bound must be finite, got {0}")]
    NonFiniteBound(f64),

    #[error("sampling would produce {requested} sub-ranges, at most {max} allowed")]
    TooManySamples { requested: f64, max: usize },
}

/// Convenience type alias for results using [`SplineError`].
pub type Result<T> = std::result::Result<T, SplineError>;
