mod bezier;
mod polynomial;

pub use bezier::BezierSegment;
pub use polynomial::{Polynomial, DEFAULT_ARC_LENGTH_SAMPLES};
