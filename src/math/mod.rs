mod ops;
mod time;

pub use ops::{Euclidean2, Euclidean3, EuclideanOps, GeometricOperations, ScalarOps};
pub use time::{DurationTime, ScalarTime, TimeOperations};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Lengths at or below this count as zero.
pub const TOLERANCE: f64 = 1e-10;
