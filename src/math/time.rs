use std::fmt::Debug;
use std::time::Duration;

use super::GeometricOperations;

/// The time algebra a temporal spline is evaluated over.
///
/// `O` is the geometric algebra whose differences get divided by time to
/// produce velocities.
pub trait TimeOperations<O: GeometricOperations>: Clone {
    /// A point in time, or a span of time.
    type Time: Clone + PartialOrd + Debug;
    /// `O::Diff` per `Time`.
    type Velocity;

    /// The zero time.
    fn zero(&self) -> Self::Time;

    /// Duration of one segment of a spline without explicit durations.
    fn unit(&self) -> Self::Time;

    /// `a + b`
    fn add(&self, a: &Self::Time, b: &Self::Time) -> Self::Time;

    /// `a - b`
    fn sub(&self, a: &Self::Time, b: &Self::Time) -> Self::Time;

    /// `t * s`
    fn scale(&self, t: &Self::Time, s: f64) -> Self::Time;

    /// `a / b` as a plain number.
    fn ratio(&self, a: &Self::Time, b: &Self::Time) -> f64;

    /// `d / dt`
    fn per_time(&self, ops: &O, d: &O::Diff, dt: &Self::Time) -> Self::Velocity;
}

/// Time as plain `f64`; velocities share the difference type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScalarTime;

impl<O: GeometricOperations> TimeOperations<O> for ScalarTime {
    type Time = f64;
    type Velocity = O::Diff;

    fn zero(&self) -> f64 {
        0.0
    }

    fn unit(&self) -> f64 {
        1.0
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }

    fn sub(&self, a: &f64, b: &f64) -> f64 {
        a - b
    }

    fn scale(&self, t: &f64, s: f64) -> f64 {
        t * s
    }

    fn ratio(&self, a: &f64, b: &f64) -> f64 {
        a / b
    }

    fn per_time(&self, ops: &O, d: &O::Diff, dt: &f64) -> O::Diff {
        ops.div(d, *dt)
    }
}

/// Time as [`std::time::Duration`]; velocities are differences per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationTime;

impl<O: GeometricOperations> TimeOperations<O> for DurationTime {
    type Time = Duration;
    type Velocity = O::Diff;

    fn zero(&self) -> Duration {
        Duration::ZERO
    }

    fn unit(&self) -> Duration {
        Duration::from_secs(1)
    }

    fn add(&self, a: &Duration, b: &Duration) -> Duration {
        a.saturating_add(*b)
    }

    /// Saturates at zero.
    fn sub(&self, a: &Duration, b: &Duration) -> Duration {
        a.saturating_sub(*b)
    }

    fn scale(&self, t: &Duration, s: f64) -> Duration {
        t.mul_f64(s.max(0.0))
    }

    fn ratio(&self, a: &Duration, b: &Duration) -> f64 {
        a.as_secs_f64() / b.as_secs_f64()
    }

    fn per_time(&self, ops: &O, d: &O::Diff, dt: &Duration) -> O::Diff {
        ops.div(d, dt.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Euclidean2, ScalarOps, Vector2};
    use approx::assert_relative_eq;

    #[test]
    fn scalar_time_velocity_divides() {
        let v = <ScalarTime as TimeOperations<Euclidean2>>::per_time(
            &ScalarTime,
            &Euclidean2::default(),
            &Vector2::new(4.0, 2.0),
            &2.0,
        );
        assert_relative_eq!(v, Vector2::new(2.0, 1.0));
    }

    #[test]
    fn duration_ratio_and_scale() {
        let t = DurationTime;
        let half = TimeOperations::<ScalarOps>::scale(&t, &Duration::from_secs(3), 0.5);
        assert_eq!(half, Duration::from_millis(1500));
        let r = TimeOperations::<ScalarOps>::ratio(&t, &half, &Duration::from_secs(3));
        assert_relative_eq!(r, 0.5);
    }

    #[test]
    fn duration_sub_saturates() {
        let t = DurationTime;
        let d = TimeOperations::<ScalarOps>::sub(&t, &Duration::from_secs(1), &Duration::from_secs(2));
        assert_eq!(d, Duration::ZERO);
    }
}
