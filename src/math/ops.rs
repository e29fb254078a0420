use std::fmt::Debug;

use nalgebra::{Point, SVector};

/// The position/difference algebra a spline is evaluated over.
///
/// Positions (`Pos`) are affine points, differences (`Diff`) are the vectors
/// between them. Implementations carry no state that changes over time; a
/// single value is handed to a spline at construction and reused for every
/// computation.
pub trait GeometricOperations: Clone {
    /// Affine position type.
    type Pos: Clone + Debug;
    /// Vector type obtained by subtracting two positions.
    type Diff: Clone + Debug;

    /// `p + d`
    fn add(&self, p: &Self::Pos, d: &Self::Diff) -> Self::Pos;

    /// `a - b`
    fn sub(&self, a: &Self::Pos, b: &Self::Pos) -> Self::Diff;

    /// `p - d`
    fn sub_diff(&self, p: &Self::Pos, d: &Self::Diff) -> Self::Pos;

    /// `a + b` for two differences.
    fn add_diffs(&self, a: &Self::Diff, b: &Self::Diff) -> Self::Diff;

    /// `a - b` for two differences.
    fn sub_diffs(&self, a: &Self::Diff, b: &Self::Diff) -> Self::Diff {
        self.add_diffs(a, &self.mul(b, -1.0))
    }

    /// `d * s`
    fn mul(&self, d: &Self::Diff, s: f64) -> Self::Diff;

    /// `d / s`
    fn div(&self, d: &Self::Diff, s: f64) -> Self::Diff {
        self.mul(d, 1.0 / s)
    }

    /// Euclidean distance between two positions.
    fn distance(&self, a: &Self::Pos, b: &Self::Pos) -> f64;

    /// Length of a difference.
    fn magnitude(&self, d: &Self::Diff) -> f64;

    /// Linear interpolation; `t` outside `[0, 1]` extrapolates.
    fn lerp(&self, a: &Self::Pos, b: &Self::Pos, t: f64) -> Self::Pos {
        self.add(a, &self.mul(&self.sub(b, a), t))
    }

    /// The zero difference.
    fn zero(&self) -> Self::Diff;
}

/// Euclidean algebra over `nalgebra` points of dimension `D`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EuclideanOps<const D: usize>;

/// Algebra over [`Point2`](crate::math::Point2).
pub type Euclidean2 = EuclideanOps<2>;

/// Algebra over [`Point3`](crate::math::Point3).
pub type Euclidean3 = EuclideanOps<3>;

impl<const D: usize> GeometricOperations for EuclideanOps<D> {
    type Pos = Point<f64, D>;
    type Diff = SVector<f64, D>;

    fn add(&self, p: &Self::Pos, d: &Self::Diff) -> Self::Pos {
        p + d
    }

    fn sub(&self, a: &Self::Pos, b: &Self::Pos) -> Self::Diff {
        a - b
    }

    fn sub_diff(&self, p: &Self::Pos, d: &Self::Diff) -> Self::Pos {
        p - d
    }

    fn add_diffs(&self, a: &Self::Diff, b: &Self::Diff) -> Self::Diff {
        a + b
    }

    fn sub_diffs(&self, a: &Self::Diff, b: &Self::Diff) -> Self::Diff {
        a - b
    }

    fn mul(&self, d: &Self::Diff, s: f64) -> Self::Diff {
        d * s
    }

    fn div(&self, d: &Self::Diff, s: f64) -> Self::Diff {
        d / s
    }

    fn distance(&self, a: &Self::Pos, b: &Self::Pos) -> f64 {
        nalgebra::distance(a, b)
    }

    fn magnitude(&self, d: &Self::Diff) -> f64 {
        d.norm()
    }

    fn lerp(&self, a: &Self::Pos, b: &Self::Pos, t: f64) -> Self::Pos {
        Point::from(a.coords.lerp(&b.coords, t))
    }

    fn zero(&self) -> Self::Diff {
        SVector::zeros()
    }
}

/// One-dimensional algebra over plain `f64` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScalarOps;

impl GeometricOperations for ScalarOps {
    type Pos = f64;
    type Diff = f64;

    fn add(&self, p: &f64, d: &f64) -> f64 {
        p + d
    }

    fn sub(&self, a: &f64, b: &f64) -> f64 {
        a - b
    }

    fn sub_diff(&self, p: &f64, d: &f64) -> f64 {
        p - d
    }

    fn add_diffs(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }

    fn mul(&self, d: &f64, s: f64) -> f64 {
        d * s
    }

    fn distance(&self, a: &f64, b: &f64) -> f64 {
        (a - b).abs()
    }

    fn magnitude(&self, d: &f64) -> f64 {
        d.abs()
    }

    fn zero(&self) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Point2, Point3, Vector3};
    use approx::assert_relative_eq;

    #[test]
    fn euclidean_distance_3_4_5() {
        let ops = Euclidean2::default();
        let d = ops.distance(&Point2::new(0.0, 0.0), &Point2::new(3.0, 4.0));
        assert_relative_eq!(d, 5.0);
    }

    #[test]
    fn lerp_beyond_one_reflects() {
        let ops = Euclidean3::default();
        let p0 = Point3::new(1.0, 2.0, 3.0);
        let p1 = Point3::new(2.0, 2.0, 5.0);
        // 2 * p0 - p1
        let r = ops.lerp(&p1, &p0, 2.0);
        assert_relative_eq!(r, Point3::new(0.0, 2.0, 1.0));
    }

    #[test]
    fn sub_diff_undoes_add() {
        let ops = Euclidean3::default();
        let p = Point3::new(1.0, -1.0, 0.5);
        let d = Vector3::new(0.25, 4.0, -2.0);
        assert_relative_eq!(ops.sub_diff(&ops.add(&p, &d), &d), p);
    }

    #[test]
    fn scalar_default_div_and_lerp() {
        let ops = ScalarOps;
        assert_relative_eq!(ops.div(&3.0, 2.0), 1.5);
        assert_relative_eq!(ops.lerp(&2.0, &4.0, 0.25), 2.5);
        assert_relative_eq!(ops.magnitude(&-7.0), 7.0);
    }
}
