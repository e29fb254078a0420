use crate::math::GeometricOperations;

use super::Polynomial;

/// A single Bézier segment, converted to power basis on construction.
///
/// `P(t) = Σ Bᵢ(t)·Pᵢ` with Bernstein weights, expressed as a [`Polynomial`]
/// so that evaluation, derivatives and arc length share the same machinery
/// as Catmull-Rom segments.
#[derive(Debug, Clone)]
pub struct BezierSegment<O: GeometricOperations> {
    polynomial: Polynomial<O>,
}

impl<O: GeometricOperations> BezierSegment<O> {
    /// Creates a cubic segment from `p0` to `p3` with handles `p1`, `p2`.
    ///
    /// `a = P0`, `b = 3(P1 - P0)`, `c = 3(P0 - 2P1 + P2)`,
    /// `d = (P3 - P0) + 3(P1 - P2)`.
    #[must_use]
    pub fn cubic(p0: &O::Pos, p1: &O::Pos, p2: &O::Pos, p3: &O::Pos, ops: O) -> Self {
        let b = ops.mul(&ops.sub(p1, p0), 3.0);
        let c = ops.mul(&ops.add_diffs(&ops.sub(p0, p1), &ops.sub(p2, p1)), 3.0);
        let d = ops.add_diffs(&ops.sub(p3, p0), &ops.mul(&ops.sub(p1, p2), 3.0));
        Self {
            polynomial: Polynomial::cubic(p0.clone(), b, c, d, ops),
        }
    }

    /// Creates a quadratic segment from `p0` to `p2` with handle `p1`.
    #[must_use]
    pub fn quadratic(p0: &O::Pos, p1: &O::Pos, p2: &O::Pos, ops: O) -> Self {
        let b = ops.mul(&ops.sub(p1, p0), 2.0);
        let c = ops.add_diffs(&ops.sub(p0, p1), &ops.sub(p2, p1));
        Self {
            polynomial: Polynomial::quadratic(p0.clone(), b, c, ops),
        }
    }

    /// Returns the underlying polynomial.
    #[must_use]
    pub fn polynomial(&self) -> &Polynomial<O> {
        &self.polynomial
    }

    /// Consumes the segment, returning its polynomial.
    #[must_use]
    pub fn into_polynomial(self) -> Polynomial<O> {
        self.polynomial
    }
}
