use std::sync::OnceLock;

use tracing::trace;

use crate::math::{GeometricOperations, TOLERANCE};

/// Default number of sub-intervals of a polynomial's arc-length table.
pub const DEFAULT_ARC_LENGTH_SAMPLES: usize = 64;

/// A quadratic or cubic curve over a geometric algebra.
///
/// `P(t) = a + b·t + c·t² + d·t³` for `t ∈ [0, 1]`, where `a` is a position
/// and `b`, `c`, `d` are differences. A quadratic has `d = 0`.
///
/// The arc length is approximated numerically from the derivative magnitude
/// and cached on first use; the polynomial is otherwise immutable.
#[derive(Debug, Clone)]
pub struct Polynomial<O: GeometricOperations> {
    ops: O,
    a: O::Pos,
    coefficients: [O::Diff; 3],
    degree: usize,
    arc_length_samples: usize,
    arc_table: OnceLock<Vec<f64>>,
}

impl<O: GeometricOperations> Polynomial<O> {
    /// Creates a cubic polynomial `a + b·t + c·t² + d·t³`.
    #[must_use]
    pub fn cubic(a: O::Pos, b: O::Diff, c: O::Diff, d: O::Diff, ops: O) -> Self {
        Self {
            ops,
            a,
            coefficients: [b, c, d],
            degree: 3,
            arc_length_samples: DEFAULT_ARC_LENGTH_SAMPLES,
            arc_table: OnceLock::new(),
        }
    }

    /// Creates a quadratic polynomial `a + b·t + c·t²`.
    #[must_use]
    pub fn quadratic(a: O::Pos, b: O::Diff, c: O::Diff, ops: O) -> Self {
        let d = ops.zero();
        Self {
            ops,
            a,
            coefficients: [b, c, d],
            degree: 2,
            arc_length_samples: DEFAULT_ARC_LENGTH_SAMPLES,
            arc_table: OnceLock::new(),
        }
    }

    /// Sets the number of sub-intervals used for arc-length integration.
    ///
    /// Values below 1 are raised to 1.
    #[must_use]
    pub fn with_arc_length_samples(mut self, samples: usize) -> Self {
        self.arc_length_samples = samples.max(1);
        self.arc_table = OnceLock::new();
        self
    }

    /// Returns the polynomial degree (2 or 3).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the constant term, which is the position at `t = 0`.
    #[must_use]
    pub fn start(&self) -> &O::Pos {
        &self.a
    }

    /// Returns the geometric algebra this polynomial evaluates with.
    #[must_use]
    pub fn ops(&self) -> &O {
        &self.ops
    }

    /// Evaluates the position at `t`.
    #[must_use]
    pub fn evaluate(&self, t: f64) -> O::Pos {
        let [b, c, d] = &self.coefficients;
        let ops = &self.ops;
        let offset = ops.add_diffs(
            &ops.mul(b, t),
            &ops.add_diffs(&ops.mul(c, t * t), &ops.mul(d, t * t * t)),
        );
        ops.add(&self.a, &offset)
    }

    /// Evaluates the first derivative with respect to `t`.
    #[must_use]
    pub fn evaluate_derivative(&self, t: f64) -> O::Diff {
        let [b, c, d] = &self.coefficients;
        let ops = &self.ops;
        ops.add_diffs(
            b,
            &ops.add_diffs(&ops.mul(c, 2.0 * t), &ops.mul(d, 3.0 * t * t)),
        )
    }

    /// Evaluates the second derivative with respect to `t`.
    #[must_use]
    pub fn evaluate_second_derivative(&self, t: f64) -> O::Diff {
        let [_, c, d] = &self.coefficients;
        let ops = &self.ops;
        ops.add_diffs(&ops.mul(c, 2.0), &ops.mul(d, 6.0 * t))
    }

    /// Evaluates the `n`-th derivative with respect to `t`.
    ///
    /// Returns `None` for `n == 0`; the position is a point, not a
    /// difference. Orders above the degree yield the zero difference.
    #[must_use]
    pub fn evaluate_nth_derivative(&self, t: f64, n: usize) -> Option<O::Diff> {
        if n == 0 {
            return None;
        }
        let ops = &self.ops;
        let mut sum = ops.zero();
        for k in n..=self.degree {
            // k! / (k - n)!
            let falling: usize = ((k - n + 1)..=k).product();
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let factor = falling as f64 * t.powi((k - n) as i32);
            sum = ops.add_diffs(&sum, &ops.mul(&self.coefficients[k - 1], factor));
        }
        Some(sum)
    }

    /// Returns the arc length over `t ∈ [0, 1]`.
    #[must_use]
    pub fn arc_length(&self) -> f64 {
        self.arc_length_table().last().copied().unwrap_or(0.0)
    }

    /// Returns cumulative arc lengths at `t = k / samples` for `k = 0..=samples`.
    ///
    /// Each sub-interval is integrated with Simpson's rule over the
    /// derivative magnitude. The table is computed once.
    #[must_use]
    pub fn arc_length_table(&self) -> &[f64] {
        self.arc_table.get_or_init(|| {
            let n = self.arc_length_samples;
            trace!(samples = n, "computing polynomial arc-length table");
            #[allow(clippy::cast_precision_loss)]
            let h = 1.0 / n as f64;
            let speed = |t: f64| self.ops.magnitude(&self.evaluate_derivative(t));

            let mut table = Vec::with_capacity(n + 1);
            table.push(0.0);
            let mut total = 0.0;
            let mut f0 = speed(0.0);
            for k in 0..n {
                #[allow(clippy::cast_precision_loss)]
                let t0 = k as f64 * h;
                let f_mid = speed(t0 + 0.5 * h);
                let f1 = speed(t0 + h);
                total += h / 6.0 * (f0 + 4.0 * f_mid + f1);
                table.push(total);
                f0 = f1;
            }
            table
        })
    }

    /// Converts progress `t ∈ [0, 1]` into arc length from `t = 0`.
    #[must_use]
    pub fn length_at_progress(&self, t: f64) -> f64 {
        let table = self.arc_length_table();
        let n = table.len() - 1;
        let t = t.clamp(0.0, 1.0);
        #[allow(clippy::cast_precision_loss)]
        let scaled = t * n as f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let idx = (scaled.floor() as usize).min(n - 1);
        #[allow(clippy::cast_precision_loss)]
        let local = scaled - idx as f64;
        table[idx] + local * (table[idx + 1] - table[idx])
    }

    /// Converts an arc length from `t = 0` back into progress `t ∈ [0, 1]`.
    ///
    /// Lengths outside `[0, arc_length()]` are clamped. Inverse of
    /// [`length_at_progress`](Self::length_at_progress).
    #[must_use]
    pub fn progress_at_length(&self, length: f64) -> f64 {
        let table = self.arc_length_table();
        let n = table.len() - 1;
        let total = table[n];
        if total <= TOLERANCE {
            return 0.0;
        }
        let target = length.clamp(0.0, total);
        // First entry strictly past the target; the bracket is [idx - 1, idx].
        let idx = table.partition_point(|&l| l <= target).clamp(1, n);
        let (l0, l1) = (table[idx - 1], table[idx]);
        let local = if l1 - l0 > 0.0 {
            (target - l0) / (l1 - l0)
        } else {
            0.0
        };
        #[allow(clippy::cast_precision_loss)]
        let progress = ((idx - 1) as f64 + local) / n as f64;
        progress
    }
}
