use nalgebra::{DMatrix, DVector};

use crate::error::{EstimatorError, Result};

/// Relative threshold below which extracted numerator coefficients are
/// treated as structural zeros.
const CLEANUP_EPSILON: f64 = 1e-12;

/// Expands `(s - pole)^degree` into monic polynomial coefficients,
/// highest degree first.
///
/// The polynomial is built by repeated multiplication with the exact
/// first-degree factor `[1, -pole]` rather than by placing `degree` copies
/// of the root numerically. For a repeated root the iterated product is
/// exact up to rounding in each convolution step, which keeps high repeat
/// counts well-conditioned.
///
/// # Panics
///
/// Panics if `degree` is 0; a zeroth-degree characteristic polynomial has
/// no pole to place.
///
/// # Example
///
/// ```rust
/// use derivative_bank::repeated_pole_polynomial;
///
/// // (s + 2)^2 = s^2 + 4s + 4
/// let coeffs = repeated_pole_polynomial(2, -2.0);
/// assert_eq!(coeffs, vec![1.0, 4.0, 4.0]);
/// ```
pub fn repeated_pole_polynomial(degree: usize, pole: f64) -> Vec<f64> {
    assert!(degree >= 1, "polynomial degree must be at least 1");

    let factor = [1.0, -pole];
    let mut coeffs = factor.to_vec();
    for _ in 1..degree {
        coeffs = polynomial_product(&coeffs, &factor);
    }
    coeffs
}

/// Multiplies two coefficient vectors (descending powers) by convolution.
fn polynomial_product(lhs: &[f64], rhs: &[f64]) -> Vec<f64> {
    let mut product = vec![0.0; lhs.len() + rhs.len() - 1];
    for (i, &l) in lhs.iter().enumerate() {
        for (j, &r) in rhs.iter().enumerate() {
            product[i + j] += l * r;
        }
    }
    product
}

/// Continuous-time state-space model in companion/observable form.
///
/// State index i holds the i-th derivative of the smoothed signal: rows
/// 0..n-1 of `A` form a pure integrator chain (`dx_i/dt = x_{i+1}`), and
/// the last row carries the characteristic polynomial. `D` is zero and is
/// not stored.
#[derive(Debug, Clone)]
pub struct ContinuousStateSpace {
    /// System matrix, n x n
    pub a: DMatrix<f64>,
    /// Input vector, n x 1
    pub b: DVector<f64>,
}

impl ContinuousStateSpace {
    /// Builds the companion realization of a monic characteristic
    /// polynomial given in descending powers (`coeffs[0]` must be 1).
    ///
    /// Row n-1, column j holds the negated coefficient of `s^j`, i.e. the
    /// non-leading coefficients in reversed order. `B` is zero except for
    /// its last entry, which equals the constant term of the polynomial so
    /// that state 0 has unity static gain from the input.
    pub fn from_characteristic(coeffs: &[f64]) -> Self {
        debug_assert!(coeffs.len() >= 2, "need at least a first-degree polynomial");
        debug_assert_eq!(coeffs[0], 1.0, "characteristic polynomial must be monic");

        let n = coeffs.len() - 1;
        let mut a = DMatrix::zeros(n, n);
        for i in 0..n - 1 {
            a[(i, i + 1)] = 1.0;
        }
        // coeffs[n - j] is the coefficient of s^j; the companion row wants
        // them negated, lowest power in column 0.
        for j in 0..n {
            a[(n - 1, j)] = -coeffs[n - j];
        }

        let mut b = DVector::zeros(n);
        b[n - 1] = coeffs[n];

        Self { a, b }
    }

    /// Number of states.
    pub fn order(&self) -> usize {
        self.a.nrows()
    }

    /// Discretizes the model at a fixed sample interval under a zero-order
    /// hold.
    ///
    /// Uses the augmented-matrix exponential
    /// `exp([[A*Ts, B*Ts], [0, 0]])`, whose top-left block is `Ad` and
    /// whose top-right column is `Bd`. This preserves stability and
    /// steady-state gain exactly for any stable `A`.
    pub fn discretize(&self, sample_interval: f64) -> DiscreteStateSpace {
        let n = self.order();
        let mut augmented = DMatrix::zeros(n + 1, n + 1);
        for i in 0..n {
            for j in 0..n {
                augmented[(i, j)] = self.a[(i, j)] * sample_interval;
            }
            augmented[(i, n)] = self.b[i] * sample_interval;
        }

        let phi = augmented.exp();

        let ad = DMatrix::from_fn(n, n, |i, j| phi[(i, j)]);
        let bd = DVector::from_fn(n, |i, _| phi[(i, n)]);
        DiscreteStateSpace { ad, bd }
    }
}

/// Discrete-time state-space model produced by [`ContinuousStateSpace::discretize`].
#[derive(Debug, Clone)]
pub struct DiscreteStateSpace {
    /// Discrete system matrix
    pub ad: DMatrix<f64>,
    /// Discrete input vector
    pub bd: DVector<f64>,
}

impl DiscreteStateSpace {
    /// Number of states.
    pub fn order(&self) -> usize {
        self.ad.nrows()
    }

    /// Extracts the scalar transfer function from the input to state
    /// `output_index`, as (numerator, denominator) coefficient vectors in
    /// descending powers of z.
    ///
    /// Both vectors have length n+1 so their difference-equation alignment
    /// is preserved: the z^n slot of the numerator is structurally zero
    /// because there is no direct feedthrough. The shared denominator is
    /// the characteristic polynomial of `Ad`; the numerator is
    /// `C_i * adj(zI - Ad) * Bd` expanded via Leverrier's recurrence.
    ///
    /// # Panics
    ///
    /// Panics if `output_index` is not a valid state index. Output
    /// selection is fixed when the model is built, so an out-of-range
    /// index is a programming error rather than a runtime condition.
    pub fn transfer_function(&self, output_index: usize) -> Result<(Vec<f64>, Vec<f64>)> {
        let n = self.order();
        assert!(output_index < n, "output index out of range");

        let (denominator, adjugate) = leverrier(&self.ad);

        let mut numerator = vec![0.0; n + 1];
        for (k, m) in adjugate.iter().enumerate() {
            // adjugate[k] multiplies z^(n-1-k); in the descending length
            // n+1 vector that is slot k+1.
            let mut gain = 0.0;
            for col in 0..n {
                gain += m[(output_index, col)] * self.bd[col];
            }
            numerator[k + 1] = gain;
        }

        cleanup_coefficients(&mut numerator)?;

        if denominator.iter().any(|c| !c.is_finite()) {
            return Err(EstimatorError::NumericalDegeneracy(
                "non-finite denominator coefficient after discretization".to_string(),
            ));
        }

        Ok((numerator, denominator))
    }
}

/// Characteristic polynomial of a square matrix, descending powers, monic.
///
/// Exposed within the crate so the companion-matrix assembly can be
/// verified against the polynomial it was built from.
pub(crate) fn characteristic_polynomial(matrix: &DMatrix<f64>) -> Vec<f64> {
    leverrier(matrix).0
}

/// Leverrier's recurrence: returns the characteristic polynomial of
/// `matrix` (monic, descending) together with the adjugate expansion
/// matrices `M_0..M_{n-1}` of `adj(zI - matrix)`, where `M_k` is the
/// coefficient of `z^(n-1-k)`.
///
/// The recurrence is `M_0 = I`, `c_k = -tr(A*M_{k-1}) / k`,
/// `M_k = A*M_{k-1} + c_k*I`. It is inherently sequential, but the
/// matrices here are tiny (filter order + 1).
fn leverrier(matrix: &DMatrix<f64>) -> (Vec<f64>, Vec<DMatrix<f64>>) {
    let n = matrix.nrows();
    let mut coeffs = vec![0.0; n + 1];
    coeffs[0] = 1.0;

    let mut adjugate = Vec::with_capacity(n);
    let mut m = DMatrix::identity(n, n);

    for k in 1..=n {
        adjugate.push(m.clone());
        let am = matrix * &m;
        coeffs[k] = -am.trace() / k as f64;
        m = am + DMatrix::identity(n, n) * coeffs[k];
    }

    (coeffs, adjugate)
}

/// Clamps near-zero coefficients to exact zeros without changing the
/// vector length, and rejects vectors that vanish entirely.
///
/// Entries are clamped rather than dropped: removing a leading entry would
/// silently shift the difference equation by one sample.
fn cleanup_coefficients(coeffs: &mut [f64]) -> Result<()> {
    if coeffs.iter().any(|c| !c.is_finite()) {
        return Err(EstimatorError::NumericalDegeneracy(
            "non-finite numerator coefficient after extraction".to_string(),
        ));
    }

    let scale = coeffs.iter().fold(0.0_f64, |acc, &c| acc.max(c.abs()));
    if scale == 0.0 {
        return Err(EstimatorError::NumericalDegeneracy(
            "numerator vanished during extraction".to_string(),
        ));
    }

    for c in coeffs.iter_mut() {
        if c.abs() < scale * CLEANUP_EPSILON {
            *c = 0.0;
        }
    }
    Ok(())
}
