use crate::error::{EstimatorError, Result};

/// A single-channel recursive (IIR) filter advancing one sample per call.
///
/// Coefficients follow the usual difference-equation convention: `b[i]`
/// weighs the input `i` samples ago and `a[j]` weighs the output `j`
/// samples ago, with `a[0]` normalized to 1:
///
/// ```text
/// y[k] = b[0]*x[k] + b[1]*x[k-1] + ... - a[1]*y[k-1] - a[2]*y[k-2] - ...
/// ```
///
/// The delay line is sized to the denominator order, `len(a) - 1`, and
/// starts as all zeros, which is the unique initial condition consistent
/// with an all-zero input history: a quiescent signal produces no start-up
/// transient.
///
/// `update` must be called once per sample in increasing time order.
/// Feeding the same sample twice or skipping samples corrupts the filter's
/// notion of elapsed time; this is a caller contract, not a detected error.
#[derive(Debug, Clone, PartialEq)]
pub struct RecursiveFilter {
    b: Vec<f64>,
    a: Vec<f64>,
    state: Vec<f64>,
}

impl RecursiveFilter {
    /// Creates a filter from numerator and denominator coefficient vectors.
    ///
    /// Both vectors are normalized by `a[0]`, which must be nonzero. An
    /// improper ratio (numerator longer than the denominator) is rejected;
    /// a shorter numerator is tail-padded with zeros. Malformed inputs fail
    /// here, never later in `update`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use derivative_bank::RecursiveFilter;
    ///
    /// // One-pole smoother: y[k] = 0.2*x[k] + 0.8*y[k-1]
    /// let mut filter = RecursiveFilter::new(&[0.2], &[1.0, -0.8]).unwrap();
    /// assert_eq!(filter.update(1.0), 0.2);
    /// ```
    pub fn new(numerator: &[f64], denominator: &[f64]) -> Result<Self> {
        if numerator.is_empty() || denominator.is_empty() {
            return Err(EstimatorError::EmptyCoefficients);
        }
        if numerator.len() > denominator.len() {
            return Err(EstimatorError::CoefficientMismatch(
                numerator.len(),
                denominator.len(),
            ));
        }

        let a0 = denominator[0];
        if a0 == 0.0 || !a0.is_finite() {
            return Err(EstimatorError::NumericalDegeneracy(format!(
                "leading denominator coefficient {} cannot be normalized",
                a0
            )));
        }

        let order = denominator.len() - 1;
        let mut b = vec![0.0; order + 1];
        for (dst, &src) in b.iter_mut().zip(numerator.iter()) {
            *dst = src / a0;
        }
        let mut a = vec![0.0; order + 1];
        for (dst, &src) in a.iter_mut().zip(denominator.iter()) {
            *dst = src / a0;
        }

        Ok(Self {
            b,
            a,
            state: vec![0.0; order],
        })
    }

    /// Filter order (delay-line length).
    pub fn order(&self) -> usize {
        self.state.len()
    }

    /// Normalized numerator coefficients.
    pub fn numerator(&self) -> &[f64] {
        &self.b
    }

    /// Normalized denominator coefficients.
    pub fn denominator(&self) -> &[f64] {
        &self.a
    }

    /// Advances the filter by one sample and returns the new output.
    ///
    /// Direct form II transposed: numerically robust and a single pass
    /// over the delay line.
    pub fn update(&mut self, sample: f64) -> f64 {
        let order = self.state.len();
        if order == 0 {
            return self.b[0] * sample;
        }

        let output = self.b[0] * sample + self.state[0];
        for i in 0..order {
            let carried = if i + 1 < order { self.state[i + 1] } else { 0.0 };
            self.state[i] = carried + self.b[i + 1] * sample - self.a[i + 1] * output;
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_pure_gain() {
        let mut filter = RecursiveFilter::new(&[2.0], &[1.0]).unwrap();
        assert_eq!(filter.order(), 0);
        assert_abs_diff_eq!(filter.update(3.0), 6.0, epsilon = 1e-15);
        assert_abs_diff_eq!(filter.update(-1.5), -3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_moving_average_fir() {
        let mut filter = RecursiveFilter::new(&[0.5, 0.5], &[1.0]).unwrap();
        assert_abs_diff_eq!(filter.update(1.0), 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(filter.update(3.0), 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(filter.update(3.0), 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_one_pole_recursion() {
        // y[k] = 0.2*x[k] + 0.8*y[k-1]
        let mut filter = RecursiveFilter::new(&[0.2], &[1.0, -0.8]).unwrap();
        let mut expected = 0.0;
        for _ in 0..200 {
            expected = 0.2 * 1.0 + 0.8 * expected;
            let got = filter.update(1.0);
            assert_abs_diff_eq!(got, expected, epsilon = 1e-12);
        }
        // Unity DC gain: converges to the constant input
        assert_abs_diff_eq!(expected, 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_denominator_normalization() {
        // [2, -1.6] / 2 must behave exactly like [1, -0.8]
        let mut scaled = RecursiveFilter::new(&[0.4], &[2.0, -1.6]).unwrap();
        let mut reference = RecursiveFilter::new(&[0.2], &[1.0, -0.8]).unwrap();
        for k in 0..50 {
            let x = (k as f64 * 0.3).sin();
            assert_abs_diff_eq!(scaled.update(x), reference.update(x), epsilon = 1e-13);
        }
    }

    #[test]
    fn test_delayed_numerator_alignment() {
        // A leading zero in b delays the input path by one sample; it must
        // not be collapsed away.
        let mut delayed = RecursiveFilter::new(&[0.0, 1.0], &[1.0, 0.0]).unwrap();
        assert_eq!(delayed.update(5.0), 0.0);
        assert_eq!(delayed.update(0.0), 5.0);
        assert_eq!(delayed.update(0.0), 0.0);
    }

    #[test]
    fn test_zero_history_zero_output() {
        let mut filter = RecursiveFilter::new(&[0.0, 0.3, 0.1], &[1.0, -1.2, 0.4]).unwrap();
        assert_eq!(filter.update(0.0), 0.0);
        assert_eq!(filter.update(0.0), 0.0);
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            RecursiveFilter::new(&[], &[1.0]),
            Err(EstimatorError::EmptyCoefficients)
        );
        assert_eq!(
            RecursiveFilter::new(&[1.0], &[]),
            Err(EstimatorError::EmptyCoefficients)
        );
        assert!(matches!(
            RecursiveFilter::new(&[1.0], &[0.0, 1.0]),
            Err(EstimatorError::NumericalDegeneracy(_))
        ));
    }

    #[test]
    fn test_improper_numerator_rejected() {
        assert_eq!(
            RecursiveFilter::new(&[1.0, 2.0, 3.0], &[1.0, -0.5]),
            Err(EstimatorError::CoefficientMismatch(3, 2))
        );
    }

    #[test]
    fn test_short_numerator_is_trailing_padded() {
        // b shorter than a: taps on older inputs are zero.
        let filter = RecursiveFilter::new(&[0.5], &[1.0, -0.3, 0.1]).unwrap();
        assert_eq!(filter.numerator(), &[0.5, 0.0, 0.0]);
        assert_eq!(filter.order(), 2);
    }
}
