use crate::design::{repeated_pole_polynomial, ContinuousStateSpace};
use crate::error::{EstimatorError, Result};
use crate::filter::RecursiveFilter;

/// Configuration for a [`DerivativeEstimator`].
///
/// All three parameters are fixed for the lifetime of the estimator;
/// changing any of them requires constructing a new bank.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    /// Highest derivative order to estimate; the bank outputs `order + 1`
    /// values per sample. Order 0 yields a smoothing-only bank.
    pub order: usize,
    /// Repeated pole location. Must be strictly negative; larger magnitude
    /// tracks faster but passes more noise, smaller magnitude smooths
    /// harder but lags more.
    pub pole: f64,
    /// Seconds between consecutive `update` calls. Must match the actual
    /// calling cadence.
    pub sample_interval: f64,
}

impl EstimatorConfig {
    /// Creates a validated configuration.
    pub fn new(order: usize, pole: f64, sample_interval: f64) -> Result<Self> {
        let config = Self {
            order,
            pole,
            sample_interval,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the pole and sample-interval constraints.
    ///
    /// `!(pole < 0.0)` deliberately rejects NaN along with non-negative
    /// values.
    pub fn validate(&self) -> Result<()> {
        if !(self.pole < 0.0) || self.pole.is_infinite() {
            return Err(EstimatorError::InvalidPole(self.pole));
        }
        if !(self.sample_interval > 0.0) || self.sample_interval.is_infinite() {
            return Err(EstimatorError::InvalidSampleInterval(self.sample_interval));
        }
        Ok(())
    }
}

/// A bank of recursive filters estimating a signal and its derivatives.
///
/// The bank smooths one noisy scalar channel and simultaneously estimates
/// its derivatives up to the configured order, one sample at a time. The
/// characteristic polynomial `(s - pole)^(order + 1)` is realized as a
/// companion state-space whose states are the successive derivatives of
/// the smoothed signal; each state is observed through its own discrete
/// transfer function and driven by its own recursive filter.
///
/// All derivation work (polynomial, state-space, discretization, transfer
/// functions) runs once at construction; `update` performs only the filter
/// arithmetic.
///
/// # Example
///
/// ```rust
/// use derivative_bank::DerivativeEstimator;
///
/// let mut estimator = DerivativeEstimator::new(2, -50.0, 0.005)?;
/// let outputs = estimator.update(1.0);
/// assert_eq!(outputs.len(), 3); // smoothed value, first and second derivative
/// # Ok::<(), derivative_bank::EstimatorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DerivativeEstimator {
    config: EstimatorConfig,
    characteristic: Vec<f64>,
    filters: Vec<RecursiveFilter>,
}

impl DerivativeEstimator {
    /// Creates an estimator for derivatives up to `order` with the given
    /// repeated pole and sample interval.
    ///
    /// Fails with a configuration error for a non-negative pole or a
    /// non-positive sample interval, and with a numerical-degeneracy error
    /// if the order/pole combination cannot be discretized into realizable
    /// filter coefficients. No partially constructed bank is ever returned.
    pub fn new(order: usize, pole: f64, sample_interval: f64) -> Result<Self> {
        Self::with_config(EstimatorConfig::new(order, pole, sample_interval)?)
    }

    /// Creates an estimator from an existing configuration.
    pub fn with_config(config: EstimatorConfig) -> Result<Self> {
        config.validate()?;

        let characteristic = repeated_pole_polynomial(config.order + 1, config.pole);
        let filters = build_filter_bank(&characteristic, config.sample_interval)?;

        Ok(Self {
            config,
            characteristic,
            filters,
        })
    }

    /// The estimator configuration.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Highest derivative order estimated.
    pub fn order(&self) -> usize {
        self.config.order
    }

    /// Number of values produced per update (`order + 1`).
    pub fn outputs(&self) -> usize {
        self.filters.len()
    }

    /// The continuous-time characteristic polynomial
    /// `(s - pole)^(order + 1)`, descending powers.
    pub fn characteristic(&self) -> &[f64] {
        &self.characteristic
    }

    /// Feeds one new sample to every filter and returns the estimates.
    ///
    /// Index 0 of the result is the smoothed signal; index k is the
    /// estimated k-th derivative. Samples must arrive in increasing time
    /// order at the configured interval.
    pub fn update(&mut self, sample: f64) -> Vec<f64> {
        self.filters
            .iter_mut()
            .map(|filter| filter.update(sample))
            .collect()
    }
}

/// Derives the discrete filter bank for a characteristic polynomial.
///
/// Pure and deterministic: polynomial in, `deg(polynomial)` filters out.
/// Kept separate from the stateful update path so it can be tested against
/// known analytic transfer functions on its own.
fn build_filter_bank(characteristic: &[f64], sample_interval: f64) -> Result<Vec<RecursiveFilter>> {
    let system = ContinuousStateSpace::from_characteristic(characteristic);
    let discrete = system.discretize(sample_interval);

    let outputs = system.order();
    let mut filters = Vec::with_capacity(outputs);
    for index in 0..outputs {
        let (numerator, denominator) = discrete.transfer_function(index)?;
        filters.push(RecursiveFilter::new(&numerator, &denominator)?);
    }
    Ok(filters)
}
