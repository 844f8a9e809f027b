use crate::error::{EstimatorError, Result};
use crate::estimator::DerivativeEstimator;

/// A configuration value that is either shared by all channels or given
/// per channel.
///
/// Scalars broadcast to every channel; per-channel lists must match the
/// channel count exactly. Anything else is a configuration error at
/// construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelParam {
    /// One value applied to every channel
    Scalar(f64),
    /// One value per channel
    PerChannel(Vec<f64>),
}

impl ChannelParam {
    /// Normalizes to one value per channel.
    pub fn resolve(&self, channels: usize) -> Result<Vec<f64>> {
        match self {
            ChannelParam::Scalar(value) => Ok(vec![*value; channels]),
            ChannelParam::PerChannel(values) => {
                if values.len() != channels {
                    return Err(EstimatorError::ChannelCountMismatch(values.len(), channels));
                }
                Ok(values.clone())
            }
        }
    }
}

impl From<f64> for ChannelParam {
    fn from(value: f64) -> Self {
        ChannelParam::Scalar(value)
    }
}

impl From<Vec<f64>> for ChannelParam {
    fn from(values: Vec<f64>) -> Self {
        ChannelParam::PerChannel(values)
    }
}

impl From<&[f64]> for ChannelParam {
    fn from(values: &[f64]) -> Self {
        ChannelParam::PerChannel(values.to_vec())
    }
}

/// A vector of independent single-channel estimators.
///
/// Each channel owns its own [`DerivativeEstimator`] and therefore its own
/// filter state; channels never interact. The pole and sample interval may
/// be given as scalars (broadcast) or as per-channel lists.
///
/// # Example
///
/// ```rust
/// use derivative_bank::MultiChannelEstimator;
///
/// // Two channels, shared sample interval, per-channel poles
/// let mut estimator =
///     MultiChannelEstimator::new(2, 1, vec![-50.0, -120.0], 0.005)?;
/// let rows = estimator.update(&[1.0, -1.0]);
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].len(), 2);
/// # Ok::<(), derivative_bank::EstimatorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MultiChannelEstimator {
    banks: Vec<DerivativeEstimator>,
}

impl MultiChannelEstimator {
    /// Creates `channels` independent estimators sharing `order`.
    ///
    /// `pole` and `sample_interval` accept either a scalar or a
    /// per-channel list; see [`ChannelParam`].
    pub fn new(
        channels: usize,
        order: usize,
        pole: impl Into<ChannelParam>,
        sample_interval: impl Into<ChannelParam>,
    ) -> Result<Self> {
        if channels == 0 {
            return Err(EstimatorError::NoChannels);
        }

        let poles = pole.into().resolve(channels)?;
        let intervals = sample_interval.into().resolve(channels)?;

        let mut banks = Vec::with_capacity(channels);
        for (p, ts) in poles.iter().zip(intervals.iter()) {
            banks.push(DerivativeEstimator::new(order, *p, *ts)?);
        }
        Ok(Self { banks })
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.banks.len()
    }

    /// The per-channel estimators.
    pub fn banks(&self) -> &[DerivativeEstimator] {
        &self.banks
    }

    /// Feeds one sample per channel and returns one output row per channel.
    ///
    /// Row i holds the smoothed value and derivatives of channel i, exactly
    /// as [`DerivativeEstimator::update`] would return them.
    ///
    /// # Panics
    ///
    /// Panics if `samples.len()` differs from the channel count; per-sample
    /// dispatch has no error path once construction succeeded.
    pub fn update(&mut self, samples: &[f64]) -> Vec<Vec<f64>> {
        assert_eq!(
            samples.len(),
            self.banks.len(),
            "expected one sample per channel"
        );
        self.banks
            .iter_mut()
            .zip(samples.iter())
            .map(|(bank, &sample)| bank.update(sample))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_scalar_broadcast() {
        let param = ChannelParam::from(-25.0);
        assert_eq!(param.resolve(3).unwrap(), vec![-25.0, -25.0, -25.0]);
    }

    #[test]
    fn test_per_channel_passthrough() {
        let param = ChannelParam::from(vec![-10.0, -20.0]);
        assert_eq!(param.resolve(2).unwrap(), vec![-10.0, -20.0]);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let param = ChannelParam::from(vec![-10.0, -20.0]);
        assert_eq!(
            param.resolve(3),
            Err(EstimatorError::ChannelCountMismatch(2, 3))
        );
    }

    #[test]
    fn test_zero_channels_rejected() {
        assert_eq!(
            MultiChannelEstimator::new(0, 1, -10.0, 0.01).err(),
            Some(EstimatorError::NoChannels)
        );
    }

    #[test]
    fn test_bad_channel_pole_rejected() {
        let result = MultiChannelEstimator::new(2, 1, vec![-10.0, 3.0], 0.01);
        assert_eq!(result.err(), Some(EstimatorError::InvalidPole(3.0)));
    }

    #[test]
    fn test_update_shape() {
        let mut estimator = MultiChannelEstimator::new(3, 2, -40.0, 0.005).unwrap();
        let rows = estimator.update(&[1.0, 2.0, 3.0]);
        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(row.len(), 3);
        }
    }

    #[test]
    fn test_channels_are_independent() {
        // Different poles converge at different rates on the same input.
        let mut estimator =
            MultiChannelEstimator::new(2, 0, vec![-5.0, -200.0], 0.005).unwrap();
        let mut rows = Vec::new();
        for _ in 0..40 {
            rows = estimator.update(&[1.0, 1.0]);
        }
        // The fast channel is essentially converged, the slow one is not.
        assert_abs_diff_eq!(rows[1][0], 1.0, epsilon = 1e-6);
        assert!(rows[0][0] < 0.95);
    }
}
