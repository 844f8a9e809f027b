use std::fmt;

/// Error types for derivative-bank construction
#[derive(Debug, Clone, PartialEq)]
pub enum EstimatorError {
    /// Pole must be a strictly negative real number
    InvalidPole(f64),
    /// Sample interval must be strictly positive
    InvalidSampleInterval(f64),
    /// Filter coefficient vectors must be non-empty
    EmptyCoefficients,
    /// Numerator and denominator lengths are inconsistent after extraction
    CoefficientMismatch(usize, usize),
    /// A per-channel parameter list does not match the channel count
    ChannelCountMismatch(usize, usize),
    /// A multi-channel estimator needs at least one channel
    NoChannels,
    /// Discretization or transfer-function extraction produced coefficients
    /// that cannot form a realizable filter (e.g. underflow for a very high
    /// order combined with a fast pole)
    NumericalDegeneracy(String),
}

impl fmt::Display for EstimatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimatorError::InvalidPole(pole) => {
                write!(f, "Invalid pole: {}. Pole must be a negative real number", pole)
            }
            EstimatorError::InvalidSampleInterval(ts) => {
                write!(f, "Invalid sample interval: {}. Must be strictly positive", ts)
            }
            EstimatorError::EmptyCoefficients => {
                write!(f, "Filter coefficient vectors must not be empty")
            }
            EstimatorError::CoefficientMismatch(num_len, den_len) => {
                write!(
                    f,
                    "Coefficient length mismatch: numerator has {} entries, denominator has {}",
                    num_len, den_len
                )
            }
            EstimatorError::ChannelCountMismatch(got, expected) => {
                write!(
                    f,
                    "Per-channel parameter has {} entries, but the estimator has {} channels",
                    got, expected
                )
            }
            EstimatorError::NoChannels => {
                write!(f, "Channel count must be at least 1")
            }
            EstimatorError::NumericalDegeneracy(msg) => {
                write!(f, "Numerical degeneracy: {}", msg)
            }
        }
    }
}

impl std::error::Error for EstimatorError {}

/// Result type for derivative-bank operations
pub type Result<T> = std::result::Result<T, EstimatorError>;
