//! Core traits for streaming aggregators
//!
//! All accumulators implement the base [`Aggregator`] trait, which captures
//! the merge contract needed to combine partial results computed on
//! separate shards, threads, or processes.

use core::fmt::Debug;

use crate::target::TargetKind;

#[cfg(feature = "std")]
use std::string::String;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Error while adding a batch of observations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsError {
    /// Targets were not judged continuous by the classifier
    UnsupportedTargetType {
        kind: TargetKind,
    },
    /// Predictions and targets have different lengths
    LengthMismatch {
        predictions: usize,
        targets: usize,
    },
}

impl core::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MetricsError::UnsupportedTargetType { kind } => {
                write!(f, "target type {} not supported for regression metrics", kind)
            }
            MetricsError::LengthMismatch {
                predictions,
                targets,
            } => {
                write!(
                    f,
                    "length mismatch: {} predictions, {} targets",
                    predictions, targets
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MetricsError {}

/// Error during message decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Bytes are not a valid protobuf message
    Message(prost::DecodeError),
    /// Message decoded but its fields are inconsistent
    Corrupted(String),
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::Message(err) => write!(f, "invalid message: {}", err),
            DecodeError::Corrupted(msg) => write!(f, "corrupted data: {}", msg),
        }
    }
}

impl From<prost::DecodeError> for DecodeError {
    fn from(err: prost::DecodeError) -> Self {
        DecodeError::Message(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Message(err) => Some(err),
            DecodeError::Corrupted(_) => None,
        }
    }
}

/// Core trait for all mergeable accumulators
///
/// Implementations must make [`merge`](Aggregator::merge) commutative and
/// associative over their sufficient statistics, so any grouping of partial
/// results reduces to the same totals (up to floating-point rounding).
pub trait Aggregator: Clone + Debug + Default {
    /// Combine two accumulators into a new one
    ///
    /// Neither operand is modified and the result never aliases either of them.
    fn merge(&self, other: &Self) -> Self;

    /// Fold another accumulator into this one
    fn merge_from(&mut self, other: &Self);

    /// Reset accumulator to empty state
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of observations accumulated
    fn count(&self) -> u64;

    /// Check if accumulator is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
