//! Streaming regression error accumulator
//!
//! Tracks running sums of prediction error so that mean absolute error,
//! mean squared error, and root mean squared error can be reported at any
//! point without retaining the observed pairs.

use prost::Message;

use super::message::RegressionMetricsMessage;
use crate::math;
use crate::target::{TargetClassifier, TargetHeuristic, TargetKind};
use crate::trace::{debug_event, trace_event};
use crate::traits::{Aggregator, DecodeError, MetricsError};

#[cfg(feature = "std")]
use std::{string::String, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

/// Regression error accumulator
///
/// Holds O(1) sufficient statistics over (prediction, target) pairs:
/// the count, Σ|p − t|, Σ(p − t), and Σ(p − t)². Metric getters return
/// `None` until at least one pair has been added, so "no data" is never
/// confused with "zero error".
///
/// # Example
///
/// ```
/// use flowmetrics::regression::RegressionMetrics;
///
/// let mut metrics = RegressionMetrics::with_fields("predicted", "actual");
/// metrics.add(&[1.0, 2.0, 3.0], &[1.5, 2.0, 2.0]).unwrap();
///
/// assert_eq!(metrics.count(), 3);
/// assert_eq!(metrics.mean_absolute_error(), Some(0.5));
/// assert!((metrics.root_mean_squared_error().unwrap() - 0.6455).abs() < 1e-4);
/// ```
///
/// # Distributed Usage
///
/// ```
/// use flowmetrics::regression::RegressionMetrics;
///
/// let mut shard_a = RegressionMetrics::new();
/// let mut shard_b = RegressionMetrics::new();
///
/// shard_a.add(&[1.0, 2.0, 3.0], &[1.5, 2.0, 2.0]).unwrap();
/// shard_b.add(&[5.0], &[4.0]).unwrap();
///
/// let merged = shard_a.merge(&shard_b);
/// assert_eq!(merged.count(), 4);
/// assert_eq!(merged.sum_abs_diff(), 2.5);
/// assert_eq!(merged.sum2_diff(), 2.25);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RegressionMetrics {
    /// Name of the prediction column
    prediction_field: Option<String>,
    /// Name of the ground-truth column
    target_field: Option<String>,
    /// Number of pairs observed
    count: u64,
    /// Σ|prediction − target|
    sum_abs_diff: f64,
    /// Σ(prediction − target)
    sum_diff: f64,
    /// Σ(prediction − target)²
    sum2_diff: f64,
}

impl Default for RegressionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl RegressionMetrics {
    /// Create a new empty accumulator without column names
    pub fn new() -> Self {
        Self {
            prediction_field: None,
            target_field: None,
            count: 0,
            sum_abs_diff: 0.0,
            sum_diff: 0.0,
            sum2_diff: 0.0,
        }
    }

    /// Create a new empty accumulator labelled with its source columns
    pub fn with_fields(prediction_field: impl Into<String>, target_field: impl Into<String>) -> Self {
        Self {
            prediction_field: Some(prediction_field.into()),
            target_field: Some(target_field.into()),
            ..Self::new()
        }
    }

    /// Add a batch of predictions and their targets
    ///
    /// Targets are checked with the default [`TargetHeuristic`]. See
    /// [`add_with`](Self::add_with) to supply a different classifier.
    pub fn add(&mut self, predictions: &[f64], targets: &[f64]) -> Result<(), MetricsError> {
        self.add_with(predictions, targets, &TargetHeuristic::default())
    }

    /// Add a batch using the given target classifier
    ///
    /// Fails with [`MetricsError::LengthMismatch`] when the slices differ in
    /// length, and with [`MetricsError::UnsupportedTargetType`] when the
    /// classifier does not judge the targets continuous. On error the
    /// accumulator is left unchanged.
    pub fn add_with<C>(
        &mut self,
        predictions: &[f64],
        targets: &[f64],
        classifier: &C,
    ) -> Result<(), MetricsError>
    where
        C: TargetClassifier + ?Sized,
    {
        if predictions.len() != targets.len() {
            let err = MetricsError::LengthMismatch {
                predictions: predictions.len(),
                targets: targets.len(),
            };
            debug_event!("rejected batch: {}", err);
            return Err(err);
        }

        let kind = classifier.classify(targets);
        if kind != TargetKind::Continuous {
            let err = MetricsError::UnsupportedTargetType { kind };
            debug_event!("rejected batch of {} targets: {}", targets.len(), err);
            return Err(err);
        }

        for (&prediction, &target) in predictions.iter().zip(targets) {
            self.add_diff(prediction - target);
        }

        trace_event!("added {} pairs, count now {}", targets.len(), self.count);
        Ok(())
    }

    #[inline]
    fn add_diff(&mut self, diff: f64) {
        self.sum_abs_diff += math::abs(diff);
        self.sum_diff += diff;
        self.sum2_diff += diff * diff;
        self.count += 1;
    }

    /// Get the number of pairs observed
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Alias for [`count`](Self::count), paired with [`is_empty`](Self::is_empty)
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Name of the prediction column, if one was recorded
    pub fn prediction_field(&self) -> Option<&str> {
        self.prediction_field.as_deref()
    }

    /// Name of the ground-truth column, if one was recorded
    pub fn target_field(&self) -> Option<&str> {
        self.target_field.as_deref()
    }

    /// Σ|prediction − target|
    pub fn sum_abs_diff(&self) -> f64 {
        self.sum_abs_diff
    }

    /// Σ(prediction − target)
    pub fn sum_diff(&self) -> f64 {
        self.sum_diff
    }

    /// Σ(prediction − target)²
    pub fn sum2_diff(&self) -> f64 {
        self.sum2_diff
    }

    /// Mean absolute error, or `None` when empty
    pub fn mean_absolute_error(&self) -> Option<f64> {
        self.per_pair(self.sum_abs_diff)
    }

    /// Mean squared error, or `None` when empty
    pub fn mean_squared_error(&self) -> Option<f64> {
        self.per_pair(self.sum2_diff)
    }

    /// Root mean squared error, or `None` when empty
    pub fn root_mean_squared_error(&self) -> Option<f64> {
        self.mean_squared_error().map(math::sqrt)
    }

    /// Mean signed error (prediction bias), or `None` when empty
    ///
    /// Positive values mean predictions overshoot their targets on average.
    pub fn mean_error(&self) -> Option<f64> {
        self.per_pair(self.sum_diff)
    }

    #[inline]
    fn per_pair(&self, sum: f64) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(sum / self.count as f64)
        }
    }

    /// Combine two accumulators into a new one
    ///
    /// Counts and sums are added element-wise. Neither operand is modified,
    /// and the result is always a fresh value, including when one side is
    /// empty. Column names are taken from `self`, falling back to `other`
    /// for any name `self` lacks.
    pub fn merge(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        merged.merge_from(other);
        merged
    }

    /// Fold another accumulator into this one
    pub fn merge_from(&mut self, other: &Self) {
        if self.prediction_field.is_none() {
            self.prediction_field.clone_from(&other.prediction_field);
        }
        if self.target_field.is_none() {
            self.target_field.clone_from(&other.target_field);
        }

        if other.count == 0 {
            return;
        }

        self.count += other.count;
        self.sum_abs_diff += other.sum_abs_diff;
        self.sum_diff += other.sum_diff;
        self.sum2_diff += other.sum2_diff;

        debug_event!("merged {} pairs, count now {}", other.count, self.count);
    }

    /// Reset counts and sums, keeping column names
    pub fn clear(&mut self) {
        self.count = 0;
        self.sum_abs_diff = 0.0;
        self.sum_diff = 0.0;
        self.sum2_diff = 0.0;
    }

    /// Convert to the wire message
    pub fn to_message(&self) -> RegressionMetricsMessage {
        RegressionMetricsMessage {
            prediction_field: self.prediction_field.clone(),
            target_field: self.target_field.clone(),
            count: Some(self.count),
            sum_abs_diff: self.sum_abs_diff,
            sum_diff: self.sum_diff,
            sum2_diff: self.sum2_diff,
        }
    }

    /// Rebuild an accumulator from a wire message
    ///
    /// A missing count is read as zero. Fails if the message carries non-zero
    /// sums with a zero count.
    pub fn from_message(message: RegressionMetricsMessage) -> Result<Self, DecodeError> {
        let count = message.count.unwrap_or(0);
        let has_sums = message.sum_abs_diff != 0.0
            || message.sum_diff != 0.0
            || message.sum2_diff != 0.0;
        if count == 0 && has_sums {
            return Err(DecodeError::Corrupted(String::from(
                "non-zero sums with zero count",
            )));
        }

        Ok(Self {
            prediction_field: message.prediction_field,
            target_field: message.target_field,
            count,
            sum_abs_diff: message.sum_abs_diff,
            sum_diff: message.sum_diff,
            sum2_diff: message.sum2_diff,
        })
    }

    /// Serialize to bytes
    ///
    /// The result is never empty, even for an empty accumulator.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_message().encode_to_vec()
    }

    /// Deserialize from bytes
    ///
    /// Returns `Ok(None)` for a zero-length buffer, meaning no accumulator
    /// was stored. Any non-empty buffer produced by [`to_bytes`](Self::to_bytes)
    /// yields `Ok(Some(_))` with identical fields.
    pub fn from_bytes(bytes: &[u8]) -> Result<Option<Self>, DecodeError> {
        if bytes.is_empty() {
            return Ok(None);
        }

        let decoded = RegressionMetricsMessage::decode(bytes)
            .map_err(DecodeError::from)
            .and_then(Self::from_message);
        match decoded {
            Ok(metrics) => Ok(Some(metrics)),
            Err(err) => {
                debug_event!("failed to decode regression metrics: {}", err);
                Err(err)
            }
        }
    }
}

impl From<&RegressionMetrics> for RegressionMetricsMessage {
    fn from(metrics: &RegressionMetrics) -> Self {
        metrics.to_message()
    }
}

impl TryFrom<RegressionMetricsMessage> for RegressionMetrics {
    type Error = DecodeError;

    fn try_from(message: RegressionMetricsMessage) -> Result<Self, Self::Error> {
        Self::from_message(message)
    }
}

impl Aggregator for RegressionMetrics {
    fn merge(&self, other: &Self) -> Self {
        RegressionMetrics::merge(self, other)
    }

    fn merge_from(&mut self, other: &Self) {
        RegressionMetrics::merge_from(self, other);
    }

    fn clear(&mut self) {
        RegressionMetrics::clear(self);
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + self.prediction_field.as_ref().map_or(0, String::capacity)
            + self.target_field.as_ref().map_or(0, String::capacity)
    }

    fn count(&self) -> u64 {
        self.count
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RegressionMetrics {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("RegressionMetrics", 6)?;
        state.serialize_field("prediction_field", &self.prediction_field)?;
        state.serialize_field("target_field", &self.target_field)?;
        state.serialize_field("count", &self.count)?;
        state.serialize_field("sum_abs_diff", &self.sum_abs_diff)?;
        state.serialize_field("sum_diff", &self.sum_diff)?;
        state.serialize_field("sum2_diff", &self.sum2_diff)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RegressionMetrics {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct RegressionData {
            prediction_field: Option<String>,
            target_field: Option<String>,
            count: u64,
            sum_abs_diff: f64,
            sum_diff: f64,
            sum2_diff: f64,
        }

        let data = RegressionData::deserialize(deserializer)?;
        RegressionMetrics::from_message(RegressionMetricsMessage {
            prediction_field: data.prediction_field,
            target_field: data.target_field,
            count: Some(data.count),
            sum_abs_diff: data.sum_abs_diff,
            sum_diff: data.sum_diff,
            sum2_diff: data.sum2_diff,
        })
        .map_err(<D::Error as serde::de::Error>::custom)
    }
}
