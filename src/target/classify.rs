//! Continuous-vs-categorical target classification
//!
//! The default [`TargetHeuristic`] looks at value integrality, sample count,
//! and the number of distinct values. Any value with a fractional part marks
//! the column continuous; integral columns are treated as class labels when
//! they hold few distinct values.

use crate::math;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Kind of target column, as judged by a [`TargetClassifier`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// Real-valued targets, suitable for regression metrics
    Continuous,
    /// At most two distinct integral labels
    Binary,
    /// A small set of distinct integral labels
    Multiclass,
    /// Empty or non-finite input
    Unknown,
}

impl TargetKind {
    /// Lowercase name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Continuous => "continuous",
            TargetKind::Binary => "binary",
            TargetKind::Multiclass => "multiclass",
            TargetKind::Unknown => "unknown",
        }
    }
}

impl core::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides whether a target sequence is continuous
///
/// Implemented for any `Fn(&[f64]) -> TargetKind`, so a closure can be
/// passed wherever a classifier is expected.
///
/// ```
/// use flowmetrics::regression::RegressionMetrics;
/// use flowmetrics::target::TargetKind;
///
/// let mut metrics = RegressionMetrics::new();
/// let always = |_: &[f64]| TargetKind::Continuous;
///
/// metrics.add_with(&[1.0, 2.0], &[1.0, 1.0], &always).unwrap();
/// assert_eq!(metrics.count(), 2);
/// ```
pub trait TargetClassifier {
    /// Classify a target sequence
    fn classify(&self, targets: &[f64]) -> TargetKind;

    /// Check whether targets are continuous
    fn is_continuous(&self, targets: &[f64]) -> bool {
        self.classify(targets) == TargetKind::Continuous
    }
}

impl<F> TargetClassifier for F
where
    F: Fn(&[f64]) -> TargetKind,
{
    fn classify(&self, targets: &[f64]) -> TargetKind {
        self(targets)
    }
}

/// Default classifier based on integrality and distinct-value count
///
/// - Empty input or any NaN/infinite value: [`TargetKind::Unknown`]
/// - Any value with a fractional part: [`TargetKind::Continuous`]
/// - Fewer than `min_samples` integral values: [`TargetKind::Continuous`]
/// - At most two distinct integral values: [`TargetKind::Binary`]
/// - At most `max_classes` distinct integral values: [`TargetKind::Multiclass`]
/// - Otherwise: [`TargetKind::Continuous`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetHeuristic {
    /// Integral columns shorter than this are not judged as labels
    min_samples: usize,
    /// Largest distinct-value count still treated as a label set
    max_classes: usize,
}

impl Default for TargetHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetHeuristic {
    /// Default minimum sample count before integral targets count as labels
    pub const DEFAULT_MIN_SAMPLES: usize = 2;
    /// Default label-set size limit
    pub const DEFAULT_MAX_CLASSES: usize = 20;

    /// Create a heuristic with default thresholds
    pub fn new() -> Self {
        Self {
            min_samples: Self::DEFAULT_MIN_SAMPLES,
            max_classes: Self::DEFAULT_MAX_CLASSES,
        }
    }

    /// Set the minimum number of integral values needed to judge a label set
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Set the largest number of distinct integral values treated as labels
    ///
    /// # Panics
    ///
    /// Panics if `max_classes` is less than 2
    pub fn with_max_classes(mut self, max_classes: usize) -> Self {
        assert!(max_classes >= 2, "max_classes must be at least 2");
        self.max_classes = max_classes;
        self
    }

    /// Minimum sample count threshold
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Label-set size limit
    pub fn max_classes(&self) -> usize {
        self.max_classes
    }
}

impl TargetClassifier for TargetHeuristic {
    fn classify(&self, targets: &[f64]) -> TargetKind {
        if targets.is_empty() {
            return TargetKind::Unknown;
        }

        let mut integral = true;
        for &t in targets {
            if !t.is_finite() {
                return TargetKind::Unknown;
            }
            if integral && !math::is_integral(t) {
                integral = false;
            }
        }

        if !integral || targets.len() < self.min_samples {
            return TargetKind::Continuous;
        }

        match count_distinct(targets, self.max_classes + 1) {
            0..=2 => TargetKind::Binary,
            n if n <= self.max_classes => TargetKind::Multiclass,
            _ => TargetKind::Continuous,
        }
    }
}

/// Classifier that accepts every non-empty finite sequence as continuous
///
/// For pipelines that already know a column holds real-valued targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptAll;

impl TargetClassifier for AcceptAll {
    fn classify(&self, targets: &[f64]) -> TargetKind {
        if targets.is_empty() || targets.iter().any(|t| !t.is_finite()) {
            TargetKind::Unknown
        } else {
            TargetKind::Continuous
        }
    }
}

/// Count distinct values, stopping once `limit` is reached
fn count_distinct(values: &[f64], limit: usize) -> usize {
    let mut seen: Vec<f64> = Vec::with_capacity(limit.min(values.len()));
    for &v in values {
        if !seen.contains(&v) {
            seen.push(v);
            if seen.len() >= limit {
                break;
            }
        }
    }
    seen.len()
}
