//! Target-type classification
//!
//! Regression metrics only make sense when the ground truth is real-valued.
//! This module decides whether a target column looks continuous or like a
//! set of class labels, behind the [`TargetClassifier`] trait so callers can
//! substitute their own policy.
//!
//! # Example
//!
//! ```
//! use flowmetrics::target::{TargetClassifier, TargetHeuristic, TargetKind};
//!
//! let heuristic = TargetHeuristic::default();
//!
//! assert_eq!(heuristic.classify(&[1.5, 2.0, 2.0]), TargetKind::Continuous);
//! assert_eq!(heuristic.classify(&[0.0, 1.0, 1.0, 0.0]), TargetKind::Binary);
//! assert!(!heuristic.is_continuous(&[1.0, 2.0, 3.0]));
//! ```

mod classify;

pub use classify::{AcceptAll, TargetClassifier, TargetHeuristic, TargetKind};
