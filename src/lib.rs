//! # Flowmetrics
//!
//! Mergeable streaming accumulators for model-quality metrics.
//!
//! Flowmetrics keeps constant-size running statistics over batches of
//! (prediction, target) pairs, so quality metrics can be profiled over
//! unbounded data and combined across shards without revisiting raw values.
//!
//! ## Features
//!
//! - **Regression Metrics**: MAE, MSE, RMSE, and mean signed error
//! - **Target Classification**: pluggable continuous-vs-categorical checks
//! - **Full Mergeability**: commutative, associative merge for distributed use
//! - **Binary Encoding**: protobuf-compatible, lossless round-trip
//!
//! ## Quick Start
//!
//! ```rust
//! use flowmetrics::prelude::*;
//!
//! let mut metrics = RegressionMetrics::new();
//! metrics.add(&[1.0, 2.0, 3.0], &[1.5, 2.0, 2.0]).unwrap();
//!
//! println!("MAE: {:?}", metrics.mean_absolute_error());
//! ```
//!
//! ## Distributed Computing
//!
//! All accumulators implement the [`Aggregator`](traits::Aggregator) trait,
//! whose `merge` allows partial results to be combined across workers:
//!
//! ```rust
//! use flowmetrics::regression::RegressionMetrics;
//!
//! let mut worker1 = RegressionMetrics::new();
//! let mut worker2 = RegressionMetrics::new();
//!
//! // Each worker processes its partition
//! worker1.add(&[1.0, 2.0, 3.0], &[1.5, 2.0, 2.0]).unwrap();
//! worker2.add(&[5.0], &[4.0]).unwrap();
//!
//! // Merge results
//! let total = worker1.merge(&worker2);
//! assert_eq!(total.count(), 4);
//! ```
//!
//! ## Feature Flags
//!
//! Metric families:
//! - `regression` (default): regression error metrics
//! - `full`: Enable all metric families and optional integrations
//!
//! Platform features:
//! - `std` (default): Standard library support
//! - `serde`: Enable serialization
//! - `tracing`: Emit diagnostic events through `tracing`

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod math;
#[cfg(feature = "regression")]
mod trace;

// Core traits always available
pub mod reduce;
pub mod target;
pub mod traits;

#[cfg(feature = "regression")]
#[cfg_attr(docsrs, doc(cfg(feature = "regression")))]
pub mod regression;

pub mod prelude {
    pub use crate::reduce::merge_all;
    pub use crate::target::{TargetClassifier, TargetHeuristic, TargetKind};
    pub use crate::traits::*;

    #[cfg(feature = "regression")]
    pub use crate::regression::{RegressionMetrics, RegressionMetricsMessage};
}

#[cfg(feature = "regression")]
pub use regression::RegressionMetrics;
