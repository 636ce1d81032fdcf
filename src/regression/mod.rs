//! Regression-quality metrics
//!
//! This module provides a constant-memory accumulator for regression error
//! metrics over a stream of (prediction, target) batches, with merge support
//! for distributed computation and a compact binary encoding.
//!
//! # Example
//!
//! ```
//! use flowmetrics::regression::RegressionMetrics;
//!
//! let mut metrics = RegressionMetrics::with_fields("predicted_price", "price");
//!
//! metrics.add(&[101.5, 98.0, 250.25], &[100.0, 99.5, 249.0]).unwrap();
//!
//! println!("MAE: {:?}", metrics.mean_absolute_error());
//! println!("RMSE: {:?}", metrics.root_mean_squared_error());
//!
//! let bytes = metrics.to_bytes();
//! let restored = RegressionMetrics::from_bytes(&bytes).unwrap();
//! assert_eq!(restored, Some(metrics));
//! ```

mod message;
mod metrics;

pub use message::RegressionMetricsMessage;
pub use metrics::RegressionMetrics;
